use crate::domain::category::{Category, CategoryColumn, CategoryListQuery};
use crate::domain::query::Direction;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{Envelope, Listing, ServiceError, ServiceResult};

/// Lists every category, newest first.
pub async fn list_categories<R>(repo: &R) -> Listing<Category>
where
    R: CategoryReader + ?Sized,
{
    let query =
        CategoryListQuery::new().order_by(CategoryColumn::CreatedAt, Direction::Descending);

    Listing::from_result(repo.list_categories(query).await, "categories")
}

/// Lists the categories whose `column` equals `value`, newest first.
pub async fn list_categories_where<R>(
    repo: &R,
    column: CategoryColumn,
    value: &str,
) -> Listing<Category>
where
    R: CategoryReader + ?Sized,
{
    let query = CategoryListQuery::new()
        .eq(column, value)
        .order_by(CategoryColumn::CreatedAt, Direction::Descending);

    Listing::from_result(repo.list_categories(query).await, "categories")
}

/// Categories in menu order, alphabetical by title.
pub async fn list_category_menu<R>(repo: &R) -> Listing<Category>
where
    R: CategoryReader + ?Sized,
{
    let query = CategoryListQuery::new().order_by(CategoryColumn::Title, Direction::Ascending);

    Listing::from_result(repo.list_categories(query).await, "categories")
}

/// Fetches exactly one category.
pub async fn get_category<R>(repo: &R, category_id: i64) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    match repo.get_category_by_id(category_id).await {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Error fetching category {category_id}: {err}");
            Err(ServiceError::from(err))
        }
    }
}

/// Validates the form and inserts one category.
pub async fn create_category<R>(repo: &R, form: AddCategoryForm) -> Envelope<Vec<Category>>
where
    R: CategoryWriter + ?Sized,
{
    Envelope::from_result(insert_category(repo, form).await, "creating category")
}

async fn insert_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Vec<Category>>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_categories(std::slice::from_ref(&new_category))
        .await
        .map_err(ServiceError::from)
}

/// Applies the fields present in the form to the category `category_id`.
pub async fn modify_category<R>(
    repo: &R,
    category_id: i64,
    form: EditCategoryForm,
) -> Envelope<Vec<Category>>
where
    R: CategoryWriter + ?Sized,
{
    Envelope::from_result(
        patch_category(repo, category_id, form).await,
        "updating category",
    )
}

async fn patch_category<R>(
    repo: &R,
    category_id: i64,
    form: EditCategoryForm,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, &update)
        .await
        .map_err(ServiceError::from)
}
