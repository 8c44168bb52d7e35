use async_trait::async_trait;

use crate::domain::category::{
    Category as DomainCategory, CategoryColumn, CategoryListQuery,
    NewCategory as DomainNewCategory, UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{id_params, list_params};
use crate::repository::{CATEGORIES_TABLE, CategoryReader, CategoryWriter, RestRepository};

#[async_trait]
impl CategoryReader for RestRepository {
    async fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<Vec<DomainCategory>> {
        let rows = self
            .client()
            .select::<DbCategory>(CATEGORIES_TABLE, &list_params(&query))
            .await?;

        into_domain(rows)
    }

    async fn get_category_by_id(&self, id: i64) -> RepositoryResult<Option<DomainCategory>> {
        let row = self
            .client()
            .select_one::<DbCategory>(CATEGORIES_TABLE, &id_params(id))
            .await;

        match row {
            Ok(row) => Ok(Some(DomainCategory::try_from(row)?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainCategory>> {
        // Slugs are not guaranteed unique remotely; take the first match.
        let query = CategoryListQuery::new()
            .eq(CategoryColumn::Slug, slug)
            .limit(1);

        let rows = self
            .client()
            .select::<DbCategory>(CATEGORIES_TABLE, &list_params(&query))
            .await?;

        Ok(into_domain(rows)?.into_iter().next())
    }
}

#[async_trait]
impl CategoryWriter for RestRepository {
    async fn create_categories(
        &self,
        new_categories: &[DomainNewCategory],
    ) -> RepositoryResult<Vec<DomainCategory>> {
        if new_categories.is_empty() {
            return Ok(Vec::new());
        }

        let insertable: Vec<DbNewCategory<'_>> =
            new_categories.iter().map(DbNewCategory::from).collect();

        let rows = self
            .client()
            .insert::<_, DbCategory>(CATEGORIES_TABLE, insertable.as_slice())
            .await?;

        into_domain(rows)
    }

    async fn update_category(
        &self,
        category_id: i64,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<Vec<DomainCategory>> {
        let changes = DbUpdateCategory::from(updates);

        let rows = self
            .client()
            .update::<_, DbCategory>(CATEGORIES_TABLE, &id_params(category_id), &changes)
            .await?;

        into_domain(rows)
    }
}

fn into_domain(rows: Vec<DbCategory>) -> RepositoryResult<Vec<DomainCategory>> {
    rows.into_iter().map(DomainCategory::try_from).collect()
}
