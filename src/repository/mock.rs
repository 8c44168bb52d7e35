use async_trait::async_trait;
use mockall::mock;

use super::{CategoryReader, CategoryWriter, ProductReader, ProductWriter};
use crate::domain::{
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    #[async_trait]
    impl ProductReader for ProductReader {
        async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
        async fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    #[async_trait]
    impl ProductWriter for ProductWriter {
        async fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<Vec<Product>>;
        async fn update_product(&self, product_id: i64, updates: &UpdateProduct) -> RepositoryResult<Vec<Product>>;
        async fn delete_product(&self, product_id: i64) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    #[async_trait]
    impl CategoryReader for CategoryReader {
        async fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
        async fn get_category_by_id(&self, id: i64) -> RepositoryResult<Option<Category>>;
        async fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    #[async_trait]
    impl CategoryWriter for CategoryWriter {
        async fn create_categories(&self, new_categories: &[NewCategory]) -> RepositoryResult<Vec<Category>>;
        async fn update_category(&self, category_id: i64, updates: &UpdateCategory) -> RepositoryResult<Vec<Category>>;
    }
}

/// Mocked repository implementing every reader and writer trait, for
/// services that need more than one of them.
pub struct MockRepository {
    pub products: MockProductReader,
    pub product_writer: MockProductWriter,
    pub categories: MockCategoryReader,
    pub category_writer: MockCategoryWriter,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            products: MockProductReader::new(),
            product_writer: MockProductWriter::new(),
            categories: MockCategoryReader::new(),
            category_writer: MockCategoryWriter::new(),
        }
    }
}

#[async_trait]
impl ProductReader for MockRepository {
    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        self.products.list_products(query).await
    }

    async fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        self.products.get_product_by_id(id).await
    }
}

#[async_trait]
impl ProductWriter for MockRepository {
    async fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<Vec<Product>> {
        self.product_writer.create_products(new_products).await
    }

    async fn update_product(
        &self,
        product_id: i64,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Vec<Product>> {
        self.product_writer.update_product(product_id, updates).await
    }

    async fn delete_product(&self, product_id: i64) -> RepositoryResult<()> {
        self.product_writer.delete_product(product_id).await
    }
}

#[async_trait]
impl CategoryReader for MockRepository {
    async fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        self.categories.list_categories(query).await
    }

    async fn get_category_by_id(&self, id: i64) -> RepositoryResult<Option<Category>> {
        self.categories.get_category_by_id(id).await
    }

    async fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        self.categories.get_category_by_slug(slug).await
    }
}

#[async_trait]
impl CategoryWriter for MockRepository {
    async fn create_categories(
        &self,
        new_categories: &[NewCategory],
    ) -> RepositoryResult<Vec<Category>> {
        self.category_writer.create_categories(new_categories).await
    }

    async fn update_category(
        &self,
        category_id: i64,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Vec<Category>> {
        self.category_writer
            .update_category(category_id, updates)
            .await
    }
}
