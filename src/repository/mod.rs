use async_trait::async_trait;

use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::repository::client::StoreClient;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod client;
pub mod errors;
pub mod product;
pub mod query;

#[cfg(test)]
pub mod mock;

/// Name of the remote table holding products.
pub const PRODUCTS_TABLE: &str = "products";
/// Name of the remote table holding categories.
pub const CATEGORIES_TABLE: &str = "categories";

#[derive(Debug, Clone)]
/// Repository implementation backed by the hosted table store.
pub struct RestRepository {
    client: StoreClient, // reqwest::Client is cheap to clone
}

impl RestRepository {
    /// Create a new repository using the provided store client.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &StoreClient {
        &self.client
    }
}

/// Read-only operations over product records.
#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    async fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;
}

/// Write operations over product records.
#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<Vec<Product>>;
    async fn update_product(
        &self,
        product_id: i64,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Vec<Product>>;
    async fn delete_product(&self, product_id: i64) -> RepositoryResult<()>;
}

/// Read-only operations over category records.
#[async_trait]
pub trait CategoryReader: Send + Sync {
    async fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> RepositoryResult<Option<Category>>;
    async fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations over category records.
#[async_trait]
pub trait CategoryWriter: Send + Sync {
    async fn create_categories(
        &self,
        new_categories: &[NewCategory],
    ) -> RepositoryResult<Vec<Category>>;
    async fn update_category(
        &self,
        category_id: i64,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Vec<Category>>;
}
