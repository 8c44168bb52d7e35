use async_trait::async_trait;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{list_params, product_key_params};
use crate::repository::{PRODUCTS_TABLE, ProductReader, ProductWriter, RestRepository};

#[async_trait]
impl ProductReader for RestRepository {
    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        let rows = self
            .client()
            .select::<DbProduct>(PRODUCTS_TABLE, &list_params(&query))
            .await?;

        into_domain(rows)
    }

    async fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<DomainProduct>> {
        let row = self
            .client()
            .select_one::<DbProduct>(PRODUCTS_TABLE, &product_key_params(id))
            .await;

        match row {
            Ok(row) => Ok(Some(DomainProduct::try_from(row)?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ProductWriter for RestRepository {
    async fn create_products(
        &self,
        new_products: &[DomainNewProduct],
    ) -> RepositoryResult<Vec<DomainProduct>> {
        if new_products.is_empty() {
            return Ok(Vec::new());
        }

        let insertable: Vec<DbNewProduct<'_>> =
            new_products.iter().map(DbNewProduct::from).collect();

        let rows = self
            .client()
            .insert::<_, DbProduct>(PRODUCTS_TABLE, insertable.as_slice())
            .await?;

        into_domain(rows)
    }

    async fn update_product(
        &self,
        product_id: i64,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let changes = DbUpdateProduct::from(updates);

        let rows = self
            .client()
            .update::<_, DbProduct>(PRODUCTS_TABLE, &product_key_params(product_id), &changes)
            .await?;

        into_domain(rows)
    }

    async fn delete_product(&self, product_id: i64) -> RepositoryResult<()> {
        self.client()
            .delete(PRODUCTS_TABLE, &product_key_params(product_id))
            .await
    }
}

fn into_domain(rows: Vec<DbProduct>) -> RepositoryResult<Vec<DomainProduct>> {
    rows.into_iter().map(DomainProduct::try_from).collect()
}
