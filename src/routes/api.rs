use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::RestRepository;
use crate::routes::error_response;
use crate::services::categories::list_categories;
use crate::services::products::{
    list_deals, list_featured_products, list_products, list_products_by_category,
};
use crate::services::storefront::{load_category_page, load_product_page, load_storefront};

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Restrict the listing to one category slug.
    pub category: Option<String>,
}

/// Query parameters accepted by the "top" selections.
#[derive(Debug, Default, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

#[get("/storefront")]
/// Home page data: featured products, deals and the category menu.
pub async fn api_v1_storefront(repo: web::Data<RestRepository>) -> impl Responder {
    HttpResponse::Ok().json(load_storefront(repo.get_ref()).await)
}

#[get("/products")]
/// All products, newest first, optionally restricted to one category.
pub async fn api_v1_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    let listing = match params.category.as_deref() {
        Some(slug) => list_products_by_category(repo.get_ref(), slug).await,
        None => list_products(repo.get_ref()).await,
    };
    HttpResponse::Ok().json(listing)
}

#[get("/products/featured")]
pub async fn api_v1_featured_products(
    params: web::Query<TopQuery>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    HttpResponse::Ok().json(list_featured_products(repo.get_ref(), params.limit).await)
}

#[get("/products/deals")]
pub async fn api_v1_deals(
    params: web::Query<TopQuery>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    HttpResponse::Ok().json(list_deals(repo.get_ref(), params.limit).await)
}

#[get("/products/{product_id}")]
/// Product page data.
///
/// Answers `404` when no product carries the id and `502` when the store
/// could not be read.
pub async fn api_v1_product_page(
    product_id: web::Path<i64>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match load_product_page(repo.get_ref(), product_id.into_inner()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/categories")]
pub async fn api_v1_categories(repo: web::Data<RestRepository>) -> impl Responder {
    HttpResponse::Ok().json(list_categories(repo.get_ref()).await)
}

#[get("/categories/{slug}")]
/// Category page data.
pub async fn api_v1_category_page(
    slug: web::Path<String>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    HttpResponse::Ok().json(load_category_page(repo.get_ref(), &slug).await)
}
