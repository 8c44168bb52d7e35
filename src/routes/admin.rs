use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, delete, get, patch, post, web};
use validator::Validate;

use crate::auth::{ADMIN_IDENTITY, AdminUser, token_matches};
use crate::config::AdminConfig;
use crate::forms::auth::LoginForm;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::RestRepository;
use crate::routes::{envelope_response, error_response};
use crate::services::categories::{create_category, get_category, modify_category};
use crate::services::products::{create_product, modify_product, remove_product};
use crate::services::setup::seed_catalog;
use crate::services::{Envelope, ServiceError};

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    config: web::Data<AdminConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(err) = form.validate() {
        return error_response(ServiceError::Form(err.to_string()));
    }

    if !token_matches(&config.token, &form.token) {
        log::warn!("Rejected admin login with a wrong token");
        return error_response(ServiceError::Unauthorized);
    }

    match Identity::login(&req.extensions(), ADMIN_IDENTITY.to_string()) {
        Ok(_) => envelope_response(Envelope::<()>::done()),
        Err(err) => {
            log::error!("Failed to store admin session: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    envelope_response(Envelope::<()>::done())
}

#[post("/products")]
pub async fn add_product(
    _admin: AdminUser,
    repo: web::Data<RestRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    envelope_response(create_product(repo.get_ref(), form.into_inner()).await)
}

#[patch("/products/{product_id}")]
pub async fn edit_product(
    _admin: AdminUser,
    product_id: web::Path<i64>,
    repo: web::Data<RestRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    envelope_response(
        modify_product(repo.get_ref(), product_id.into_inner(), form.into_inner()).await,
    )
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    _admin: AdminUser,
    product_id: web::Path<i64>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    envelope_response(remove_product(repo.get_ref(), product_id.into_inner()).await)
}

#[post("/categories")]
pub async fn add_category(
    _admin: AdminUser,
    repo: web::Data<RestRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    envelope_response(create_category(repo.get_ref(), form.into_inner()).await)
}

#[patch("/categories/{category_id}")]
pub async fn edit_category(
    _admin: AdminUser,
    category_id: web::Path<i64>,
    repo: web::Data<RestRepository>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    envelope_response(
        modify_category(repo.get_ref(), category_id.into_inner(), form.into_inner()).await,
    )
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    _admin: AdminUser,
    category_id: web::Path<i64>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match get_category(repo.get_ref(), category_id.into_inner()).await {
        Ok(category) => envelope_response(Envelope::ok(category)),
        Err(err) => error_response(err),
    }
}

#[post("/setup")]
/// Inserts the sample catalog.
pub async fn setup(_admin: AdminUser, repo: web::Data<RestRepository>) -> impl Responder {
    HttpResponse::Ok().json(seed_catalog(repo.get_ref()).await)
}
