use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::{Envelope, ServiceError};

pub mod admin;
pub mod api;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api/v1")
                .service(api::api_v1_storefront)
                .service(api::api_v1_featured_products)
                .service(api::api_v1_deals)
                .service(api::api_v1_product_page)
                .service(api::api_v1_products)
                .service(api::api_v1_categories)
                .service(api::api_v1_category_page),
        )
        .service(
            web::scope("/admin")
                .service(admin::login)
                .service(admin::logout)
                .service(admin::add_product)
                .service(admin::edit_product)
                .service(admin::delete_product)
                .service(admin::add_category)
                .service(admin::edit_category)
                .service(admin::show_category)
                .service(admin::setup),
        );
}

/// HTTP status reported for a failed operation.
pub(crate) fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Store(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Answers with the envelope and the status matching its error, if any.
pub(crate) fn envelope_response<T: Serialize>(envelope: Envelope<T>) -> HttpResponse {
    let status = envelope.error.as_ref().map_or(StatusCode::OK, status_for);
    HttpResponse::build(status).json(envelope)
}

/// Answers with a failed envelope for `error`.
pub(crate) fn error_response(error: ServiceError) -> HttpResponse {
    envelope_response(Envelope::<()>::failed(error))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(ServiceError::Form(err.to_string()));
    InternalError::from_response(err, response).into()
}
