use serde::Deserialize;
use validator::Validate;

/// Payload submitted to `POST /admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub token: String,
}
