//! Administrator login endpoint.
//!
//! ```text
//! POST /admin/login {"username":"admin","password":"admin123"}
//! ```
//!
//! A successful login returns the shared API key; no session state is
//! created and the key stays valid until the process is reconfigured.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::error::ErrorBody;
use super::state::HttpState;

/// Login request body for `POST /admin/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response carrying the shared API key.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
    pub api_key: String,
    /// Static note: the key has no per-session expiry.
    pub expires: String,
}

/// Authenticate the administrator and return the API key for subsequent
/// calls.
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = AdminLoginRequest,
    tags = ["admin"],
    security([]),
    responses(
        (status = 200, description = "Credentials accepted", body = AdminLoginResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorBody),
        (status = 422, description = "Missing or under-length fields", body = ErrorBody)
    )
)]
#[post("/admin/login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<HttpResponse> {
    let AdminLoginRequest { username, password } = payload.into_inner();
    let api_key = state.guard.admin_login(&username, &password)?;

    Ok(HttpResponse::Ok().json(AdminLoginResponse {
        success: true,
        message: format!("Welcome {username}"),
        api_key: api_key.to_owned(),
        expires: "Session active while the server is running".to_owned(),
    }))
}
