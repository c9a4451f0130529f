//! Waitlist API handlers.
//!
//! ```text
//! POST   /waitlist                 register a submission
//! GET    /waitlist?skip=&limit=    list entries, newest first
//! GET    /waitlist/count           total entries
//! GET    /waitlist/check/{email}   email availability
//! GET    /waitlist/{id}            entry detail
//! DELETE /waitlist/{id}            remove an entry
//! ```
//!
//! Every route requires the `X-API-Key` header. The literal paths
//! (`/waitlist/count`, `/waitlist/check/{email}`) must be registered before
//! the `/waitlist/{id}` matcher.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::registration::{RegistrationDraft, WaitlistEntry};
use crate::domain::{DocumentType, ReferralSource};

use super::ApiResult;
use super::auth::{origin_address, require_api_key};
use super::error::ErrorBody;
use super::state::HttpState;

/// Identity summary returned after a successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationData {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 1-based queue position by insertion order.
    pub position: u64,
    pub registered_at: DateTime<Utc>,
}

/// Envelope for a successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    pub data: RegistrationData,
}

/// Full entry detail for administrative reads.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryDetails {
    pub id: i32,
    pub document_type: DocumentType,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub city: Option<String>,
    pub referral_source: Option<ReferralSource>,
    pub registered_at: DateTime<Utc>,
}

impl From<WaitlistEntry> for EntryDetails {
    fn from(entry: WaitlistEntry) -> Self {
        Self {
            id: entry.id,
            document_type: entry.document_type,
            document_number: entry.document_number,
            first_name: entry.first_name,
            last_name: entry.last_name,
            email: entry.email,
            country_code: entry.country_code,
            phone: entry.phone,
            city: entry.city,
            referral_source: entry.referral_source,
            registered_at: entry.registered_at,
        }
    }
}

/// Window parameters for the list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Entries to skip from the newest end. Defaults to 0.
    pub skip: Option<i64>,
    /// Maximum entries to return. Defaults to 100, capped at 500.
    pub limit: Option<i64>,
}

/// Count response for `GET /waitlist/count`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub total: u64,
    pub message: String,
}

/// Availability response for `GET /waitlist/check/{email}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailCheckResponse {
    pub exists: bool,
    pub message: String,
}

/// Confirmation response for `DELETE /waitlist/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted_id: i32,
}

/// Register a new waitlist entry.
#[utoipa::path(
    post,
    path = "/waitlist",
    request_body = RegistrationDraft,
    tags = ["waitlist"],
    responses(
        (status = 201, description = "Entry registered", body = RegistrationResponse),
        (status = 401, description = "Invalid API key", body = ErrorBody),
        (status = 409, description = "Email or document already registered", body = ErrorBody),
        (status = 422, description = "Submission failed validation", body = ErrorBody)
    )
)]
#[post("/waitlist")]
pub async fn create_entry(
    request: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationDraft>,
) -> ApiResult<HttpResponse> {
    require_api_key(&request, &state.guard)?;

    let origin = origin_address(&request);
    let receipt = state.waitlist.register(payload.into_inner(), origin).await?;

    Ok(HttpResponse::Created().json(RegistrationResponse {
        success: true,
        message: receipt.message,
        data: RegistrationData {
            id: receipt.id,
            first_name: receipt.first_name,
            last_name: receipt.last_name,
            email: receipt.email,
            position: receipt.position,
            registered_at: receipt.registered_at,
        },
    }))
}

/// List entries, newest first. Administrative use.
#[utoipa::path(
    get,
    path = "/waitlist",
    params(ListQuery),
    tags = ["waitlist"],
    responses(
        (status = 200, description = "Entries in the requested window", body = [EntryDetails]),
        (status = 401, description = "Invalid API key", body = ErrorBody)
    )
)]
#[get("/waitlist")]
pub async fn list_entries(
    request: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<EntryDetails>>> {
    require_api_key(&request, &state.guard)?;

    let entries = state
        .waitlist
        .list(query.skip.unwrap_or(0), query.limit.unwrap_or(0))
        .await?;

    Ok(web::Json(
        entries.into_iter().map(EntryDetails::from).collect(),
    ))
}

/// Total number of entries.
#[utoipa::path(
    get,
    path = "/waitlist/count",
    tags = ["waitlist"],
    responses(
        (status = 200, description = "Entry count", body = CountResponse),
        (status = 401, description = "Invalid API key", body = ErrorBody)
    )
)]
#[get("/waitlist/count")]
pub async fn count_entries(
    request: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CountResponse>> {
    require_api_key(&request, &state.guard)?;

    let total = state.waitlist.count().await?;
    Ok(web::Json(CountResponse {
        total: total.total,
        message: total.message,
    }))
}

/// Check whether an email is already registered.
#[utoipa::path(
    get,
    path = "/waitlist/check/{email}",
    params(("email" = String, Path, description = "Email address to probe")),
    tags = ["waitlist"],
    responses(
        (status = 200, description = "Availability of the email", body = EmailCheckResponse),
        (status = 401, description = "Invalid API key", body = ErrorBody)
    )
)]
#[get("/waitlist/check/{email}")]
pub async fn check_email(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmailCheckResponse>> {
    require_api_key(&request, &state.guard)?;

    let availability = state.waitlist.email_exists(&path.into_inner()).await?;
    Ok(web::Json(EmailCheckResponse {
        exists: availability.exists,
        message: availability.message,
    }))
}

/// Fetch a single entry.
#[utoipa::path(
    get,
    path = "/waitlist/{id}",
    params(("id" = i32, Path, description = "Entry identifier")),
    tags = ["waitlist"],
    responses(
        (status = 200, description = "Entry detail", body = EntryDetails),
        (status = 401, description = "Invalid API key", body = ErrorBody),
        (status = 404, description = "No entry with that id", body = ErrorBody)
    )
)]
#[get("/waitlist/{id}")]
pub async fn get_entry(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<EntryDetails>> {
    require_api_key(&request, &state.guard)?;

    let entry = state.waitlist.get_by_id(path.into_inner()).await?;
    Ok(web::Json(EntryDetails::from(entry)))
}

/// Remove an entry. Administrative use.
#[utoipa::path(
    delete,
    path = "/waitlist/{id}",
    params(("id" = i32, Path, description = "Entry identifier")),
    tags = ["waitlist"],
    responses(
        (status = 200, description = "Entry removed", body = DeleteResponse),
        (status = 401, description = "Invalid API key", body = ErrorBody),
        (status = 404, description = "No entry with that id", body = ErrorBody)
    )
)]
#[delete("/waitlist/{id}")]
pub async fn delete_entry(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteResponse>> {
    require_api_key(&request, &state.guard)?;

    let deletion = state.waitlist.delete_by_id(path.into_inner()).await?;
    Ok(web::Json(DeleteResponse {
        success: true,
        message: format!("Entry for {} deleted successfully", deletion.display_name),
        deleted_id: deletion.deleted_id,
    }))
}

#[cfg(test)]
mod tests;
