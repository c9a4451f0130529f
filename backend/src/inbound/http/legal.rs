//! Personal-data treatment policy endpoint.
//!
//! Serves the consent text applicants accept when registering, as required
//! by Colombia's personal data protection regime (Law 1581 of 2012 and
//! Decree 1377 of 2013).

use actix_web::{HttpRequest, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiResult;
use super::auth::require_api_key;
use super::state::HttpState;

const POLICY_TEXT: &str = "\
By joining our waitlist you authorise us to:

1. COLLECTION: collect your personal data (name, identity document, email, \
phone, and city) to inform you about the product launch.

2. PROCESSING: use your data to send you communications related to the \
launch, including the launch notice, access instructions, and related \
content.

3. STORAGE: keep your data safely stored while your subscription lasts or \
until you request its removal.

4. RIGHTS: you may know, update, rectify, and delete your personal data at \
any time through our official channels.

5. SECURITY: we apply technical and organisational measures to protect your \
data against unauthorised access.

This authorisation is voluntary. By ticking the acceptance box you confirm \
you have read and accept this policy.";

/// Policy document returned by `GET /legal/data-policy`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DataPolicy {
    pub title: String,
    pub law: String,
    pub text: String,
    pub last_updated: String,
}

/// Personal-data treatment policy text.
#[utoipa::path(
    get,
    path = "/legal/data-policy",
    tags = ["legal"],
    responses(
        (status = 200, description = "Policy document", body = DataPolicy),
        (status = 401, description = "Invalid API key")
    )
)]
#[get("/legal/data-policy")]
pub async fn data_policy(
    request: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DataPolicy>> {
    require_api_key(&request, &state.guard)?;

    Ok(web::Json(DataPolicy {
        title: "Personal Data Treatment Policy".to_owned(),
        law: "Law 1581 of 2012 and Decree 1377 of 2013".to_owned(),
        text: POLICY_TEXT.to_owned(),
        last_updated: "2025-01-31".to_owned(),
    }))
}
