//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all HTTP endpoints from the inbound layer, the request and
//! response schemas, and the `X-API-Key` security scheme. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::registration::RegistrationDraft;
use crate::domain::{DocumentType, ReferralSource};
use crate::inbound::http::admin::{AdminLoginRequest, AdminLoginResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::health::HealthCheck;
use crate::inbound::http::legal::DataPolicy;
use crate::inbound::http::waitlist::{
    CountResponse, DeleteResponse, EmailCheckResponse, EntryDetails, RegistrationData,
    RegistrationResponse,
};

/// Enrich the generated document with the API-key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "Shared API key; obtainable via POST /admin/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Waitlist registration API",
        description = "Launch waitlist sign-up, administration, and email checks \
            behind a shared API key."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::legal::data_policy,
        crate::inbound::http::waitlist::create_entry,
        crate::inbound::http::waitlist::list_entries,
        crate::inbound::http::waitlist::count_entries,
        crate::inbound::http::waitlist::check_email,
        crate::inbound::http::waitlist::get_entry,
        crate::inbound::http::waitlist::delete_entry,
    ),
    components(schemas(
        RegistrationDraft,
        RegistrationData,
        RegistrationResponse,
        EntryDetails,
        CountResponse,
        EmailCheckResponse,
        DeleteResponse,
        AdminLoginRequest,
        AdminLoginResponse,
        HealthCheck,
        DataPolicy,
        ErrorBody,
        DocumentType,
        ReferralSource,
    )),
    tags(
        (name = "system", description = "Health probes"),
        (name = "admin", description = "Administrator authentication"),
        (name = "waitlist", description = "Waitlist registration and administration"),
        (name = "legal", description = "Data protection policy")
    )
)]
pub struct ApiDoc;
