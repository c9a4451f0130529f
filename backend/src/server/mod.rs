//! Server construction and route wiring.

pub mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::domain::ports::EntryRepository;
use crate::domain::{AccessGuard, AdminCredentials, RegistrationService};
use crate::inbound::http::admin::admin_login;
use crate::inbound::http::health::health;
use crate::inbound::http::legal::data_policy;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::waitlist::{
    check_email, count_entries, create_entry, delete_entry, get_entry, list_entries,
};
use crate::outbound::persistence::{
    DbPool, DieselEntryRepository, PoolConfig, run_pending_migrations,
};

/// Wire the domain service and guard for the HTTP layer.
pub fn build_state(config: &AppConfig, repository: Arc<dyn EntryRepository>) -> HttpState {
    let waitlist = Arc::new(RegistrationService::new(
        repository,
        config.launch_date.clone(),
    ));
    let guard = Arc::new(AccessGuard::new(
        config.api_key.clone(),
        AdminCredentials::new(config.admin_username.clone(), config.admin_password.clone()),
    ));
    HttpState::new(waitlist, guard)
}

/// Build the actix application with every route registered.
///
/// The literal waitlist paths are registered before the `{id}` matcher so
/// `/waitlist/count` and `/waitlist/check/{email}` are never captured as ids.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .service(health)
        .service(admin_login)
        .service(data_policy)
        .service(create_entry)
        .service(list_entries)
        .service(count_entries)
        .service(check_email)
        .service(get_entry)
        .service(delete_entry);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run migrations, build the pool, and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    run_pending_migrations(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url.clone()))
        .await
        .map_err(std::io::Error::other)?;
    let repository = Arc::new(DieselEntryRepository::new(pool));
    let state = web::Data::new(build_state(&config, repository));

    info!(
        addr = %config.bind_addr,
        origins = ?config.allowed_origins,
        "starting waitlist API server"
    );

    HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}
