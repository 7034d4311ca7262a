//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::domain::{AccountAuthService, IdeaService, MigrationService};
use backend::inbound::http::auth::{login, profile, register};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::ideas::{create_idea, delete_idea, list_ideas};
use backend::inbound::http::state::HttpState;
use backend::outbound::crypto::Argon2PasswordService;
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselIdeaRepository, PoolConfig,
};
use backend::outbound::token::JwtTokenService;

/// Wire the port implementations over a database pool.
fn build_state(pool: DbPool, jwt_secret: &[u8]) -> HttpState {
    let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));
    let ideas = Arc::new(DieselIdeaRepository::new(pool));
    let tokens = Arc::new(JwtTokenService::new(jwt_secret));
    let auth = Arc::new(AccountAuthService::new(
        accounts,
        Arc::new(Argon2PasswordService),
        tokens.clone(),
        Arc::new(MigrationService::new(ideas.clone())),
    ));
    let idea_service = Arc::new(IdeaService::new(ideas));
    HttpState::new(auth, idea_service.clone(), idea_service, tokens)
}

fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
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
        .app_data(http_state)
        .app_data(health_state)
        .wrap(Trace)
        .service(
            web::scope("/auth")
                .service(register)
                .service(login)
                .service(profile),
        )
        .service(
            web::scope("/ideas")
                .service(list_ideas)
                .service(create_idea)
                .service(delete_idea),
        )
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the pool, wire the adapters, and run the HTTP server to completion.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(config.database_url.as_str()))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;

    let http_state = web::Data::new(build_state(pool, &config.jwt_secret));
    let health_state = web::Data::new(HealthState::new());

    let server_http_state = http_state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_http_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
