//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], which generates the OpenAPI specification for the
//! REST API: all endpoint paths, the shared schemas, and the bearer
//! security scheme. The generated document backs Swagger UI in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Signed credential issued by POST /auth/register or POST /auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Idea capture API",
        description = "Dual-mode idea capture: anonymous sessions, registered accounts, and \
                       ownership migration between them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::profile,
        crate::inbound::http::ideas::list_ideas,
        crate::inbound::http::ideas::create_idea,
        crate::inbound::http::ideas::delete_idea,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::auth::AuthRequest,
        crate::inbound::http::auth::AuthResponse,
        crate::inbound::http::auth::UserBody,
        crate::inbound::http::ideas::CreateIdeaRequest,
        crate::inbound::http::ideas::IdeaBody,
        crate::inbound::http::ideas::DeleteResponse,
    ))
)]
pub struct ApiDoc;
