//! Authentication API handlers.
//!
//! ```text
//! POST /auth/register {"email":"a@b.c","password":"secret1"}
//! POST /auth/login    {"email":"a@b.c","password":"secret1"}
//! GET  /auth/profile  (bearer required)
//! ```
//!
//! Register and login both honour the `X-Session-Id` header: ideas captured
//! under that session are migrated to the account before the credential is
//! returned.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{AuthGrant, AuthService};
use crate::domain::{Account, AuthCredentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::{BearerAccount, SessionHeader};
use crate::inbound::http::state::HttpState;

/// Credentials body shared by register and login.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AuthRequest {
    /// Account email address.
    pub email: String,
    /// Plaintext password, at least six characters.
    pub password: String,
}

/// Public account representation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserBody {
    /// Stable account identifier.
    pub id: Uuid,
    /// Account email address.
    pub email: String,
}

impl From<&Account> for UserBody {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().as_uuid(),
            email: account.email().as_ref().to_owned(),
        }
    }
}

/// Successful register/login payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    /// Signed bearer credential, valid for thirty days.
    pub token: String,
    /// The authenticated account.
    pub user: UserBody,
}

impl From<AuthGrant> for AuthResponse {
    fn from(grant: AuthGrant) -> Self {
        Self {
            user: UserBody::from(&grant.account),
            token: grant.token,
        }
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Email(_) => "email",
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooShort { .. } => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid fields or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Anonymous session whose ideas migrate to the new account")
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionHeader,
    payload: web::Json<AuthRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = AuthCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let grant = state
        .auth
        .register(&credentials, session.0.as_ref())
        .await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(grant)))
}

/// Authenticate an existing account.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid fields", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Anonymous session whose ideas migrate to the account")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionHeader,
    payload: web::Json<AuthRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = AuthCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let grant = state.auth.login(&credentials, session.0.as_ref()).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::from(grant)))
}

/// Fetch the authenticated account's profile.
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Account profile", body = UserBody),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    account: BearerAccount,
) -> ApiResult<web::Json<UserBody>> {
    let account = state.auth.profile(&account.0).await?;
    Ok(web::Json(UserBody::from(&account)))
}
