//! HTTP server configuration resolved from the environment.

use std::env;
use std::net::SocketAddr;

use tracing::warn;
use uuid::Uuid;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration for the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: String,
    pub(crate) jwt_secret: Vec<u8>,
}

impl ServerConfig {
    /// Resolve configuration from the process environment.
    ///
    /// - `BIND_ADDR` — socket address to listen on (default `0.0.0.0:8080`).
    /// - `DATABASE_URL` — PostgreSQL connection string (required).
    /// - `JWT_SECRET` — credential signing secret. Required in release
    ///   builds; debug builds (or `AUTH_ALLOW_EPHEMERAL=1`) fall back to a
    ///   random per-process secret, which invalidates all outstanding
    ///   tokens on restart.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                let allow_dev = env::var("AUTH_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("JWT_SECRET unset; using an ephemeral signing secret (dev only)");
                    format!("{}{}", Uuid::new_v4(), Uuid::new_v4()).into_bytes()
                } else {
                    return Err(std::io::Error::other(
                        "JWT_SECRET must be set in release builds",
                    ));
                }
            }
        };

        Ok(Self {
            bind_addr,
            database_url,
            jwt_secret,
        })
    }
}
