//! Server configuration.
//!
//! Everything is driven by environment variables (with `.env` support via dotenvy). Host, port
//! and database location fall back to sensible defaults with a logged warning; the token-issuer
//! settings have no safe default and the server refuses to start without them.

use std::env;

use log::*;

use crate::errors::ServerError;

const DEFAULT_DRINKS_HOST: &str = "127.0.0.1";
const DEFAULT_DRINKS_PORT: u16 = 8361;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/drinks.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, auth: AuthConfig) -> Self {
        Self { host: host.to_string(), port, database_url: DEFAULT_DATABASE_URL.to_string(), auth }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let host = env::var("DRINKS_HOST").ok().unwrap_or_else(|| DEFAULT_DRINKS_HOST.into());
        let port = env::var("DRINKS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for DRINKS_PORT. {e} Using the default, {DEFAULT_DRINKS_PORT}, \
                         instead."
                    );
                    DEFAULT_DRINKS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_DRINKS_PORT);
        let database_url = env::var("DRINKS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ DRINKS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let auth = AuthConfig::try_from_env()?;
        Ok(Self { host, port, database_url, auth })
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------

/// Where tokens come from and who they must be for. The issuer and key-set URL are derived from
/// the tenant domain the way Auth0 publishes them.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// URL of the trusted issuer's JSON Web Key Set.
    pub jwks_url: String,
    /// The expected `iss` claim, `https://{domain}/`.
    pub issuer: String,
    /// The expected `aud` claim.
    pub audience: String,
}

impl AuthConfig {
    pub fn new(domain: &str, audience: &str) -> Self {
        Self {
            jwks_url: format!("https://{domain}/.well-known/jwks.json"),
            issuer: format!("https://{domain}/"),
            audience: audience.to_string(),
        }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let domain = env::var("DRINKS_AUTH0_DOMAIN")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [DRINKS_AUTH0_DOMAIN]")))?;
        let audience = env::var("DRINKS_AUTH0_AUDIENCE")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [DRINKS_AUTH0_AUDIENCE]")))?;
        Ok(Self::new(&domain, &audience))
    }
}
