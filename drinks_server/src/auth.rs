//! Bearer-token verification and permission checks.
//!
//! Tokens are issued externally (an Auth0 tenant, or anything else that publishes a JSON Web Key
//! Set) and arrive in the `Authorization` header. [`JwksVerifier`] checks the RS256 signature
//! against the issuer's published keys, along with the audience, issuer and expiry claims.
//! [`check_permission`] then confirms the token grants the permission the route requires.

use actix_web::{http::header, HttpRequest};
use jsonwebtoken::{
    decode,
    decode_header,
    jwk::JwkSet,
    Algorithm,
    DecodingKey,
    Validation,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, errors::{AuthError, ServerError}};

/// The decoded payload of a verified bearer token. Lives only for the duration of the request
/// that presented it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// The permissions granted to the token's subject. A token *without* this claim is rejected
    /// with `invalid_claims`; a token with an empty list is valid but can only reach public
    /// routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub exp: u64,
}

/// Verifies a raw bearer token and produces its claims. The production implementation is
/// [`JwksVerifier`]; endpoint tests substitute a mock.
pub trait TokenVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Pulls the raw token out of the `Authorization` header. The header must be exactly two
/// space-separated parts, the first literally `Bearer`.
pub fn extract_bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req.headers().get(header::AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Authorization header contains invalid characters.".to_string()))?;
    bearer_token_from_header(value)
}

pub fn bearer_token_from_header(value: &str) -> Result<&str, AuthError> {
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 {
        return Err(AuthError::InvalidHeader("Authorization header must be a Bearer token.".to_string()));
    }
    if parts[0] != "Bearer" {
        return Err(AuthError::InvalidHeader("Authorization header must start with Bearer.".to_string()));
    }
    Ok(parts[1])
}

/// Confirms that `claims` grants the required permission.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let permissions = claims.permissions.as_ref().ok_or(AuthError::PermissionsMissing)?;
    if permissions.iter().any(|p| p == required) {
        debug!("🔑️ {} authorized for {required}", claims.sub);
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions(required.to_string()))
    }
}

/// Verifies tokens against the trusted issuer's signing-key set.
///
/// The key set is fetched once, at startup, and held for the lifetime of the process. Rotated
/// keys are picked up on restart; see [`JwksVerifier::discover`].
#[derive(Clone)]
pub struct JwksVerifier {
    keys: JwkSet,
    audience: String,
    issuer: String,
}

impl JwksVerifier {
    /// Fetches the issuer's signing keys and builds a verifier for the configured audience.
    pub async fn discover(config: &AuthConfig) -> Result<Self, ServerError> {
        let keys = reqwest::get(&config.jwks_url)
            .await
            .map_err(|e| ServerError::InitializeError(format!("Could not fetch signing keys. {e}")))?
            .json::<JwkSet>()
            .await
            .map_err(|e| ServerError::InitializeError(format!("Could not parse signing keys. {e}")))?;
        info!("🔑️ Loaded {} signing keys from {}", keys.keys.len(), config.jwks_url);
        Ok(Self::from_keys(keys, &config.audience, &config.issuer))
    }

    /// Builds a verifier from a key set already in hand.
    pub fn from_keys(keys: JwkSet, audience: &str, issuer: &str) -> Self {
        Self { keys, audience: audience.to_string(), issuer: issuer.to_string() }
    }
}

impl TokenVerifier for JwksVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        let kid = header.kid.ok_or(AuthError::UnknownKeyId)?;
        let jwk = self.keys.find(&kid).ok_or(AuthError::UnknownKeyId)?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        let data = decode::<Claims>(token, &key, &validation).map_err(map_jwt_error)?;
        Ok(data.claims)
    }
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
            AuthError::InvalidClaims("Incorrect claims. Please check the audience and issuer.".to_string())
        },
        _ => AuthError::MalformedToken(e.to_string()),
    }
}
