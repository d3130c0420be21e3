use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use attendance_core::{
    errors::Error as CoreError,
    users::{NewUser, UserServiceTrait},
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{error_response, ApiError, ApiResult};
use crate::main_lib::AppState;

/// Header carrying the session token. `Authorization: Bearer` is accepted as well.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const DUMMY_PASSWORD: &str = "attendance-dummy-password";

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    dummy_hash: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

/// Identity of the caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        let dummy_hash = hash_with_random_salt(DUMMY_PASSWORD)
            .map_err(|e| anyhow::anyhow!("Failed to prepare login hash: {e}"))?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            token_ttl: config.access_token_ttl,
            dummy_hash,
        })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash_with_random_salt(password)
    }

    pub fn verify_password(&self, password_hash: &str, candidate: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    /// Spends the same Argon2 work as a real verification, then fails.
    /// Used when the login email is unknown.
    pub fn reject_unknown_user(&self, candidate: &str) -> AuthError {
        if let Err(AuthError::Internal(msg)) = self.verify_password(&self.dummy_hash, candidate) {
            tracing::error!("Dummy password verification failed: {}", msg);
        }
        AuthError::InvalidCredentials
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the user id carried by a valid token.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            tracing::debug!("Rejected token: {:?}", err.kind());
            AuthError::Unauthorized
        })?;
        if data.claims.sub.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims.sub)
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    fn token_response(&self, user_id: &str) -> Result<TokenResponse, AuthError> {
        Ok(TokenResponse {
            token: self.issue_token(user_id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in().as_secs(),
        })
    }
}

fn hash_with_random_salt(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized | AuthError::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "auth", self.to_string())
            }
            AuthError::Internal(msg) => {
                tracing::error!("Authentication failure: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

fn read_credentials(payload: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Credentials> {
    let Json(credentials) = payload?;
    if credentials.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }
    Ok(credentials)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let credentials = read_credentials(payload)?;
    let password_hash = state.auth.hash_password(&credentials.password)?;
    let user = state
        .user_service
        .register(NewUser {
            email: credentials.email,
            password_hash,
        })
        .await?;
    tracing::info!("User {} registered", user.id);
    Ok(Json(state.auth.token_response(&user.id)?))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let credentials = read_credentials(payload)?;
    let Some(user) = state.user_service.find_by_email(&credentials.email)? else {
        return Err(state.auth.reject_unknown_user(&credentials.password).into());
    };
    state
        .auth
        .verify_password(&user.password_hash, &credentials.password)?;
    Ok(Json(state.auth.token_response(&user.id)?))
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        return Some(token.trim());
    }

    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token.trim())
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(request.headers())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::Unauthorized)?;
    let user_id = state.auth.validate_token(token)?;
    // Tokens outlive their users; an unknown subject is treated like a bad token.
    let user = state.user_service.get_user(&user_id).map_err(|err| match err {
        CoreError::NotFound(_) => AuthError::Unauthorized,
        other => AuthError::Internal(format!("Failed to resolve token user: {other}")),
    })?;

    request
        .extensions_mut()
        .insert(CurrentUser { user_id: user.id });
    Ok(next.run(request).await)
}
