//! Email/password authentication with JWT session tokens.
//!
//! Failure classes map to the short pt-BR messages the client shows
//! verbatim: wrong credentials, unknown user, address already registered,
//! weak password.

use crate::{
    db::DbPool,
    entities::user,
    errors::{ApiError, ServiceError},
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{FromRef, FromRequestParts, Json, State},
    http::{header, request::Parts},
    response::IntoResponse,
    routing::post,
    Router,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const MIN_PASSWORD_LEN: usize = 6;

const MSG_WRONG_CREDENTIALS: &str = "E-mail ou senha incorretos. Verifique se a conta existe.";
const MSG_USER_NOT_FOUND: &str = "Usuário não encontrado. Cadastre-se primeiro.";
const MSG_EMAIL_IN_USE: &str = "Este e-mail já está cadastrado.";
const MSG_WEAK_PASSWORD: &str = "A senha deve ter pelo menos 6 caracteres.";

/// JWT claims carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Expiration time (unix seconds)
    pub exp: usize,
    /// Issued at (unix seconds)
    pub iat: usize,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct AuthService {
    db: Arc<DbPool>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_secs: u64,
}

impl AuthService {
    pub fn new(db: Arc<DbPool>, jwt_secret: &str, expiration_secs: u64) -> Self {
        Self {
            db,
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            expiration_secs,
        }
    }

    /// Creates the account and its profile row, then signs the user in.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ServiceError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::ValidationError(MSG_WEAK_PASSWORD.into()));
        }

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(MSG_EMAIL_IN_USE.into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ServiceError::InternalError(format!("password hash failed: {}", e)))?
            .to_string();

        let account = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(hash),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;

        info!("User registered: {}", account.id);
        self.issue_token(&account)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ServiceError> {
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(MSG_USER_NOT_FOUND.into()))?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("stored hash invalid: {}", e)))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            warn!("Failed login attempt for {}", email);
            return Err(ServiceError::Unauthorized(MSG_WRONG_CREDENTIALS.into()));
        }

        self.issue_token(&account)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized("Invalid or expired token".into()))
    }

    fn issue_token(&self, account: &user::Model) -> Result<TokenResponse, ServiceError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            exp: now + self.expiration_secs as usize,
            iat: now,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ServiceError::InternalError(format!("token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration_secs,
        })
    }
}

/// The signed-in caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".into()))?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".into()))?
            .trim();

        let claims = auth_service.validate_token(token)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".into()))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }
}

// Request DTOs

#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    crate::handlers::common::validate_input(&payload)?;

    let token = state
        .auth
        .register(&payload.email, &payload.password)
        .await?;
    Ok(crate::handlers::common::created_response(token))
}

async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    crate::handlers::common::validate_input(&payload)?;

    let token = state.auth.login(&payload.email, &payload.password).await?;
    Ok(crate::handlers::common::success_response(token))
}

pub fn auth_routes() -> Router<crate::AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
