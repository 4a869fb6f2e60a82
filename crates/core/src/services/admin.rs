//! Admin account and session service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use suggestbox_common::{AppError, AppResult, Config, IdGenerator};
use suggestbox_db::entities::admin;
use suggestbox_db::repositories::AdminRepository;

/// Input for creating an admin account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminInput {
    /// Login name
    #[validate(length(min = 3, max = 64))]
    pub username: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Input for an admin login.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Admin account as exposed by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    /// Account ID
    pub id: String,
    /// Login name
    pub username: String,
    /// Creation timestamp
    pub created_at: String,
    /// Most recent login timestamp
    pub last_login_at: Option<String>,
}

impl From<admin::Model> for AdminResponse {
    fn from(model: admin::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at.to_rfc3339(),
            last_login_at: model.last_login_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Admin service for accounts and session tokens.
#[derive(Clone)]
pub struct AdminService {
    repo: AdminRepository,
    id_gen: IdGenerator,
    jwt_secret: String,
    token_expire_minutes: i64,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub fn new(repo: AdminRepository, config: &Config) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expire_minutes: config.auth.token_expire_minutes,
        }
    }

    /// Create a new admin account.
    pub async fn create(&self, input: CreateAdminInput) -> AppResult<admin::Model> {
        input.validate()?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let model = admin::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        };

        self.repo.create(model).await
    }

    /// Verify credentials, record the login, and issue a session token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, input: LoginInput) -> AppResult<String> {
        let admin = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &admin.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let username = admin.username.clone();
        let mut active: admin::ActiveModel = admin.into();
        active.last_login_at = Set(Some(Utc::now().into()));
        self.repo.update(active).await?;

        self.issue_token(&username)
    }

    /// Resolve a bearer token to an admin account.
    pub async fn verify_token(&self, token: &str) -> AppResult<admin::Model> {
        let data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized)?;

        self.repo
            .find_by_username(&data.claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    fn issue_token(&self, username: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.token_expire_minutes * 60,
        };

        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign session token: {e}")))
    }
}

/// Hash a password with Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
