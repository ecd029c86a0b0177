use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, RefreshTokenRecord}, session::Session, user::User},
    ports::AuthRepository
};
use crate::error::AppError;
use crate::config::Config;
use argon2::{password_hash::{SaltString, PasswordHash, PasswordHasher, PasswordVerifier}, Argon2};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use sha2::{Sha256, Digest};

pub const TOKEN_AUDIENCE: &str = "tenancy-frontend";

/// Issues and verifies the session tokens. The identity provider of the platform.
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, config: &Config) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT private key: {}", e)))?;
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT public key: {}", e)))?;

        Ok(Self { repo, issuer: config.auth_issuer.clone(), encoding_key, decoding_key })
    }

    pub async fn login(&self, user: &User) -> Result<(String, String, String), AppError> {
        let family_id = Uuid::new_v4().to_string();
        self.issue_token_pair(user, family_id, 1).await
    }

    /// Rotates the refresh token. The caller passes the freshly loaded user so the
    /// super-admin claim reflects its current value.
    pub async fn refresh(&self, record: RefreshTokenRecord, user: &User) -> Result<(String, String, String), AppError> {
        self.repo.delete_refresh_token(&record.token_hash).await?;

        if record.expires_at < Utc::now() {
            return Err(AppError::Unauthorized);
        }

        self.issue_token_pair(user, record.family_id, record.generation_id + 1).await
    }

    pub async fn find_refresh_record(&self, raw_refresh_token: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        let token_hash = self.hash_token(raw_refresh_token);
        self.repo.find_refresh_token(&token_hash).await
    }

    pub async fn logout(&self, raw_refresh_token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_refresh_token);
        self.repo.delete_refresh_token(&token_hash).await
    }

    pub async fn revoke_all(&self, user_id: &str) -> Result<(), AppError> {
        self.repo.delete_refresh_tokens_for_user(user_id).await
    }

    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn session_from_claims(claims: &Claims) -> Session {
        Session::new(claims.sub.clone(), claims.is_super_admin)
    }

    async fn issue_token_pair(&self, user: &User, family_id: String, generation_id: i32) -> Result<(String, String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();
        let exp = (now + Duration::minutes(15)).timestamp() as usize;

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.id.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            is_super_admin: user.is_super_admin,
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        let refresh_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        let refresh_token_hash = self.hash_token(&refresh_token);

        let refresh_record = RefreshTokenRecord {
            token_hash: refresh_token_hash,
            user_id: user.id.clone(),
            family_id,
            generation_id,
            expires_at: now + Duration::days(7),
            created_at: now,
        };

        self.repo.create_refresh_token(&refresh_record).await?;
        Ok((access_token, refresh_token, csrf_token))
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|_| AppError::Internal)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)
}
