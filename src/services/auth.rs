use crate::config::AdminSettings;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during admin authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),

    #[error("Invalid token lifetime: {0} minutes")]
    InvalidTtl(i64),

    #[error("Email not found or password does not match")]
    InvalidCredentials,

    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims for an admin session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signed admin token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies admin credentials against a configured Argon2 hash and issues tokens
///
/// The password is never stored; `admin.password_hash` holds a PHC string
/// (`$argon2id$v=19$...`) that carries its own salt and cost parameters.
pub struct AdminAuth {
    email: String,
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AdminAuth {
    pub fn new(settings: &AdminSettings) -> Result<Self, AuthError> {
        let password_hash = settings.password_hash.trim().to_string();
        parse_argon2_hash(&password_hash)?;

        let token_ttl = Some(settings.token_ttl_mins)
            .filter(|mins| *mins > 0)
            .and_then(Duration::try_minutes)
            .ok_or(AuthError::InvalidTtl(settings.token_ttl_mins))?;

        Ok(Self {
            email: settings.email.clone(),
            password_hash,
            encoding_key: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            token_ttl,
        })
    }

    /// Hash a password with a fresh random salt, producing the PHC string to configure
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::InvalidHash(e.to_string()))
    }

    /// Check submitted credentials
    pub fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let hash = parse_argon2_hash(&self.password_hash)?;
        // Always pay for the hash so an unknown email is not faster to reject
        let password_matches = Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok();

        if email == self.email && password_matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn issue_token(&self, email: &str) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .ok_or(AuthError::InvalidTtl(self.token_ttl.num_minutes()))?;
        let claims = AdminClaims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn validate_token(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    /// Validate an `Authorization: Bearer <token>` header value
    pub fn authorize(&self, header: Option<&str>) -> Result<AdminClaims, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.validate_token(token)
    }
}

/// Parse a PHC string, accepting only the Argon2 family
pub fn parse_argon2_hash(phc: &str) -> Result<PasswordHash<'_>, AuthError> {
    let hash = PasswordHash::new(phc).map_err(|e| AuthError::InvalidHash(e.to_string()))?;
    if !hash.algorithm.as_str().starts_with("argon2") {
        return Err(AuthError::InvalidHash(format!(
            "expected an argon2 hash, got {}",
            hash.algorithm
        )));
    }
    Ok(hash)
}
