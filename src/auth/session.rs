use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Signs and checks the `admin_auth` session marker.
#[derive(Clone)]
pub struct SessionSigner {
    secret: String,
    ttl_secs: u64,
}

impl SessionSigner {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn sign(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs as i64);
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AppError::internal(format!("Session signing failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256)
        )
        .map(|d| d.claims)
        .map_err(|e| AppError::unauthorized(format!("Invalid or expired session: {e}")))
    }
}
