use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ACCOUNT_ID, JwtConfig};
use crate::error::AppError;

/// Claims carried by every issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated account.
    #[serde(rename = "Id")]
    pub id: String,
    pub sub: String,
    pub email: String,
    /// Unique token id.
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Issues and verifies HS512-signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.key.as_bytes();

        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = config.validate_lifetime;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_minutes: config.ttl_minutes,
        }
    }

    /// Whether verification rejects tokens past their `exp`.
    pub fn validates_lifetime(&self) -> bool {
        self.validation.validate_exp
    }

    /// Mint a token for `subject`, valid from now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    /// Mint a token for `subject` as if issued at `issued_at`.
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::TokenError(format!(
                    "token lifetime of {} minutes is out of range",
                    self.ttl_minutes
                ))
            })?;

        let claims = Claims {
            id: ACCOUNT_ID.to_string(),
            sub: subject.to_string(),
            email: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)?;
        tracing::debug!(sub = %claims.sub, jti = %claims.jti, "Issued token");
        Ok(token)
    }

    /// Check signature, issuer and audience (and `exp` when enabled) and return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
