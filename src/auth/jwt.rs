use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{
    auth::{claims::Claims, extractors::AuthenticatedPrincipal},
    config::JwtConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    /// Bad signature, malformed token, or foreign issuer/audience.
    #[error("token signature invalid")]
    InvalidSignature,
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token expiry out of range")]
    ExpiryOutOfRange,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

/// Signs and validates HS256 bearer tokens. Cheap to clone.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
}

impl TokenIssuer {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
                decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
                issuer: cfg.issuer.clone(),
                audience: cfg.audience.clone(),
                ttl: Duration::from_secs((cfg.ttl_minutes.max(0) as u64).saturating_mul(60)),
            }),
        }
    }

    pub fn issue(&self, principal: &AuthenticatedPrincipal) -> Result<String, TokenError> {
        self.issue_at(principal, OffsetDateTime::now_utc())
    }

    pub(crate) fn issue_at(
        &self,
        principal: &AuthenticatedPrincipal,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let exp = i64::try_from(self.keys.ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: principal.id,
            email: principal.email.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.keys.issuer.clone(),
            aud: self.keys.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(TokenError::Signing)?;
        debug!(user_id = %principal.id, "jwt signed");
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<AuthenticatedPrincipal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.keys.audience));
        validation.set_issuer(std::slice::from_ref(&self.keys.issuer));

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            }
        })?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(AuthenticatedPrincipal {
            id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&JwtConfig {
        secret: "test-secret".into(),
        issuer: "test-issuer".into(),
        audience: "test-aud".into(),
        ttl_minutes: 5,
    })
}
