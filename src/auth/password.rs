use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{error, warn};

use crate::config::HashConfig;

/// Argon2id hashing with the cost parameters fixed at start-up.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Digest of a random secret under the same parameters; checked on the
    /// unknown-user path so it costs as much as a real mismatch.
    decoy: Arc<str>,
}

impl PasswordHasher {
    pub fn new(cfg: &HashConfig) -> anyhow::Result<Self> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
        let mut hasher = Self {
            params,
            decoy: Arc::from(""),
        };
        let secret: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        hasher.decoy = Arc::from(hasher.hash(&secret)?);
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    /// A digest that does not parse counts as a mismatch. Parameters are read
    /// from the digest itself, so hashes made under an older cost still verify.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "stored password hash is malformed");
                return false;
            }
        };
        self.argon2()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(&self, plain: String) -> anyhow::Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plain)).await?
    }

    /// Burn one verification's worth of work and report a mismatch.
    pub async fn verify_decoy_blocking(&self, plain: String) -> bool {
        let decoy = self.decoy.to_string();
        self.verify_blocking(plain, decoy).await;
        false
    }

    /// [`verify`](Self::verify) on the blocking pool. A panicked task is a mismatch.
    pub async fn verify_blocking(&self, plain: String, hash: String) -> bool {
        let hasher = self.clone();
        match tokio::task::spawn_blocking(move || hasher.verify(&plain, &hash)).await {
            Ok(ok) => ok,
            Err(e) => {
                error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> PasswordHasher {
    // Minimum Argon2 cost keeps the tests fast.
    PasswordHasher::new(&HashConfig {
        iterations: 1,
        memory_kib: Params::MIN_M_COST,
    })
    .expect("valid test params")
}
