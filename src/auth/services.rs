use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    auth::{
        extractors::AuthenticatedPrincipal,
        jwt::{TokenError, TokenIssuer},
        password::PasswordHasher,
        repo::UserRepository,
        repo_types::NewUser,
    },
    db::RepoError,
};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately not told apart.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account already exists")]
    DuplicateAccount,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("store unavailable")]
    TransientFailure,
    #[error("internal error")]
    Internal,
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AuthError::DuplicateAccount,
            RepoError::Unavailable(cause) => {
                error!(error = %cause, "user store failure");
                AuthError::TransientFailure
            }
        }
    }
}

/// Signup and login. Collaborators are passed in at start-up.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            // Same Argon2 cost as a wrong password, so timing does not reveal
            // whether the email exists.
            self.hasher.verify_decoy_blocking(password.to_owned()).await;
            warn!(email = %email, "login unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_blocking(password.to_owned(), user.password_hash)
            .await
        {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue(AuthenticatedPrincipal {
            id: user.id,
            email: user.email,
        })?;
        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<String, AuthError> {
        validate_signup(email, password)?;

        if self.users.find_by_email(email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self
            .hasher
            .hash_blocking(password.to_owned())
            .await
            .map_err(|e| {
                error!(error = %e, "hash_password failed");
                AuthError::Internal
            })?;

        // A concurrent signup for the same email loses here on the unique index.
        let user = self
            .users
            .insert(NewUser {
                email: email.to_owned(),
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if matches!(e, RepoError::Conflict) {
                    warn!(email = %email, "email taken by concurrent signup");
                }
            })?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        self.issue(AuthenticatedPrincipal {
            id: user.id,
            email: user.email,
        })
    }

    fn issue(&self, principal: AuthenticatedPrincipal) -> Result<String, AuthError> {
        self.tokens.issue(&principal).map_err(|e| {
            error!(error = %e, "jwt sign failed");
            AuthError::Internal
        })
    }
}

fn validate_signup(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::Validation(
            "Email and password are required".into(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}
