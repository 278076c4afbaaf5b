use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{
    claims::Claims,
    dto::{join_name, PublicUser, UserDetails},
    errors::AuthError,
    jwt::TokenIssuer,
    password::PasswordHasher,
    repo::CredentialStore,
    repo_types::{NewUser, Role, User},
};

/// Role assigned to every self-registered account.
pub const DEFAULT_ROLE: Role = Role::User;

/// Token plus public projection returned by register and sign-in.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: String,
    pub user: PublicUser,
}

/// Registration and sign-in over injected store, hasher and token issuer.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    // Stands in for the stored hash when the email is unknown.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> anyhow::Result<Self> {
        let dummy_hash = hasher
            .hash(&Uuid::new_v4().to_string())
            .context("compute dummy password hash")?;
        Ok(Self {
            store,
            hasher,
            tokens,
            dummy_hash,
        })
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Authenticated, AuthError> {
        if self.store.exists_by_email(email).await? {
            warn!(email, "email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password)?;
        let saved = self
            .store
            .save(NewUser {
                email: email.to_string(),
                password_hash,
                name: join_name(first_name, last_name),
                role: DEFAULT_ROLE,
            })
            .await
            .map_err(|e| {
                warn!(email, error = %e, "save user failed");
                AuthError::from(e)
            })?;

        let user = match self.store.find_by_email(&saved.email).await? {
            Some(u) => u,
            None => {
                warn!(user_id = %saved.id, "user missing right after insert");
                return Err(AuthError::RegistrationFailed);
            }
        };

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(Authenticated {
            token,
            user: PublicUser::from(&user),
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Authenticated, AuthError> {
        let found = self.store.find_by_email(email).await?;
        let hash = found
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |u| u.password_hash.as_str());
        let password_ok = self.hasher.verify(password, hash)?;

        let user = match found {
            Some(u) if password_ok => u,
            Some(u) => {
                warn!(user_id = %u.id, "sign-in with wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                warn!(email, "sign-in for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, email = %user.email, "user signed in");
        Ok(Authenticated {
            token,
            user: PublicUser::from(&user),
        })
    }

    pub async fn lookup_by_email(&self, email: &str) -> Result<User, AuthError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Resolve the identity carried by an already verified token.
    pub async fn current_user(&self, user_id: Uuid) -> Result<PublicUser, AuthError> {
        let user = self.find_by_id(user_id).await?;
        Ok(PublicUser::from(&user))
    }

    pub async fn user_details(&self, user_id: Uuid) -> Result<UserDetails, AuthError> {
        let user = self.find_by_id(user_id).await?;
        Ok(UserDetails::from(&user))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AuthError::Unauthorized("Invalid or expired token")
        })
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
