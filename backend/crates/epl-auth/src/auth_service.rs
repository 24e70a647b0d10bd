//! Login, registration and per-request token checks composed over the stores.

use crate::{
    AuthError, AuthSettings, LoginRateLimiter, PasswordHasher, ProfileUpdate,
    Result as AuthErrorResult, TokenIssuer, parse_bearer,
};

use epl_core::validation::validate_registration;
use epl_core::{AuthSubject, Identity, NewIdentity, PasswordHash, Permissions, Token, TokenScope};
use epl_db::{Database, PermissionRepository, UserRepository};

use tokio::sync::OnceCell;

/// Stand-in hashed when a login names an unknown email, so both miss paths cost the same.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-email";

pub struct AuthService {
    db: Database,
    users: UserRepository,
    permissions: PermissionRepository,
    issuer: TokenIssuer,
    hasher: PasswordHasher,
    rate_limiter: Option<LoginRateLimiter>,
    decoy_hash: OnceCell<PasswordHash>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(db: Database, settings: AuthSettings) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            permissions: PermissionRepository::new(db.clone()),
            issuer: TokenIssuer::new(db.clone()),
            db,
            hasher: PasswordHasher::new(settings.bcrypt_cost),
            rate_limiter: settings.rate_limit.clone().map(LoginRateLimiter::new),
            decoy_hash: OnceCell::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Create an identity and grant the configured default permissions, in one
    /// transaction.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<Identity> {
        validate_registration(name, email, password)?;

        let password_hash = self.hash_password(password).await?;

        let mut tx = self.db.begin().await?;
        let identity = self
            .users
            .insert_with(&mut *tx, &NewIdentity::new(name, email, password_hash))
            .await?;
        self.permissions
            .add_for_user_with(&mut *tx, identity.id, &self.settings.default_permissions)
            .await?;
        self.db.commit(tx).await?;

        log::info!("Registered user {}", identity.id);
        Ok(identity)
    }

    /// Mint a one-time activation token for `user_id`. Delivery is the caller's job.
    pub async fn issue_activation_token(&self, user_id: i64) -> AuthErrorResult<Token> {
        self.issuer
            .issue(user_id, self.settings.activation_token_ttl, TokenScope::Activation)
            .await
    }

    /// Mark the owner of an activation token as activated and burn every
    /// activation token they hold.
    pub async fn activate(&self, plaintext: &str) -> AuthErrorResult<Identity> {
        let mut identity = self
            .issuer
            .resolve(TokenScope::Activation, plaintext)
            .await
            .map_err(AuthError::not_found_as_unauthorized)?;

        identity.activated = true;

        let mut tx = self.db.begin().await?;
        self.users.update_with(&mut *tx, &mut identity).await?;
        self.issuer
            .revoke_all_in(&mut tx, TokenScope::Activation, identity.id)
            .await?;
        self.db.commit(tx).await?;

        log::info!("Activated user {}", identity.id);
        Ok(identity)
    }

    /// Exchange email + password for an `authentication` token.
    ///
    /// Unknown email and wrong password fail identically with `Unauthorized`.
    pub async fn login(&self, email: &str, password: &str) -> AuthErrorResult<Token> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.check(email)?;
        }

        let identity = match self.users.get_by_email(email).await {
            Ok(identity) => identity,
            Err(epl_db::DbError::NotFound { .. }) => {
                let decoy = self.decoy_hash().await?;
                self.verify_password(decoy, password).await?;
                log::debug!("Login rejected: no matching identity");
                return Err(AuthError::unauthorized());
            }
            Err(e) => return Err(e.into()),
        };

        if !self
            .verify_password(identity.password_hash.clone(), password)
            .await?
        {
            log::debug!("Login rejected for user {}: password mismatch", identity.id);
            return Err(AuthError::unauthorized());
        }

        if self.settings.require_activation && !identity.activated {
            return Err(AuthError::forbidden(
                "your user account must be activated to access this resource",
            ));
        }

        self.issuer
            .issue(identity.id, self.settings.token_ttl, TokenScope::Authentication)
            .await
    }

    /// Resolve a presented token to its identity, or `Unauthorized`.
    pub async fn authorize(&self, scope: TokenScope, plaintext: &str) -> AuthErrorResult<Identity> {
        self.issuer
            .resolve(scope, plaintext)
            .await
            .map_err(AuthError::not_found_as_unauthorized)
    }

    /// Subject for an optional `Authorization` header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AuthErrorResult<AuthSubject> {
        let Some(header) = authorization else {
            return Ok(AuthSubject::Anonymous);
        };

        let plaintext = parse_bearer(header)?;
        let identity = self
            .authorize(TokenScope::Authentication, plaintext)
            .await?;

        Ok(AuthSubject::Authenticated(identity))
    }

    /// Revoke every authentication token of `identity`.
    pub async fn logout(&self, identity: &Identity) -> AuthErrorResult<u64> {
        self.issuer
            .revoke_all(TokenScope::Authentication, identity.id)
            .await
    }

    /// Apply `update` to `identity` under its in-hand version.
    ///
    /// A stale version fails with `EditConflict`; the caller must re-read. A
    /// password change revokes all existing authentication tokens in the same
    /// transaction as the update.
    pub async fn update_profile(
        &self,
        mut identity: Identity,
        update: ProfileUpdate,
    ) -> AuthErrorResult<Identity> {
        update.validate()?;

        if let Some(name) = update.name {
            identity.name = name;
        }
        if let Some(email) = update.email {
            identity.email = email;
        }
        let password_changed = match update.password {
            Some(password) => {
                identity.password_hash = self.hash_password(&password).await?;
                true
            }
            None => false,
        };

        let mut tx = self.db.begin().await?;
        self.users.update_with(&mut *tx, &mut identity).await?;
        if password_changed {
            self.issuer
                .revoke_all_in(&mut tx, TokenScope::Authentication, identity.id)
                .await?;
        }
        self.db.commit(tx).await?;

        if password_changed {
            log::info!("Password changed for user {}; sessions revoked", identity.id);
        }

        Ok(identity)
    }

    pub async fn find_identity(&self, user_id: i64) -> AuthErrorResult<Identity> {
        Ok(self.users.get_by_id(user_id).await?)
    }

    pub async fn grant_permissions<S: AsRef<str> + Sync>(
        &self,
        user_id: i64,
        codes: &[S],
    ) -> AuthErrorResult<u64> {
        Ok(self.permissions.add_for_user(user_id, codes).await?)
    }

    pub async fn list_permissions(&self, user_id: i64) -> AuthErrorResult<Permissions> {
        Ok(self.permissions.get_all_for_user(user_id).await?)
    }

    /// The subject's identity, provided it may use the service at all.
    pub fn require_activated<'a>(&self, subject: &'a AuthSubject) -> AuthErrorResult<&'a Identity> {
        let identity = subject.identity().ok_or_else(AuthError::unauthorized)?;

        if self.settings.require_activation && !identity.activated {
            return Err(AuthError::forbidden(
                "your user account must be activated to access this resource",
            ));
        }

        Ok(identity)
    }

    /// The subject's identity, provided it holds `code`.
    pub async fn require_permission<'a>(
        &self,
        subject: &'a AuthSubject,
        code: &str,
    ) -> AuthErrorResult<&'a Identity> {
        let identity = self.require_activated(subject)?;
        let permissions = self.list_permissions(identity.id).await?;

        if !permissions.includes(code) {
            log::debug!("User {} lacks permission {}", identity.id, code);
            return Err(AuthError::forbidden(
                "your user account doesn't have the necessary permissions to access this resource",
            ));
        }

        Ok(identity)
    }

    /// Forget throttling state for emails whose budget has refilled.
    pub fn prune_login_attempts(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.prune();
        }
    }

    async fn decoy_hash(&self) -> AuthErrorResult<PasswordHash> {
        self.decoy_hash
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await
            .cloned()
    }

    /// bcrypt is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, plaintext: &str) -> AuthErrorResult<PasswordHash> {
        let hasher = self.hasher;
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::hashing(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, hash: PasswordHash, plaintext: &str) -> AuthErrorResult<bool> {
        let hasher = self.hasher;
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext))
            .await
            .map_err(|e| AuthError::hashing(format!("Verification task failed: {}", e)))?
    }
}
