//! Account operations exposed to the transport layer.
//!
//! Wires credentials, tokens, confirmation keys, the saved-search rules and
//! the notification schedule to an [`IdentityStore`] and a [`Clock`].
//! Reading-log operations additionally need the store to be a
//! [`ReadingLogStore`].

use crate::{AccountError, ProfileUpdate, Result as AccountErrorResult};

use rl_auth::{Token, TokenPolicy, confirmation_key, credential, parse_bearer};
use rl_config::AuthConfig;
use rl_core::{Clock, Identity, ReadingLog, SavedSearch, notification_schedule, search_set};
use rl_db::{IdentityStore, ReadingLogStore};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

pub struct AccountService<S: IdentityStore> {
    store: S,
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
    password_salt: String,
}

impl<S: IdentityStore> AccountService<S> {
    pub fn new(
        store: S,
        clock: Arc<dyn Clock>,
        policy: TokenPolicy,
        password_salt: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            password_salt: password_salt.into(),
        }
    }

    /// Build from the `[auth]` config section.
    #[track_caller]
    pub fn from_config(
        store: S,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> AccountErrorResult<Self> {
        if config.password_salt.is_empty() {
            return Err(AccountError::validation("password salt cannot be empty"));
        }

        let policy = TokenPolicy::new(
            config.token_issuer.as_str(),
            config.token_signing_key.as_str(),
            config.token_ttl_hours,
        )?;

        Ok(Self::new(store, clock, policy, config.password_salt.as_str()))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // =====================================================================
    // Authentication
    // =====================================================================

    /// Exchange an email and password for a signed token.
    pub async fn authenticate(&self, email: &str, password: &str) -> AccountErrorResult<Token> {
        let Some(identity) = self.store.find_by_email(email).await? else {
            debug!("Authentication rejected: no identity for email");
            return Err(AccountError::unauthorized());
        };

        if !credential::verify(
            identity.id,
            password,
            &self.password_salt,
            &identity.password_hash,
        ) {
            debug!("Authentication rejected: wrong password for {}", identity.id);
            return Err(AccountError::unauthorized());
        }

        let token = self.policy.token_for(&identity).encode_at(self.now())?;
        info!("Issued token for {}", identity.id);
        Ok(token)
    }

    /// Mint a new encoded token for `subject_id` from its current record.
    ///
    /// Independent of any previous token's remaining lifetime.
    pub async fn issue_fresh_token(&self, subject_id: &str) -> AccountErrorResult<String> {
        let Ok(id) = Uuid::parse_str(subject_id) else {
            debug!("Fresh token rejected: malformed subject id");
            return Err(AccountError::unauthorized());
        };

        let Some(identity) = self.store.find_by_id(id).await? else {
            debug!("Fresh token rejected: unknown subject {}", id);
            return Err(AccountError::unauthorized());
        };

        let token = self.policy.token_for(&identity).encode_at(self.now())?;
        Ok(token.encoded().to_string())
    }

    /// Parse an `Authorization` header value and return its token if it is
    /// signed with our key, issued by us and inside its validity window.
    pub async fn decode_bearer(&self, header_value: &str) -> AccountErrorResult<Token> {
        let encoded = parse_bearer(header_value).map_err(|e| {
            debug!("Bearer rejected: {}", e);
            AccountError::unauthorized()
        })?;

        let token = Token::decode(encoded, self.policy.signing_key().clone()).map_err(|e| {
            debug!("Bearer rejected: {}", e);
            AccountError::unauthorized()
        })?;

        if let Err(e) = token.validate_at(self.now()) {
            debug!("Bearer rejected: {}", e);
            return Err(AccountError::unauthorized());
        }

        if token.issuer() != self.policy.issuer() {
            debug!("Bearer rejected: foreign issuer '{}'", token.issuer());
            return Err(AccountError::unauthorized());
        }

        Ok(token)
    }

    /// Like [`Self::decode_bearer`], and the token must belong to `identity_id`.
    pub async fn decode_bearer_for(
        &self,
        header_value: &str,
        identity_id: Uuid,
    ) -> AccountErrorResult<Token> {
        let token = self.decode_bearer(header_value).await?;
        if token.subject_id() != identity_id.to_string() {
            debug!("Bearer rejected: subject mismatch for {}", identity_id);
            return Err(AccountError::unauthorized());
        }
        Ok(token)
    }

    // =====================================================================
    // Identity lifecycle
    // =====================================================================

    /// Create a new, locked identity.
    ///
    /// Without a password the stored hash matches no input, so the account
    /// can only be used after a password reset.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: Option<&str>,
    ) -> AccountErrorResult<Identity> {
        let now = self.now();
        let mut identity = Identity::new(
            first_name.to_string(),
            last_name.to_string(),
            email.to_string(),
        );
        identity.created_at = now;
        identity.updated_at = now;
        identity.password_hash = match password.filter(|p| !p.is_empty()) {
            Some(password) => credential::derive(identity.id, password, &self.password_salt),
            None => credential::unguessable(identity.id, &self.password_salt),
        };

        identity.validate()?;
        self.store.upsert(&identity).await?;

        info!("Registered identity {}", identity.id);
        Ok(identity)
    }

    /// Look up by id when `id_or_email` parses as one, otherwise by email.
    pub async fn lookup(&self, id_or_email: &str) -> AccountErrorResult<Identity> {
        let found = match Uuid::parse_str(id_or_email) {
            Ok(id) => self.store.find_by_id(id).await?,
            Err(_) => self.store.find_by_email(id_or_email).await?,
        };
        found.ok_or_else(|| AccountError::not_found(format!("identity '{id_or_email}'")))
    }

    pub async fn update_profile(
        &self,
        identity_id: Uuid,
        update: ProfileUpdate,
    ) -> AccountErrorResult<Identity> {
        let mut identity = self.load(identity_id).await?;
        if update.is_empty() {
            return Ok(identity);
        }

        let ProfileUpdate {
            first_name,
            last_name,
            email,
            password,
            categories,
            notification_at,
        } = update;

        if let Some(first_name) = first_name {
            identity.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            identity.last_name = last_name;
        }
        if let Some(email) = email {
            identity.email = email;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            identity.password_hash =
                credential::derive(identity.id, &password, &self.password_salt);
        }
        if let Some(categories) = categories {
            identity.categories = categories;
        }
        if let Some(notification_at) = notification_at {
            identity.notification_at = notification_at;
        }

        self.save(identity).await
    }

    /// Key that unlocks (or resets the password of) the identity today.
    pub async fn confirmation_key(&self, identity_id: Uuid) -> AccountErrorResult<String> {
        let identity = self.load(identity_id).await?;
        Ok(confirmation_key::derive(
            &identity.email,
            &identity.password_hash,
            self.now(),
        ))
    }

    /// Unlock the identity if `key` is today's confirmation key.
    pub async fn confirm(&self, identity_id: Uuid, key: &str) -> AccountErrorResult<Identity> {
        let mut identity = self.load(identity_id).await?;
        self.check_key(&identity, key)?;

        identity.locked = false;
        let identity = self.save(identity).await?;

        info!("Confirmed identity {}", identity.id);
        Ok(identity)
    }

    /// Replace the password if `key` is today's confirmation key.
    ///
    /// The key is derived from the old hash, so it stops working once used.
    pub async fn reset_password(
        &self,
        identity_id: Uuid,
        key: &str,
        new_password: &str,
    ) -> AccountErrorResult<Identity> {
        let mut identity = self.load(identity_id).await?;
        self.check_key(&identity, key)?;

        if new_password.is_empty() {
            return Err(AccountError::validation("new password cannot be empty"));
        }

        identity.password_hash =
            credential::derive(identity.id, new_password, &self.password_salt);
        let identity = self.save(identity).await?;

        info!("Password reset for identity {}", identity.id);
        Ok(identity)
    }

    // =====================================================================
    // Saved searches
    // =====================================================================

    pub async fn add_search(&self, identity_id: Uuid, query: &str) -> AccountErrorResult<Identity> {
        let mut identity = self.load(identity_id).await?;
        let now = self.now();

        // Rejects blank and already-saved queries before touching the store
        let searches = search_set::add(&identity.searches, query, now)?;

        self.store
            .add_search(identity_id, &SavedSearch::new(query.to_string(), now))
            .await?;

        identity.searches = searches;
        Ok(identity)
    }

    pub async fn remove_search(
        &self,
        identity_id: Uuid,
        query: &str,
    ) -> AccountErrorResult<Identity> {
        let mut identity = self.load(identity_id).await?;
        let searches = search_set::remove(&identity.searches, query)?;

        self.store.remove_search(identity_id, query).await?;

        identity.searches = searches;
        Ok(identity)
    }

    // =====================================================================
    // Notifications
    // =====================================================================

    /// Identities whose notification is due now. Nothing is modified.
    pub async fn due_notifications(&self) -> AccountErrorResult<Vec<Identity>> {
        let now = self.now();
        let candidates = self
            .store
            .find_with_notification_between(DateTime::<Utc>::UNIX_EPOCH, now)
            .await?;

        Ok(notification_schedule::due_now(&candidates, now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Push the identity's next notification `days` calendar days forward.
    pub async fn advance_notification(
        &self,
        identity_id: Uuid,
        days: u32,
    ) -> AccountErrorResult<Identity> {
        let identity = self.load(identity_id).await?;
        let advanced = notification_schedule::advance(&identity, days)?;
        self.save(advanced).await
    }

    /// Set (or clear, with `None`) the next notification time.
    pub async fn schedule_notification(
        &self,
        identity_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> AccountErrorResult<Identity> {
        let identity = self.load(identity_id).await?;
        self.save(notification_schedule::schedule(&identity, at))
            .await
    }

    async fn load(&self, identity_id: Uuid) -> AccountErrorResult<Identity> {
        self.store
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("identity {identity_id}")))
    }

    async fn save(&self, mut identity: Identity) -> AccountErrorResult<Identity> {
        identity.updated_at = self.now();
        identity.validate()?;
        self.store.upsert(&identity).await?;
        Ok(identity)
    }

    fn check_key(&self, identity: &Identity, key: &str) -> AccountErrorResult<()> {
        if confirmation_key::verify(&identity.email, &identity.password_hash, self.now(), key) {
            Ok(())
        } else {
            debug!("Confirmation key rejected for {}", identity.id);
            Err(AccountError::invalid_key())
        }
    }
}

impl<S: IdentityStore + ReadingLogStore> AccountService<S> {
    /// Save `log` on behalf of `identity_id`, which becomes its owner.
    ///
    /// Replacing an existing log is allowed only for its owner.
    pub async fn save_log(
        &self,
        identity_id: Uuid,
        mut log: ReadingLog,
    ) -> AccountErrorResult<ReadingLog> {
        self.require_identity(identity_id).await?;

        if let Some(existing) = self.store.find_log(log.id).await?
            && existing.identity_id != identity_id
        {
            debug!("Log {} rejected: owned by another identity", log.id);
            return Err(AccountError::unauthorized());
        }

        log.identity_id = identity_id;
        log.validate()?;
        self.store.upsert_log(&log).await?;

        info!("Saved reading log {} for {}", log.id, identity_id);
        Ok(log)
    }

    pub async fn logs_for(&self, identity_id: Uuid) -> AccountErrorResult<Vec<ReadingLog>> {
        self.require_identity(identity_id).await?;
        Ok(self.store.logs_for(identity_id).await?)
    }

    /// Delete a log; `identity_id` must own it.
    pub async fn delete_log(&self, identity_id: Uuid, log_id: Uuid) -> AccountErrorResult<()> {
        let log = self
            .store
            .find_log(log_id)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("reading log {log_id}")))?;

        if log.identity_id != identity_id {
            debug!("Delete of log {} rejected: owner mismatch", log_id);
            return Err(AccountError::unauthorized());
        }

        self.store.delete_log(log_id).await?;
        info!("Deleted reading log {} of {}", log_id, identity_id);
        Ok(())
    }

    // Log operations act for a token subject, so an unknown one is unauthorized
    async fn require_identity(&self, identity_id: Uuid) -> AccountErrorResult<()> {
        if self.store.find_by_id(identity_id).await?.is_none() {
            debug!("Log access rejected: unknown identity {}", identity_id);
            return Err(AccountError::unauthorized());
        }
        Ok(())
    }
}
