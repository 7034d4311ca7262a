//! Registration, login, and profile use-cases.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, AuthGrant, AuthService, OwnershipMigration,
    PasswordHashError, PasswordService, TokenIssueError, TokenService,
};
use crate::domain::{Account, AccountId, AuthCredentials, Error, SessionToken};

/// Message returned for any credential failure at login.
///
/// Identical for an unknown email and a wrong password so responses cannot
/// be used to enumerate accounts.
const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// Production implementation of [`AuthService`].
///
/// Registration and login both run ownership migration for a presented
/// session token *before* the credential is issued, so a client that saves
/// the token and immediately lists its ideas sees the migrated records.
#[derive(Clone)]
pub struct AccountAuthService {
    accounts: Arc<dyn AccountRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    migration: Arc<dyn OwnershipMigration>,
}

impl AccountAuthService {
    /// Create a new service from its collaborating ports.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        migration: Arc<dyn OwnershipMigration>,
    ) -> Self {
        Self {
            accounts,
            passwords,
            tokens,
            migration,
        }
    }

    async fn migrate_if_present(
        &self,
        session: Option<&SessionToken>,
        account: &AccountId,
    ) -> Result<(), Error> {
        if let Some(session) = session {
            self.migration.migrate(session, account).await?;
        }
        Ok(())
    }

    fn issue_grant(&self, account: Account) -> Result<AuthGrant, Error> {
        let token = self
            .tokens
            .issue(account.id())
            .map_err(map_token_error)?;
        Ok(AuthGrant { token, account })
    }
}

fn map_account_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => Error::service_unavailable(message),
        AccountPersistenceError::Query { message } => Error::internal(message),
        AccountPersistenceError::DuplicateEmail { .. } => {
            Error::conflict("an account with this email already exists")
        }
    }
}

fn map_password_error(error: PasswordHashError) -> Error {
    match error {
        PasswordHashError::Hashing { message } => Error::internal(message),
    }
}

fn map_token_error(error: TokenIssueError) -> Error {
    match error {
        TokenIssueError::Signing { message } => Error::internal(message),
    }
}

#[async_trait]
impl AuthService for AccountAuthService {
    async fn register(
        &self,
        credentials: &AuthCredentials,
        session: Option<&SessionToken>,
    ) -> Result<AuthGrant, Error> {
        let password_hash = self
            .passwords
            .hash(credentials.password())
            .map_err(map_password_error)?;
        let account = self
            .accounts
            .insert(credentials.email(), &password_hash)
            .await
            .map_err(map_account_error)?;
        self.migrate_if_present(session, account.id()).await?;
        self.issue_grant(account)
    }

    async fn login(
        &self,
        credentials: &AuthCredentials,
        session: Option<&SessionToken>,
    ) -> Result<AuthGrant, Error> {
        let record = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_account_error)?;
        let Some(record) = record else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };
        if !self
            .passwords
            .verify(credentials.password(), &record.password_hash)
        {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }
        self.migrate_if_present(session, record.account.id())
            .await?;
        self.issue_grant(record.account)
    }

    async fn profile(&self, account: &AccountId) -> Result<Account, Error> {
        let found = self
            .accounts
            .find_by_id(account)
            .await
            .map_err(map_account_error)?;
        // A valid credential whose account has since disappeared is treated
        // as unauthenticated, not as a missing resource.
        found.ok_or_else(|| Error::unauthorized("authentication required"))
    }
}

#[cfg(test)]
mod tests {
    //! Authentication flows against stub ports and the in-memory idea store.
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::domain::ports::{CredentialRecord, IdeaRepository};
    use crate::domain::test_support::InMemoryIdeaRepository;
    use crate::domain::{Email, ErrorCode, IdeaContent, MigrationService, Owner};

    #[derive(Default)]
    struct StubAccountState {
        records: Vec<CredentialRecord>,
        insert_failure: Option<AccountPersistenceError>,
        find_failure: Option<AccountPersistenceError>,
    }

    #[derive(Default)]
    struct StubAccountRepository {
        state: Mutex<StubAccountState>,
    }

    impl StubAccountRepository {
        fn with_account(email: &str, password_hash: &str) -> (Self, AccountId) {
            let id = AccountId::random();
            let record = CredentialRecord {
                account: Account::new(
                    id,
                    Email::new(email).expect("valid email"),
                    Utc::now(),
                ),
                password_hash: password_hash.to_owned(),
            };
            let repo = Self {
                state: Mutex::new(StubAccountState {
                    records: vec![record],
                    ..StubAccountState::default()
                }),
            };
            (repo, id)
        }

        fn set_insert_failure(&self, failure: AccountPersistenceError) {
            self.state.lock().expect("state lock").insert_failure = Some(failure);
        }

        fn set_find_failure(&self, failure: AccountPersistenceError) {
            self.state.lock().expect("state lock").find_failure = Some(failure);
        }
    }

    #[async_trait]
    impl AccountRepository for StubAccountRepository {
        async fn insert(
            &self,
            email: &Email,
            password_hash: &str,
        ) -> Result<Account, AccountPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.insert_failure.take() {
                return Err(failure);
            }
            if state
                .records
                .iter()
                .any(|record| record.account.email() == email)
            {
                return Err(AccountPersistenceError::duplicate_email(email.as_ref()));
            }
            let account = Account::new(AccountId::random(), email.clone(), Utc::now());
            state.records.push(CredentialRecord {
                account: account.clone(),
                password_hash: password_hash.to_owned(),
            });
            Ok(account)
        }

        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<CredentialRecord>, AccountPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.find_failure.take() {
                return Err(failure);
            }
            Ok(state
                .records
                .iter()
                .find(|record| record.account.email() == email)
                .cloned())
        }

        async fn find_by_id(
            &self,
            id: &AccountId,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            let state = self.state.lock().expect("state lock");
            Ok(state
                .records
                .iter()
                .map(|record| &record.account)
                .find(|account| account.id() == id)
                .cloned())
        }
    }

    struct StubPasswordService;

    impl PasswordService for StubPasswordService {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, password_hash: &str) -> bool {
            password_hash == format!("hashed:{password}")
        }
    }

    struct StubTokenService;

    impl TokenService for StubTokenService {
        fn issue(&self, account: &AccountId) -> Result<String, TokenIssueError> {
            Ok(format!("token-for-{account}"))
        }

        fn validate(&self, token: &str) -> Option<AccountId> {
            token
                .strip_prefix("token-for-")
                .and_then(|raw| raw.parse().ok())
                .map(AccountId::from_uuid)
        }
    }

    #[derive(Default)]
    struct CountingMigration {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OwnershipMigration for CountingMigration {
        async fn migrate(
            &self,
            _session: &SessionToken,
            _account: &AccountId,
        ) -> Result<u64, Error> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(0)
        }
    }

    fn credentials(email: &str, password: &str) -> AuthCredentials {
        AuthCredentials::try_from_parts(email, password).expect("valid test credentials")
    }

    fn session(raw: &str) -> SessionToken {
        SessionToken::new(raw).expect("valid session token")
    }

    fn service_with(
        accounts: Arc<StubAccountRepository>,
        migration: Arc<dyn OwnershipMigration>,
    ) -> AccountAuthService {
        AccountAuthService::new(
            accounts,
            Arc::new(StubPasswordService),
            Arc::new(StubTokenService),
            migration,
        )
    }

    #[tokio::test]
    async fn register_creates_an_account_and_issues_a_token() {
        let accounts = Arc::new(StubAccountRepository::default());
        let service = service_with(accounts, Arc::new(CountingMigration::default()));

        let grant = service
            .register(&credentials("new@example.com", "secret1"), None)
            .await
            .expect("registration succeeds");

        assert_eq!(grant.account.email().as_ref(), "new@example.com");
        assert_eq!(grant.token, format!("token-for-{}", grant.account.id()));
    }

    #[tokio::test]
    async fn register_rejects_a_duplicate_email() {
        let (accounts, _) = StubAccountRepository::with_account("taken@example.com", "hashed:pw");
        let service = service_with(Arc::new(accounts), Arc::new(CountingMigration::default()));

        let err = service
            .register(&credentials("taken@example.com", "secret1"), None)
            .await
            .expect_err("duplicate email must fail");

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn register_without_a_session_skips_migration() {
        let accounts = Arc::new(StubAccountRepository::default());
        let migration = Arc::new(CountingMigration::default());
        let service = service_with(accounts, migration.clone());

        service
            .register(&credentials("new@example.com", "secret1"), None)
            .await
            .expect("registration succeeds");

        assert_eq!(migration.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn register_with_a_session_claims_its_ideas() {
        // The full handoff: capture anonymously, register with the session
        // header, and the account ends up owning the idea.
        let ideas = Arc::new(InMemoryIdeaRepository::default());
        let anonymous = Owner::Session(session("s1"));
        ideas
            .insert(
                &IdeaContent::new("Launch v2").expect("valid content"),
                &anonymous,
            )
            .await
            .expect("anonymous capture");

        let accounts = Arc::new(StubAccountRepository::default());
        let service = service_with(
            accounts,
            Arc::new(MigrationService::new(ideas.clone())),
        );

        let grant = service
            .register(&credentials("new@example.com", "secret1"), Some(&session("s1")))
            .await
            .expect("registration succeeds");

        let claimed = ideas
            .list_by_owner(&Owner::Account(*grant.account.id()))
            .await
            .expect("list account ideas");
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].content().as_ref(), "Launch v2");
        let leftover = ideas
            .list_by_owner(&anonymous)
            .await
            .expect("list session ideas");
        assert!(leftover.is_empty());
    }

    #[tokio::test]
    async fn login_succeeds_with_the_right_password() {
        let (accounts, id) =
            StubAccountRepository::with_account("user@example.com", "hashed:secret1");
        let service = service_with(Arc::new(accounts), Arc::new(CountingMigration::default()));

        let grant = service
            .login(&credentials("user@example.com", "secret1"), None)
            .await
            .expect("login succeeds");

        assert_eq!(grant.account.id(), &id);
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let (accounts, _) =
            StubAccountRepository::with_account("user@example.com", "hashed:secret1");
        let service = service_with(Arc::new(accounts), Arc::new(CountingMigration::default()));

        let unknown = service
            .login(&credentials("stranger@example.com", "secret1"), None)
            .await
            .expect_err("unknown email must fail");
        let wrong = service
            .login(&credentials("user@example.com", "not-the-password"), None)
            .await
            .expect_err("wrong password must fail");

        assert_eq!(unknown.code, ErrorCode::Unauthorized);
        assert_eq!(wrong.code, ErrorCode::Unauthorized);
        // Indistinguishable on purpose: no account enumeration through
        // differing messages.
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn login_with_a_session_runs_migration() {
        let (accounts, _) =
            StubAccountRepository::with_account("user@example.com", "hashed:secret1");
        let migration = Arc::new(CountingMigration::default());
        let service = service_with(Arc::new(accounts), migration.clone());

        service
            .login(
                &credentials("user@example.com", "secret1"),
                Some(&session("s1")),
            )
            .await
            .expect("login succeeds");

        assert_eq!(migration.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn failed_login_does_not_migrate() {
        let (accounts, _) =
            StubAccountRepository::with_account("user@example.com", "hashed:secret1");
        let migration = Arc::new(CountingMigration::default());
        let service = service_with(Arc::new(accounts), migration.clone());

        let _ = service
            .login(
                &credentials("user@example.com", "wrong-password"),
                Some(&session("s1")),
            )
            .await
            .expect_err("wrong password must fail");

        assert_eq!(migration.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn profile_returns_the_stored_account() {
        let (accounts, id) =
            StubAccountRepository::with_account("user@example.com", "hashed:secret1");
        let service = service_with(Arc::new(accounts), Arc::new(CountingMigration::default()));

        let account = service.profile(&id).await.expect("profile succeeds");
        assert_eq!(account.email().as_ref(), "user@example.com");
    }

    #[tokio::test]
    async fn profile_of_a_vanished_account_is_unauthenticated() {
        let accounts = Arc::new(StubAccountRepository::default());
        let service = service_with(accounts, Arc::new(CountingMigration::default()));

        let err = service
            .profile(&AccountId::random())
            .await
            .expect_err("missing account must fail");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn register_maps_connection_failures_to_service_unavailable() {
        let accounts = Arc::new(StubAccountRepository::default());
        accounts.set_insert_failure(AccountPersistenceError::connection("pool exhausted"));
        let service = service_with(accounts, Arc::new(CountingMigration::default()));

        let err = service
            .register(&credentials("new@example.com", "secret1"), None)
            .await
            .expect_err("connection failure should surface");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn login_maps_query_failures_to_internal() {
        let accounts = Arc::new(StubAccountRepository::default());
        accounts.set_find_failure(AccountPersistenceError::query("relation missing"));
        let service = service_with(accounts, Arc::new(CountingMigration::default()));

        let err = service
            .login(&credentials("user@example.com", "secret1"), None)
            .await
            .expect_err("query failure should surface");
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
