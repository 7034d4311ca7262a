//! Shared test doubles for domain services.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, CredentialRecord, IdeaPersistenceError,
    IdeaRepository,
};
use crate::domain::{Account, AccountId, Email, Idea, IdeaContent, IdeaId, Owner, SessionToken};

#[derive(Default)]
struct StoreState {
    ideas: Vec<Idea>,
    next_failure: Option<IdeaPersistenceError>,
}

/// In-memory [`IdeaRepository`] mirroring the store's scoping semantics.
///
/// Keeps ideas in insertion order; listings are returned newest first, the
/// same contract the Diesel adapter provides via `ORDER BY created_at DESC`.
#[derive(Default)]
pub struct InMemoryIdeaRepository {
    state: Mutex<StoreState>,
}

impl InMemoryIdeaRepository {
    /// Arrange the next operation to fail with the given error.
    pub fn fail_with(&self, error: IdeaPersistenceError) {
        self.state.lock().expect("state lock").next_failure = Some(error);
    }

    /// Snapshot of every stored idea regardless of owner.
    pub fn all(&self) -> Vec<Idea> {
        self.state.lock().expect("state lock").ideas.clone()
    }

    fn take_failure(state: &mut StoreState) -> Result<(), IdeaPersistenceError> {
        match state.next_failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn owner_matches(idea: &Idea, owner: &Owner) -> bool {
    idea.owner() == owner
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn insert(
        &self,
        content: &IdeaContent,
        owner: &Owner,
    ) -> Result<Idea, IdeaPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::take_failure(&mut state)?;
        let idea = Idea::new(
            IdeaId::random(),
            content.clone(),
            owner.clone(),
            Utc::now(),
        );
        state.ideas.push(idea.clone());
        Ok(idea)
    }

    async fn list_by_owner(&self, owner: &Owner) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::take_failure(&mut state)?;
        let mut matches: Vec<Idea> = state
            .ideas
            .iter()
            .filter(|idea| owner_matches(idea, owner))
            .cloned()
            .collect();
        matches.reverse();
        Ok(matches)
    }

    async fn delete(&self, id: &IdeaId, owner: &Owner) -> Result<bool, IdeaPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::take_failure(&mut state)?;
        let before = state.ideas.len();
        state
            .ideas
            .retain(|idea| !(idea.id() == id && owner_matches(idea, owner)));
        Ok(state.ideas.len() < before)
    }

    async fn reassign_session(
        &self,
        session: &SessionToken,
        account: &AccountId,
    ) -> Result<u64, IdeaPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::take_failure(&mut state)?;
        let mut moved = 0;
        for idea in &mut state.ideas {
            if idea.owner() == &Owner::Session(session.clone()) {
                *idea = Idea::new(
                    *idea.id(),
                    idea.content().clone(),
                    Owner::Account(*account),
                    idea.created_at(),
                );
                moved += 1;
            }
        }
        Ok(moved)
    }
}

/// In-memory [`AccountRepository`] with unique-email enforcement.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    records: Mutex<Vec<CredentialRecord>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, AccountPersistenceError> {
        let mut records = self.records.lock().expect("records lock");
        if records
            .iter()
            .any(|record| record.account.email() == email)
        {
            return Err(AccountPersistenceError::duplicate_email(email.as_ref()));
        }
        let account = Account::new(AccountId::random(), email.clone(), Utc::now());
        records.push(CredentialRecord {
            account: account.clone(),
            password_hash: password_hash.to_owned(),
        });
        Ok(account)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, AccountPersistenceError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .find(|record| record.account.email() == email)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let records = self.records.lock().expect("records lock");
        Ok(records
            .iter()
            .map(|record| &record.account)
            .find(|account| account.id() == id)
            .cloned())
    }
}
