//! Request identity and idea ownership as a tagged union.

use std::fmt;

use crate::domain::account::AccountId;
use crate::domain::session::SessionToken;

/// The actor an idea belongs to, or the actor behind a request.
///
/// ## Invariants
/// - Exactly one of the two variants holds; an idea can never be owned by
///   both an account and a session, nor by neither. The storage layer lowers
///   this to a nullable column pair and re-checks the exclusivity when
///   reading rows back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// A registered account, proven by a validated bearer credential.
    Account(AccountId),
    /// An anonymous actor, identified only by its client-held token.
    Session(SessionToken),
}

impl Owner {
    /// Resolve the acting owner for a request.
    ///
    /// A validated account identity always wins; otherwise the session token
    /// identifies the actor; with neither, the request is unidentified and
    /// `None` is returned. Callers pass `account: None` both when no bearer
    /// credential was supplied and when one failed validation — the two are
    /// indistinguishable by design, so anonymous access degrades gracefully
    /// instead of hard-failing on a stale token.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AccountId, Owner, SessionToken};
    ///
    /// let session = SessionToken::new("s1").expect("valid token");
    /// let account = AccountId::random();
    ///
    /// let owner = Owner::resolve(Some(account), Some(session.clone()));
    /// assert_eq!(owner, Some(Owner::Account(account)));
    ///
    /// let owner = Owner::resolve(None, Some(session.clone()));
    /// assert_eq!(owner, Some(Owner::Session(session)));
    ///
    /// assert_eq!(Owner::resolve(None, None), None);
    /// ```
    pub fn resolve(account: Option<AccountId>, session: Option<SessionToken>) -> Option<Self> {
        account
            .map(Self::Account)
            .or_else(|| session.map(Self::Session))
    }

    /// The account identifier when this owner is an account.
    pub fn account_id(&self) -> Option<&AccountId> {
        match self {
            Self::Account(id) => Some(id),
            Self::Session(_) => None,
        }
    }

    /// The session token when this owner is anonymous.
    pub fn session_token(&self) -> Option<&SessionToken> {
        match self {
            Self::Account(_) => None,
            Self::Session(token) => Some(token),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(id) => write!(f, "account:{id}"),
            Self::Session(token) => write!(f, "session:{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn session(raw: &str) -> SessionToken {
        SessionToken::new(raw).expect("valid session token")
    }

    #[test]
    fn account_takes_precedence_over_session() {
        let account = AccountId::random();
        let resolved = Owner::resolve(Some(account), Some(session("s1")));
        assert_eq!(resolved, Some(Owner::Account(account)));
    }

    #[test]
    fn session_is_the_fallback() {
        let resolved = Owner::resolve(None, Some(session("s1")));
        assert_eq!(resolved, Some(Owner::Session(session("s1"))));
    }

    #[test]
    fn neither_means_unidentified() {
        assert_eq!(Owner::resolve(None, None), None);
    }

    #[rstest]
    #[case(Owner::Account(AccountId::random()), true)]
    #[case(Owner::Session(session("s1")), false)]
    fn accessors_match_variant(#[case] owner: Owner, #[case] is_account: bool) {
        assert_eq!(owner.account_id().is_some(), is_account);
        assert_eq!(owner.session_token().is_some(), !is_account);
    }
}
