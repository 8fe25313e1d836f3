use quiz_core::model::UserId;

/// Capability that answers "who is attempting the quiz right now".
///
/// Replaces any host-specific auth subscription mechanism: the engine only
/// ever asks for the current identity at attempt start. No identity means
/// the finished record cannot be persisted, local scoring still happens.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<UserId>;
}

/// Identity pinned at construction, for tests and single-user hosts.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    user: Option<UserId>,
}

impl FixedIdentity {
    /// An identity provider that always reports the given user.
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            user: Some(UserId::new(id)),
        }
    }

    /// An identity provider with no signed-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_identity(&self) -> Option<UserId> {
        self.user.clone()
    }
}
