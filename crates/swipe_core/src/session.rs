/// Signed-in user as returned by the auth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Explicit session context. Consumers receive it through `AppState`; there is
/// no global store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionContext {
    user: Option<User>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a session from previously persisted state.
    pub fn restored(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Clears the session. Returns false if nobody was signed in.
    pub fn logout(&mut self) -> bool {
        self.user.take().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
