use vaxsched_core::Role;

/// A stored patient or caregiver. Loaded on login and kept by the shell as
/// the current identity until logout.
#[derive(Clone)]
pub struct Account {
    /// Canonical spelling as first registered; lookups ignore case.
    pub username: String,
    pub role: Role,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

// Salt and hash stay out of logs.
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
