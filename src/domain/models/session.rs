use serde::Serialize;

/// Authenticated principal for the current request, as asserted by the
/// identity provider. Passed explicitly down the call chain.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub is_super_admin: bool,
}

impl Session {
    pub fn new(user_id: impl Into<String>, is_super_admin: bool) -> Self {
        Self { user_id: user_id.into(), is_super_admin }
    }
}
