//! Injected session capability: bearer token, acting admin identity, and
//! the unauthorized hook.
//!
//! Centralizing these here keeps token handling out of the individual
//! components; everything that talks to the API receives its credentials
//! through [`MailcastClient`](crate::MailcastClient), which holds exactly
//! one `Session`.

use std::fmt;
use std::sync::Arc;

/// Callback invoked when the API answers 401.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Authenticated session context shared by every API call.
#[derive(Clone)]
pub struct Session {
    token: String,
    admin_id: String,
    admin_name: String,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl Session {
    /// Create a session from a bearer token and the acting admin identity.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        admin_id: impl Into<String>,
        admin_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            admin_id: admin_id.into(),
            admin_name: admin_name.into(),
            on_unauthorized: None,
        }
    }

    /// Install a hook fired once per 401 response, before the error is
    /// surfaced to the caller. The embedder typically clears stored
    /// credentials or navigates to a login flow here.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Identifier of the acting admin, stamped into create requests.
    #[must_use]
    pub fn admin_id(&self) -> &str {
        &self.admin_id
    }

    /// Display name of the acting admin, stamped into create requests.
    #[must_use]
    pub fn admin_name(&self) -> &str {
        &self.admin_name
    }

    pub(crate) fn notify_unauthorized(&self) {
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("admin_id", &self.admin_id)
            .field("admin_name", &self.admin_name)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
