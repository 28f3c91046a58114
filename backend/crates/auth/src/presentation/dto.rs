//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Query parameters the provider sends to the callback
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code (present on success)
    pub code: Option<String>,
    /// CSRF state echoed back
    pub state: Option<String>,
    /// Error reason (present when the user denies consent)
    pub error: Option<String>,
}
