//! Single-user authorization guard.

use cartera_shared::{AppError, AppResult};

/// Allows exactly one Telegram user id to issue commands.
#[derive(Debug, Clone, Copy)]
pub struct Guard {
    allowed_user_id: i64,
}

impl Guard {
    /// Creates a guard for the given user id.
    #[must_use]
    pub const fn new(allowed_user_id: i64) -> Self {
        Self { allowed_user_id }
    }

    /// Checks that `user_id` is the allow-listed user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for any other user.
    pub fn check(&self, user_id: i64) -> AppResult<()> {
        if user_id == self.allowed_user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "user {user_id} is not allowed to use this bot"
            )))
        }
    }
}
