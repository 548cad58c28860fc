//! Contract violations: caller misuse that is never recovered from.
//!
//! Public entry points on [`Console`](crate::Console) panic with these messages;
//! `try_*` variants hand them back so the precondition can be checked first.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `init_bar` while a bar is still active.
    #[error("progress bar already active")]
    BarAlreadyActive,
    /// `start` called on a console whose coordinator is already running (or has run).
    #[error("console already started")]
    AlreadyStarted,
}
