pub mod config;
pub mod logging;

pub mod bar;
pub mod console;
pub mod error;
pub mod output;

pub use console::{Console, ConsoleSession, Message, ProgressWriter};
pub use error::ContractViolation;
pub use output::{Captured, Output};
