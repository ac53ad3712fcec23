//! Change reporting, mesh rules and the shared auto-fixes.

pub mod autofix;
pub mod report;
pub mod rules;

pub use report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog, ChangeSeverity};
