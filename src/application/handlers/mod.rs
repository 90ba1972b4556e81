//! Use-case handlers: one per engine operation.

pub mod classes;
pub mod issue_pass;
pub mod upload_roster;

pub use classes::{
    DeleteClassHandler, EnsureClassCommand, EnsureClassHandler, ListClassesHandler,
};
pub use issue_pass::{ApplePassOutcome, IssuePassCommand, IssuePassHandler, IssuePassResult};
pub use upload_roster::{RosterRow, UploadRosterCommand, UploadRosterHandler, UploadRosterResult};
