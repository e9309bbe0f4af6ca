#![forbid(unsafe_code)]

mod contracts;
mod error;
mod events;
mod projects;
mod reference;
mod requests;

pub use error::StoreError;
pub use events::StoreEvent;
pub use reference::{FunctionEntry, LibraryDocument, User};
pub use requests::ContractFilter;

use mt_core::auth::{Actor, Role};
use mt_core::contract::{Contract, Project};

/// Process-wide single source of truth. Every mutation is a synchronous
/// whole-record replace; views observe changes by polling `events_since`
/// past their last seen sequence.
///
/// Known limitation: last-write-wins at replace-by-id granularity. Two
/// drafts of the same record opened side by side lose one side's edits on
/// save; acceptable for the single-user, single-process scope.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contracts: Vec<Contract>,
    projects: Vec<Project>,
    users: Vec<User>,
    library: Vec<LibraryDocument>,
    functions: Vec<FunctionEntry>,
    events: Vec<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn library_documents(&self) -> &[LibraryDocument] {
        &self.library
    }

    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }

    fn require_writer(&self, actor: &Actor) -> Result<(), StoreError> {
        if actor.role.can_write() {
            Ok(())
        } else {
            Err(StoreError::Forbidden {
                required: Role::Editor,
            })
        }
    }

    fn require_admin(&self, actor: &Actor) -> Result<(), StoreError> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(StoreError::Forbidden {
                required: Role::Admin,
            })
        }
    }
}

fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis().min(i64::MAX as u128) as i64)
        .unwrap_or(0)
}
