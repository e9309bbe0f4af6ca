#![forbid(unsafe_code)]

use serde::Deserialize;

use mt_core::auth::{Actor, Role};
use mt_storage::{FunctionEntry, LibraryDocument, MemoryStore, StoreError, User};

/// Reference-data bootstrap: the accounts, functions taxonomy and document
/// library the application starts with, loaded from a YAML file instead of
/// hardcoded lists.
#[derive(Clone, Debug, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub functions: Vec<SeedFunction>,
    #[serde(default)]
    pub library: Vec<SeedDocument>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedUser {
    pub name: String,
    pub role: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedFunction {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedError {
    Parse(String),
    UnknownRole(String),
    Store(StoreError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "seed parse failed: {message}"),
            Self::UnknownRole(role) => write!(f, "unknown role: {role}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<StoreError> for SeedError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub fn load_seed(input: &str) -> Result<Seed, SeedError> {
    serde_yaml::from_str(input).map_err(|err| SeedError::Parse(err.to_string()))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppliedSeed {
    pub users: usize,
    pub functions: usize,
    pub library: usize,
}

pub fn apply_seed(
    store: &mut MemoryStore,
    actor: &Actor,
    seed: Seed,
) -> Result<AppliedSeed, SeedError> {
    let mut applied = AppliedSeed::default();
    for user in seed.users {
        let role =
            Role::parse(&user.role).ok_or_else(|| SeedError::UnknownRole(user.role.clone()))?;
        store.add_user(
            actor,
            User {
                name: user.name,
                role,
            },
        )?;
        applied.users += 1;
    }
    for function in seed.functions {
        store.add_function(
            actor,
            FunctionEntry {
                code: function.code,
                label: function.label,
                activities: function.activities,
            },
        )?;
        applied.functions += 1;
    }
    for document in seed.library {
        store.add_library_document(
            actor,
            LibraryDocument {
                id: document.id,
                title: document.title,
                category: document.category,
                attachment: None,
            },
        )?;
        applied.library += 1;
    }
    Ok(applied)
}
