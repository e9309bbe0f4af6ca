#![forbid(unsafe_code)]

use super::*;
use mt_core::contract::Attachment;
use serde_json::json;

/// Application user; `name` is the natural key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub role: Role,
}

/// Template or regulation stored in the document library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryDocument {
    pub id: String,
    pub title: String,
    pub category: String,
    pub attachment: Option<Attachment>,
}

/// One entry of the functions taxonomy used to classify contracts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionEntry {
    pub code: String,
    pub label: String,
    pub activities: Vec<String>,
}

impl MemoryStore {
    pub fn add_user(&mut self, actor: &Actor, user: User) -> Result<i64, StoreError> {
        self.require_admin(actor)?;
        if user.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("user name must not be empty"));
        }
        if self.users.iter().any(|u| u.name == user.name) {
            return Err(StoreError::DuplicateId);
        }
        let seq = self.emit(
            "user_added",
            user.name.clone(),
            json!({ "role": user.role.as_str(), "by": actor.name }),
        );
        self.users.push(user);
        Ok(seq)
    }

    pub fn update_user(&mut self, actor: &Actor, user: User) -> Result<i64, StoreError> {
        self.require_admin(actor)?;
        let Some(index) = self.users.iter().position(|u| u.name == user.name) else {
            return Err(StoreError::UnknownId);
        };
        let seq = self.emit(
            "user_updated",
            user.name.clone(),
            json!({ "role": user.role.as_str(), "by": actor.name }),
        );
        self.users[index] = user;
        Ok(seq)
    }

    pub fn delete_user(&mut self, actor: &Actor, name: &str) -> Result<i64, StoreError> {
        self.require_admin(actor)?;
        let Some(index) = self.users.iter().position(|u| u.name == name) else {
            return Err(StoreError::UnknownId);
        };
        self.users.remove(index);
        Ok(self.emit("user_deleted", name.to_string(), json!({ "by": actor.name })))
    }

    pub fn add_library_document(
        &mut self,
        actor: &Actor,
        document: LibraryDocument,
    ) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        if document.id.trim().is_empty() {
            return Err(StoreError::InvalidInput("document id must not be empty"));
        }
        if document.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("document title must not be empty"));
        }
        if self.library.iter().any(|d| d.id == document.id) {
            return Err(StoreError::DuplicateId);
        }
        let seq = self.emit(
            "library_document_added",
            document.id.clone(),
            json!({ "category": document.category, "by": actor.name }),
        );
        self.library.push(document);
        Ok(seq)
    }

    pub fn update_library_document(
        &mut self,
        actor: &Actor,
        document: LibraryDocument,
    ) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        let Some(index) = self.library.iter().position(|d| d.id == document.id) else {
            return Err(StoreError::UnknownId);
        };
        let seq = self.emit(
            "library_document_updated",
            document.id.clone(),
            json!({ "by": actor.name }),
        );
        self.library[index] = document;
        Ok(seq)
    }

    pub fn delete_library_document(&mut self, actor: &Actor, id: &str) -> Result<i64, StoreError> {
        self.require_admin(actor)?;
        let Some(index) = self.library.iter().position(|d| d.id == id) else {
            return Err(StoreError::UnknownId);
        };
        self.library.remove(index);
        Ok(self.emit(
            "library_document_deleted",
            id.to_string(),
            json!({ "by": actor.name }),
        ))
    }

    pub fn add_function(&mut self, actor: &Actor, entry: FunctionEntry) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        if entry.code.trim().is_empty() {
            return Err(StoreError::InvalidInput("function code must not be empty"));
        }
        if entry.label.trim().is_empty() {
            return Err(StoreError::InvalidInput("function label must not be empty"));
        }
        if self.functions.iter().any(|f| f.code == entry.code) {
            return Err(StoreError::DuplicateId);
        }
        let seq = self.emit(
            "function_added",
            entry.code.clone(),
            json!({ "label": entry.label, "by": actor.name }),
        );
        self.functions.push(entry);
        Ok(seq)
    }

    pub fn update_function(
        &mut self,
        actor: &Actor,
        entry: FunctionEntry,
    ) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        let Some(index) = self.functions.iter().position(|f| f.code == entry.code) else {
            return Err(StoreError::UnknownId);
        };
        let seq = self.emit(
            "function_updated",
            entry.code.clone(),
            json!({ "by": actor.name }),
        );
        self.functions[index] = entry;
        Ok(seq)
    }

    pub fn delete_function(&mut self, actor: &Actor, code: &str) -> Result<i64, StoreError> {
        self.require_admin(actor)?;
        let Some(index) = self.functions.iter().position(|f| f.code == code) else {
            return Err(StoreError::UnknownId);
        };
        self.functions.remove(index);
        Ok(self.emit(
            "function_deleted",
            code.to_string(),
            json!({ "by": actor.name }),
        ))
    }
}
