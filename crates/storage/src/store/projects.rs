#![forbid(unsafe_code)]

use super::*;
use mt_core::contract::Attachment;
use mt_core::ids::ProjectId;
use serde_json::json;

impl MemoryStore {
    pub fn add_project(&mut self, actor: &Actor, project: Project) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        project.validate()?;
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(StoreError::DuplicateId);
        }
        let seq = self.emit(
            "project_added",
            project.id.as_str().to_string(),
            json!({
                "fiscal_year": project.fiscal_year,
                "by": actor.name,
            }),
        );
        self.projects.push(project);
        Ok(seq)
    }

    /// Whole-record replace. Fiscal year, financing source and creation
    /// date are frozen at creation; only the label and the signed plan may
    /// differ from the stored record.
    pub fn update_project(&mut self, actor: &Actor, project: Project) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        project.validate()?;
        let Some(index) = self.projects.iter().position(|p| p.id == project.id) else {
            return Err(StoreError::UnknownId);
        };
        let stored = &self.projects[index];
        if stored.fiscal_year != project.fiscal_year {
            return Err(StoreError::ImmutableField("fiscal_year"));
        }
        if stored.financing != project.financing {
            return Err(StoreError::ImmutableField("financing"));
        }
        if stored.created_on != project.created_on {
            return Err(StoreError::ImmutableField("created_on"));
        }
        let seq = self.emit(
            "project_updated",
            project.id.as_str().to_string(),
            json!({ "by": actor.name }),
        );
        self.projects[index] = project;
        Ok(seq)
    }

    /// Convenience for the one post-creation edit every project gets.
    pub fn attach_signed_plan(
        &mut self,
        actor: &Actor,
        id: &ProjectId,
        plan: Attachment,
    ) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == id) else {
            return Err(StoreError::UnknownId);
        };
        project.signed_plan = Some(plan);
        Ok(self.emit(
            "project_updated",
            id.as_str().to_string(),
            json!({ "signed_plan": true, "by": actor.name }),
        ))
    }

    pub fn get_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }
}
