#![forbid(unsafe_code)]

use mt_core::contract::Contract;
use mt_core::ids::ProjectId;

/// Filter criteria for the contract sets the KPI layer consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractFilter {
    pub fiscal_year: u16,
    pub project_id: Option<ProjectId>,
    pub function: Option<String>,
}

impl ContractFilter {
    pub fn fiscal_year(year: u16) -> Self {
        Self {
            fiscal_year: year,
            project_id: None,
            function: None,
        }
    }

    pub fn for_project(year: u16, project_id: ProjectId) -> Self {
        Self {
            fiscal_year: year,
            project_id: Some(project_id),
            function: None,
        }
    }

    pub(crate) fn matches(&self, contract: &Contract) -> bool {
        contract.fiscal_year == self.fiscal_year
            && self
                .project_id
                .as_ref()
                .is_none_or(|project| &contract.project_id == project)
            && self
                .function
                .as_deref()
                .is_none_or(|function| contract.function == function)
    }
}
