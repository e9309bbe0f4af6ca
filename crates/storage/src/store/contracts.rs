#![forbid(unsafe_code)]

use super::*;
use mt_core::ids::ContractId;
use serde_json::json;

impl MemoryStore {
    /// Appends a fully-formed record. Colliding references are rejected
    /// rather than silently shadowing the first match on later updates.
    pub fn add_contract(&mut self, actor: &Actor, contract: Contract) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        contract.validate()?;
        if self.get_project(&contract.project_id).is_none() {
            return Err(StoreError::UnknownProject);
        }
        if self.contracts.iter().any(|c| c.id == contract.id) {
            return Err(StoreError::DuplicateId);
        }
        let seq = self.emit(
            "contract_added",
            contract.id.as_str().to_string(),
            json!({
                "fiscal_year": contract.fiscal_year,
                "project": contract.project_id.as_str(),
                "by": actor.name,
            }),
        );
        self.contracts.push(contract);
        Ok(seq)
    }

    /// Whole-record replace by id. A missing id is an explicit error, never
    /// a silent no-op. The execution sub-record only changes once the
    /// replacement value passes the signature gate.
    pub fn update_contract(
        &mut self,
        actor: &Actor,
        contract: Contract,
    ) -> Result<i64, StoreError> {
        self.require_writer(actor)?;
        contract.validate()?;
        if self.get_project(&contract.project_id).is_none() {
            return Err(StoreError::UnknownProject);
        }
        let Some(index) = self.contracts.iter().position(|c| c.id == contract.id) else {
            return Err(StoreError::UnknownId);
        };
        if !contract.is_execution_unlocked()
            && contract.execution != self.contracts[index].execution
        {
            return Err(StoreError::ExecutionLocked);
        }
        let seq = self.emit(
            "contract_updated",
            contract.id.as_str().to_string(),
            json!({ "by": actor.name }),
        );
        self.contracts[index] = contract;
        Ok(seq)
    }

    pub fn get_contract(&self, id: &ContractId) -> Option<&Contract> {
        self.contracts.iter().find(|c| &c.id == id)
    }

    pub fn filter_contracts(&self, filter: &ContractFilter) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| filter.matches(c))
            .collect()
    }
}
