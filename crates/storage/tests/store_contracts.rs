use std::collections::BTreeMap;

use mt_core::auth::{Actor, Role};
use mt_core::catalog::MilestoneKey;
use mt_core::contract::{
    Contract, ContractStatus, Financing, Project, ServiceType, TenderType, ValidationError,
};
use mt_core::execution::ExecutionData;
use mt_core::ids::{ContractId, ProjectId};
use mt_storage::{ContractFilter, MemoryStore, StoreError};
use time::macros::date;

fn editor() -> Actor {
    Actor::new("a.mbarga", Role::Editor)
}

fn project(id: &str) -> Project {
    Project {
        id: ProjectId::try_new(id).unwrap(),
        label: "Programme d'équipement scolaire".to_string(),
        financing: Financing::InternalBudget,
        fiscal_year: 2024,
        created_on: date!(2024 - 01 - 08),
        signed_plan: None,
    }
}

fn contract(id: &str, project_id: &str) -> Contract {
    Contract {
        id: ContractId::try_new(id).unwrap(),
        object: "Acquisition de mobilier scolaire".to_string(),
        fiscal_year: 2024,
        project_id: ProjectId::try_new(project_id).unwrap(),
        function: "education".to_string(),
        activity: "equipement".to_string(),
        tender_type: TenderType::OpenTender,
        service_type: ServiceType::Supplies,
        planned_amount: 35_000_000,
        realized_amount: None,
        budget_line: "611-020".to_string(),
        dates_planned: BTreeMap::new(),
        dates_actual: BTreeMap::new(),
        documents: BTreeMap::new(),
        status: ContractStatus::Planned,
        unsuccessful: false,
        cancellation: None,
        appeal: None,
        process_state: None,
        execution: ExecutionData::new(),
    }
}

fn store_with_project(id: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.add_project(&editor(), project(id)).unwrap();
    store
}

#[test]
fn add_then_get_round_trips_the_whole_record() {
    let mut store = store_with_project("PRJ-01");
    let mut record = contract("M-2024-001", "PRJ-01");
    record
        .dates_planned
        .insert(MilestoneKey::SaisineCipm, date!(2024 - 02 - 01));
    let expected = record.clone();

    store.add_contract(&editor(), record).unwrap();

    let stored = store
        .get_contract(&ContractId::try_new("M-2024-001").unwrap())
        .unwrap();
    assert_eq!(stored, &expected);
}

#[test]
fn colliding_references_are_rejected() {
    let mut store = store_with_project("PRJ-01");
    store
        .add_contract(&editor(), contract("M-2024-001", "PRJ-01"))
        .unwrap();
    assert_eq!(
        store.add_contract(&editor(), contract("M-2024-001", "PRJ-01")),
        Err(StoreError::DuplicateId)
    );
    assert_eq!(store.contracts().len(), 1);
}

#[test]
fn contracts_require_an_existing_project() {
    let mut store = MemoryStore::new();
    assert_eq!(
        store.add_contract(&editor(), contract("M-2024-001", "PRJ-404")),
        Err(StoreError::UnknownProject)
    );
}

#[test]
fn invalid_records_never_enter_the_store() {
    let mut store = store_with_project("PRJ-01");
    let mut record = contract("M-2024-001", "PRJ-01");
    record.planned_amount = 0;
    assert_eq!(
        store.add_contract(&editor(), record),
        Err(StoreError::Invalid(ValidationError::NonPositiveAmount))
    );
    assert!(store.contracts().is_empty());
    assert_eq!(store.last_seq(), 1); // only the project event
}

#[test]
fn guests_cannot_write() {
    let mut store = store_with_project("PRJ-01");
    let guest = Actor::new("visiteur", Role::Guest);
    assert_eq!(
        store.add_contract(&guest, contract("M-2024-001", "PRJ-01")),
        Err(StoreError::Forbidden {
            required: Role::Editor
        })
    );
}

#[test]
fn update_replaces_exactly_one_record() {
    let mut store = store_with_project("PRJ-01");
    store
        .add_contract(&editor(), contract("M-2024-001", "PRJ-01"))
        .unwrap();
    store
        .add_contract(&editor(), contract("M-2024-002", "PRJ-01"))
        .unwrap();

    let mut replacement = contract("M-2024-001", "PRJ-01");
    replacement.object = "Acquisition de mobilier scolaire (lot 2)".to_string();
    replacement.status = ContractStatus::InProgress;
    replacement
        .dates_actual
        .insert(MilestoneKey::SaisineCipm, date!(2024 - 02 - 05));
    let expected = replacement.clone();

    store.update_contract(&editor(), replacement).unwrap();

    assert_eq!(store.contracts().len(), 2);
    let stored = store
        .get_contract(&ContractId::try_new("M-2024-001").unwrap())
        .unwrap();
    assert_eq!(stored, &expected);
    let untouched = store
        .get_contract(&ContractId::try_new("M-2024-002").unwrap())
        .unwrap();
    assert_eq!(untouched.object, "Acquisition de mobilier scolaire");
}

#[test]
fn updating_a_missing_id_is_an_explicit_error() {
    let mut store = store_with_project("PRJ-01");
    assert_eq!(
        store.update_contract(&editor(), contract("M-2024-404", "PRJ-01")),
        Err(StoreError::UnknownId)
    );
}

#[test]
fn every_write_appends_one_event() {
    let mut store = store_with_project("PRJ-01");
    let first = store
        .add_contract(&editor(), contract("M-2024-001", "PRJ-01"))
        .unwrap();
    let second = store
        .update_contract(&editor(), contract("M-2024-001", "PRJ-01"))
        .unwrap();

    assert_eq!(first + 1, second);
    assert_eq!(store.last_seq(), second);

    let tail = store.events_since(first);
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].kind, "contract_updated");
    assert_eq!(tail[0].entity_id, "M-2024-001");
    assert!(store.events_since(second).is_empty());

    let all = store.events_since(0);
    assert!(all.windows(2).all(|pair| pair[0].seq + 1 == pair[1].seq));
}

#[test]
fn filters_narrow_by_year_project_and_function() {
    let mut store = store_with_project("PRJ-01");
    store.add_project(&editor(), project("PRJ-02")).unwrap();

    store
        .add_contract(&editor(), contract("M-2024-001", "PRJ-01"))
        .unwrap();
    let mut other_function = contract("M-2024-002", "PRJ-01");
    other_function.function = "sante".to_string();
    store.add_contract(&editor(), other_function).unwrap();
    store
        .add_contract(&editor(), contract("M-2024-003", "PRJ-02"))
        .unwrap();
    let mut old = contract("M-2023-009", "PRJ-01");
    old.fiscal_year = 2023;
    store.add_contract(&editor(), old).unwrap();

    assert_eq!(
        store.filter_contracts(&ContractFilter::fiscal_year(2024)).len(),
        3
    );
    assert_eq!(
        store
            .filter_contracts(&ContractFilter::for_project(
                2024,
                ProjectId::try_new("PRJ-01").unwrap()
            ))
            .len(),
        2
    );

    let mut by_function = ContractFilter::fiscal_year(2024);
    by_function.function = Some("sante".to_string());
    let matches = store.filter_contracts(&by_function);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id.as_str(), "M-2024-002");
}
