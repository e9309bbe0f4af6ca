use mt_core::auth::{Actor, Role};
use mt_core::contract::{Attachment, Financing, Project};
use mt_core::ids::ProjectId;
use mt_storage::{MemoryStore, StoreError};
use time::macros::date;

fn editor() -> Actor {
    Actor::new("a.mbarga", Role::Editor)
}

fn project(id: &str) -> Project {
    Project {
        id: ProjectId::try_new(id).unwrap(),
        label: "Projet d'appui à la décentralisation".to_string(),
        financing: Financing::Lender {
            lender: "BIRD".to_string(),
        },
        fiscal_year: 2024,
        created_on: date!(2024 - 01 - 15),
        signed_plan: None,
    }
}

#[test]
fn add_then_get_round_trips() {
    let mut store = MemoryStore::new();
    let record = project("PRJ-01");
    store.add_project(&editor(), record.clone()).unwrap();
    assert_eq!(
        store.get_project(&ProjectId::try_new("PRJ-01").unwrap()),
        Some(&record)
    );
}

#[test]
fn duplicate_projects_are_rejected() {
    let mut store = MemoryStore::new();
    store.add_project(&editor(), project("PRJ-01")).unwrap();
    assert_eq!(
        store.add_project(&editor(), project("PRJ-01")),
        Err(StoreError::DuplicateId)
    );
}

#[test]
fn label_may_change_after_creation() {
    let mut store = MemoryStore::new();
    store.add_project(&editor(), project("PRJ-01")).unwrap();

    let mut update = project("PRJ-01");
    update.label = "Projet d'appui à la décentralisation (phase 2)".to_string();
    store.update_project(&editor(), update).unwrap();

    let stored = store
        .get_project(&ProjectId::try_new("PRJ-01").unwrap())
        .unwrap();
    assert!(stored.label.ends_with("(phase 2)"));
}

#[test]
fn fiscal_year_and_financing_are_frozen() {
    let mut store = MemoryStore::new();
    store.add_project(&editor(), project("PRJ-01")).unwrap();

    let mut update = project("PRJ-01");
    update.fiscal_year = 2025;
    assert_eq!(
        store.update_project(&editor(), update),
        Err(StoreError::ImmutableField("fiscal_year"))
    );

    let mut update = project("PRJ-01");
    update.financing = Financing::InternalBudget;
    assert_eq!(
        store.update_project(&editor(), update),
        Err(StoreError::ImmutableField("financing"))
    );
}

#[test]
fn updating_a_missing_project_is_an_explicit_error() {
    let mut store = MemoryStore::new();
    assert_eq!(
        store.update_project(&editor(), project("PRJ-404")),
        Err(StoreError::UnknownId)
    );
}

#[test]
fn signed_plan_attaches_in_place() {
    let mut store = MemoryStore::new();
    store.add_project(&editor(), project("PRJ-01")).unwrap();

    let plan = Attachment {
        name: "plan_passation_2024.pdf".to_string(),
        url: "blob:plan_passation_2024".to_string(),
        upload_date: date!(2024 - 02 - 01),
    };
    store
        .attach_signed_plan(
            &editor(),
            &ProjectId::try_new("PRJ-01").unwrap(),
            plan.clone(),
        )
        .unwrap();

    let stored = store
        .get_project(&ProjectId::try_new("PRJ-01").unwrap())
        .unwrap();
    assert_eq!(stored.signed_plan, Some(plan));

    assert_eq!(
        store.attach_signed_plan(
            &editor(),
            &ProjectId::try_new("PRJ-404").unwrap(),
            Attachment {
                name: "x.pdf".to_string(),
                url: "blob:x".to_string(),
                upload_date: date!(2024 - 02 - 01),
            },
        ),
        Err(StoreError::UnknownId)
    );
}
