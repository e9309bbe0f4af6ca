#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::Deserialize;
use time::Date;

use mt_core::auth::Actor;
use mt_core::catalog::MilestoneKey;
use mt_core::contract::{Contract, ContractStatus, ServiceType, TenderType};
use mt_core::dates::parse_iso;
use mt_core::execution::ExecutionData;
use mt_core::ids::{ContractId, ProjectId};
use mt_storage::{MemoryStore, StoreError};

/// Raw date-cell content as the spreadsheet reader hands it over: an Excel
/// serial number or a text cell.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum DateCell {
    Serial(f64),
    Text(String),
}

/// One spreadsheet row, already keyed by the reader: scalar contract
/// columns plus the planned-date columns keyed by milestone wire name.
#[derive(Clone, Debug, Deserialize)]
pub struct ImportRow {
    pub reference: String,
    pub object: String,
    pub fiscal_year: u16,
    pub project: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub activity: String,
    pub tender_type: String,
    pub service_type: String,
    pub planned_amount: i64,
    #[serde(default)]
    pub budget_line: String,
    #[serde(default)]
    pub planned: BTreeMap<String, DateCell>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportError {
    BadReference(&'static str),
    BadProject(&'static str),
    UnknownMilestone(String),
    BadDate(String),
    BadSerial(f64),
    UnknownTenderType(String),
    UnknownServiceType(String),
    Store(StoreError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadReference(message) => write!(f, "reference: {message}"),
            Self::BadProject(message) => write!(f, "project: {message}"),
            Self::UnknownMilestone(name) => write!(f, "unknown milestone column: {name}"),
            Self::BadDate(value) => write!(f, "date cell must be YYYY-MM-DD: {value}"),
            Self::BadSerial(value) => write!(f, "date serial out of range: {value}"),
            Self::UnknownTenderType(value) => write!(f, "unknown tender type: {value}"),
            Self::UnknownServiceType(value) => write!(f, "unknown service type: {value}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Excel stores dates as days since 1899-12-30 (the epoch already folds in
/// the historical two-day correction). Fractional time parts are dropped.
pub fn serial_to_date(serial: f64) -> Result<Date, ImportError> {
    if !serial.is_finite() {
        return Err(ImportError::BadSerial(serial));
    }
    let days = serial.trunc();
    // Serial 1 is 1899-12-31; cap at year ~2500 to catch garbage cells.
    if !(1.0..=219_146.0).contains(&days) {
        return Err(ImportError::BadSerial(serial));
    }
    let epoch = Date::from_calendar_date(1899, time::Month::December, 30)
        .map_err(|_| ImportError::BadSerial(serial))?;
    Date::from_julian_day(epoch.to_julian_day() + days as i32)
        .map_err(|_| ImportError::BadSerial(serial))
}

/// Normalizes one optional date cell. Empty text is an absent date, not an
/// error; anything non-empty must normalize or the row is refused.
pub fn normalize_date_cell(cell: Option<&DateCell>) -> Result<Option<Date>, ImportError> {
    match cell {
        None => Ok(None),
        Some(DateCell::Serial(serial)) => serial_to_date(*serial).map(Some),
        Some(DateCell::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_iso(trimmed)
                .map(Some)
                .map_err(|_| ImportError::BadDate(trimmed.to_string()))
        }
    }
}

/// Builds the fully-initialized record an import row stands for: planned
/// dates only, empty actual/document maps, fresh execution block.
pub fn contract_from_row(row: &ImportRow) -> Result<Contract, ImportError> {
    let id = ContractId::try_new(row.reference.as_str())
        .map_err(|err| ImportError::BadReference(err.message()))?;
    let project_id = ProjectId::try_new(row.project.as_str())
        .map_err(|err| ImportError::BadProject(err.message()))?;
    let tender_type = TenderType::parse(&row.tender_type)
        .ok_or_else(|| ImportError::UnknownTenderType(row.tender_type.clone()))?;
    let service_type = ServiceType::parse(&row.service_type)
        .ok_or_else(|| ImportError::UnknownServiceType(row.service_type.clone()))?;

    let mut dates_planned = BTreeMap::new();
    for (column, cell) in &row.planned {
        let key = MilestoneKey::parse(column)
            .ok_or_else(|| ImportError::UnknownMilestone(column.clone()))?;
        if let Some(date) = normalize_date_cell(Some(cell))? {
            dates_planned.insert(key, date);
        }
    }

    Ok(Contract {
        id,
        object: row.object.trim().to_string(),
        fiscal_year: row.fiscal_year,
        project_id,
        function: row.function.trim().to_string(),
        activity: row.activity.trim().to_string(),
        tender_type,
        service_type,
        planned_amount: row.planned_amount,
        realized_amount: None,
        budget_line: row.budget_line.trim().to_string(),
        dates_planned,
        dates_actual: BTreeMap::new(),
        documents: BTreeMap::new(),
        status: ContractStatus::Planned,
        unsuccessful: false,
        cancellation: None,
        appeal: None,
        process_state: None,
        execution: ExecutionData::new(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowError {
    /// 1-based row position in the imported batch.
    pub row: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub errors: Vec<RowError>,
}

/// Bulk import: each row lands whole or not at all; failing rows are
/// reported with their position and the batch continues.
pub fn import_rows(store: &mut MemoryStore, actor: &Actor, rows: &[ImportRow]) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, row) in rows.iter().enumerate() {
        let outcome = contract_from_row(row)
            .and_then(|contract| Ok(store.add_contract(actor, contract)?));
        match outcome {
            Ok(_) => report.created += 1,
            Err(err) => report.errors.push(RowError {
                row: index + 1,
                message: err.to_string(),
            }),
        }
    }
    report
}
