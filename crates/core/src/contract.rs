#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use time::Date;

use crate::catalog::MilestoneKey;
use crate::execution::ExecutionData;
use crate::ids::{ContractId, ProjectId};

/// Opaque reference to an uploaded file. The core never dereferences `url`
/// and never sees file bytes; collaborators build these records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub upload_date: Date,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Financing {
    InternalBudget,
    Lender { lender: String },
}

impl Financing {
    pub fn is_lender(&self) -> bool {
        matches!(self, Financing::Lender { .. })
    }
}

/// Funding envelope grouping contracts for one fiscal year. Fiscal year and
/// financing source are fixed at creation; only the label and the signed
/// procurement plan may change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub label: String,
    pub financing: Financing,
    pub fiscal_year: u16,
    pub created_on: Date,
    pub signed_plan: Option<Attachment>,
}

impl Project {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        validate_fiscal_year(self.fiscal_year)?;
        if let Financing::Lender { lender } = &self.financing
            && lender.trim().is_empty()
        {
            return Err(ValidationError::EmptyLenderName);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractStatus {
    Planned,
    InProgress,
    Awarded,
    Signed,
    Closed,
    Cancelled,
    NoBid,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Planned => "planned",
            ContractStatus::InProgress => "in_progress",
            ContractStatus::Awarded => "awarded",
            ContractStatus::Signed => "signed",
            ContractStatus::Closed => "closed",
            ContractStatus::Cancelled => "cancelled",
            ContractStatus::NoBid => "no_bid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "planned" => Some(ContractStatus::Planned),
            "in_progress" => Some(ContractStatus::InProgress),
            "awarded" => Some(ContractStatus::Awarded),
            "signed" => Some(ContractStatus::Signed),
            "closed" => Some(ContractStatus::Closed),
            "cancelled" => Some(ContractStatus::Cancelled),
            "no_bid" => Some(ContractStatus::NoBid),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TenderType {
    OpenTender,
    RestrictedTender,
    RequestForQuotation,
    DirectAward,
}

impl TenderType {
    pub fn as_str(self) -> &'static str {
        match self {
            TenderType::OpenTender => "ao_ouvert",
            TenderType::RestrictedTender => "ao_restreint",
            TenderType::RequestForQuotation => "demande_cotation",
            TenderType::DirectAward => "gre_a_gre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ao_ouvert" => Some(TenderType::OpenTender),
            "ao_restreint" => Some(TenderType::RestrictedTender),
            "demande_cotation" => Some(TenderType::RequestForQuotation),
            "gre_a_gre" => Some(TenderType::DirectAward),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceType {
    Works,
    Supplies,
    Services,
    Intellectual,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Works => "travaux",
            ServiceType::Supplies => "fournitures",
            ServiceType::Services => "services",
            ServiceType::Intellectual => "prestations_intellectuelles",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "travaux" => Some(ServiceType::Works),
            "fournitures" => Some(ServiceType::Supplies),
            "services" => Some(ServiceType::Services),
            "prestations_intellectuelles" => Some(ServiceType::Intellectual),
            _ => None,
        }
    }
}

/// Document slots on the contract record: one per milestone, plus the
/// standalone slots the status flags reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentSlot {
    Jalon(MilestoneKey),
    MarcheSigne,
    MotifInfructueux,
    DecisionAnnulation,
    DecisionRecours,
}

impl DocumentSlot {
    pub fn name(self) -> String {
        match self {
            DocumentSlot::Jalon(key) => format!("jalon_{}", key.as_str()),
            DocumentSlot::MarcheSigne => "marche_signe".to_string(),
            DocumentSlot::MotifInfructueux => "motif_infructueux".to_string(),
            DocumentSlot::DecisionAnnulation => "decision_annulation".to_string(),
            DocumentSlot::DecisionRecours => "decision_recours".to_string(),
        }
    }
}

/// Cancellation always carries the board-approval document; a cancelled
/// contract without one is unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cancellation {
    pub reason: String,
    pub board_decision: Attachment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appeal {
    pub outcome: Option<String>,
    pub document: Option<Attachment>,
}

/// One procurement engagement ("marché"), tracked end-to-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    pub id: ContractId,
    pub object: String,
    pub fiscal_year: u16,
    pub project_id: ProjectId,
    pub function: String,
    pub activity: String,
    pub tender_type: TenderType,
    pub service_type: ServiceType,
    /// Whole currency units; display formatting is a presentation concern.
    pub planned_amount: i64,
    pub realized_amount: Option<i64>,
    pub budget_line: String,
    pub dates_planned: BTreeMap<MilestoneKey, Date>,
    pub dates_actual: BTreeMap<MilestoneKey, Date>,
    pub documents: BTreeMap<DocumentSlot, Attachment>,
    pub status: ContractStatus,
    pub unsuccessful: bool,
    pub cancellation: Option<Cancellation>,
    pub appeal: Option<Appeal>,
    pub process_state: Option<String>,
    pub execution: ExecutionData,
}

impl Contract {
    /// The execution sub-record opens once the contract is signed: either a
    /// recorded signature date or a signed-contract document. Re-derived
    /// from the value, never stored.
    pub fn is_execution_unlocked(&self) -> bool {
        self.dates_actual.contains_key(&MilestoneKey::SignatureMarche)
            || self.documents.contains_key(&DocumentSlot::MarcheSigne)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.object.trim().is_empty() {
            return Err(ValidationError::EmptyObject);
        }
        validate_fiscal_year(self.fiscal_year)?;
        if self.planned_amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if let Some(realized) = self.realized_amount
            && realized <= 0
        {
            return Err(ValidationError::NonPositiveRealizedAmount);
        }
        match (&self.cancellation, self.status) {
            (Some(_), ContractStatus::Cancelled) => {}
            (Some(_), _) => return Err(ValidationError::CancellationWithoutStatus),
            (None, ContractStatus::Cancelled) => {
                return Err(ValidationError::CancelledWithoutRecord);
            }
            (None, _) => {}
        }
        if let Some(cancellation) = &self.cancellation
            && cancellation.reason.trim().is_empty()
        {
            return Err(ValidationError::EmptyCancellationReason);
        }
        self.execution.validate()
    }
}

fn validate_fiscal_year(year: u16) -> Result<(), ValidationError> {
    if !(2000..=2100).contains(&year) {
        return Err(ValidationError::FiscalYearOutOfRange { year });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyObject,
    EmptyLabel,
    EmptyLenderName,
    NonPositiveAmount,
    NonPositiveRealizedAmount,
    FiscalYearOutOfRange { year: u16 },
    CancelledWithoutRecord,
    CancellationWithoutStatus,
    EmptyCancellationReason,
    AvenantsWithoutGate,
    NonPositiveDecompteAmount { id: String },
    DuplicateDecompteNumber { number: u32 },
    TerminationNotEngaged,
    TerminationOutOfOrder,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyObject => write!(f, "object must not be empty"),
            Self::EmptyLabel => write!(f, "label must not be empty"),
            Self::EmptyLenderName => write!(f, "lender name must not be empty"),
            Self::NonPositiveAmount => write!(f, "planned amount must be positive"),
            Self::NonPositiveRealizedAmount => {
                write!(f, "realized amount must be positive")
            }
            Self::FiscalYearOutOfRange { year } => {
                write!(f, "fiscal year out of range: {year}")
            }
            Self::CancelledWithoutRecord => {
                write!(f, "cancelled contract requires a cancellation record")
            }
            Self::CancellationWithoutStatus => {
                write!(f, "cancellation record requires cancelled status")
            }
            Self::EmptyCancellationReason => {
                write!(f, "cancellation reason must not be empty")
            }
            Self::AvenantsWithoutGate => {
                write!(f, "avenants recorded while has_avenant is false")
            }
            Self::NonPositiveDecompteAmount { id } => {
                write!(f, "decompte amount must be positive (id={id})")
            }
            Self::DuplicateDecompteNumber { number } => {
                write!(f, "duplicate decompte number: {number}")
            }
            Self::TerminationNotEngaged => {
                write!(f, "termination documents recorded while not engaged")
            }
            Self::TerminationOutOfOrder => {
                write!(f, "termination steps recorded out of order")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
