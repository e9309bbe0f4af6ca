#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use time::Date;

use crate::contract::{Attachment, ValidationError};

/// Administrative documents collected right after signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdminDocument {
    Notification,
    StartOrder,
    PerformanceBond,
    Insurance,
    TaxRegistration,
    RegisteredContract,
}

impl AdminDocument {
    pub fn as_str(self) -> &'static str {
        match self {
            AdminDocument::Notification => "notification",
            AdminDocument::StartOrder => "ordre_service",
            AdminDocument::PerformanceBond => "cautionnement",
            AdminDocument::Insurance => "assurance",
            AdminDocument::TaxRegistration => "patente",
            AdminDocument::RegisteredContract => "marche_enregistre",
        }
    }
}

/// Payment installment claim during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decompte {
    pub id: String,
    pub number: u32,
    pub object: String,
    pub amount: i64,
    pub validated_on: Option<Date>,
    pub document: Option<Attachment>,
}

/// Guarantee-retention mode securing performance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Retention {
    /// Option A: a percentage withheld from each installment.
    WithheldFromInstallments,
    /// Option B: a bank bond, backed by its document once provided.
    BankBond { document: Option<Attachment> },
}

/// Contract amendment altering scope, amount or duration post-signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avenant {
    pub id: String,
    pub reference: String,
    pub object: String,
    /// Signed delta; reduction avenants are negative.
    pub amount_delta: i64,
    pub signed_on: Option<Date>,
    pub notification: Option<Attachment>,
    pub start_order: Option<Attachment>,
    pub registration: Option<Attachment>,
}

/// Three-step termination workflow. Each step is unlocked by the previous
/// step's document: formal notice, then default finding, then the
/// termination decision.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Termination {
    pub engaged: bool,
    pub formal_notice: Option<Attachment>,
    pub default_finding: Option<Attachment>,
    pub decision: Option<Attachment>,
}

impl Termination {
    pub fn record_formal_notice(&mut self, document: Attachment) -> Result<(), ExecutionError> {
        if !self.engaged {
            return Err(ExecutionError::TerminationNotEngaged);
        }
        self.formal_notice = Some(document);
        Ok(())
    }

    pub fn record_default_finding(&mut self, document: Attachment) -> Result<(), ExecutionError> {
        if !self.engaged {
            return Err(ExecutionError::TerminationNotEngaged);
        }
        if self.formal_notice.is_none() {
            return Err(ExecutionError::StepLocked {
                required: "formal_notice",
            });
        }
        self.default_finding = Some(document);
        Ok(())
    }

    pub fn record_decision(&mut self, document: Attachment) -> Result<(), ExecutionError> {
        if !self.engaged {
            return Err(ExecutionError::TerminationNotEngaged);
        }
        if self.default_finding.is_none() {
            return Err(ExecutionError::StepLocked {
                required: "default_finding",
            });
        }
        self.decision = Some(document);
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.engaged
            && (self.formal_notice.is_some()
                || self.default_finding.is_some()
                || self.decision.is_some())
        {
            return Err(ValidationError::TerminationNotEngaged);
        }
        if self.default_finding.is_some() && self.formal_notice.is_none() {
            return Err(ValidationError::TerminationOutOfOrder);
        }
        if self.decision.is_some() && self.default_finding.is_none() {
            return Err(ValidationError::TerminationOutOfOrder);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionError {
    TerminationNotEngaged,
    StepLocked { required: &'static str },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TerminationNotEngaged => write!(f, "termination workflow not engaged"),
            Self::StepLocked { required } => {
                write!(f, "step locked until {required} document exists")
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Post-signature sub-record, present on every contract from creation and
/// left empty until the signature gate opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionData {
    pub admin_documents: BTreeMap<AdminDocument, Attachment>,
    pub decomptes: Vec<Decompte>,
    pub retention: Retention,
    pub has_avenant: bool,
    pub avenants: Vec<Avenant>,
    pub termination: Termination,
    pub provisional_acceptance: Option<Attachment>,
    pub final_acceptance: Option<Attachment>,
    pub final_acceptance_on: Option<Date>,
}

impl ExecutionData {
    pub fn new() -> Self {
        Self {
            admin_documents: BTreeMap::new(),
            decomptes: Vec::new(),
            retention: Retention::WithheldFromInstallments,
            has_avenant: false,
            avenants: Vec::new(),
            termination: Termination::default(),
            provisional_acceptance: None,
            final_acceptance: None,
            final_acceptance_on: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_avenant && !self.avenants.is_empty() {
            return Err(ValidationError::AvenantsWithoutGate);
        }
        let mut numbers = Vec::with_capacity(self.decomptes.len());
        for decompte in &self.decomptes {
            if decompte.amount <= 0 {
                return Err(ValidationError::NonPositiveDecompteAmount {
                    id: decompte.id.clone(),
                });
            }
            if numbers.contains(&decompte.number) {
                return Err(ValidationError::DuplicateDecompteNumber {
                    number: decompte.number,
                });
            }
            numbers.push(decompte.number);
        }
        self.termination.validate()
    }
}

impl Default for ExecutionData {
    fn default() -> Self {
        Self::new()
    }
}
