#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use time::Date;

use crate::catalog::{CATALOG, MilestoneDefinition, MilestoneKey};
use crate::contract::{Contract, ContractStatus, Financing, Project};
use crate::dates::days_between;
use crate::ids::ContractId;

/// Lender-only checkpoints are inapplicable under internal budget and count
/// as satisfied everywhere they are consulted.
pub fn is_applicable(definition: &MilestoneDefinition, financing: &Financing) -> bool {
    !definition.lender_only || financing.is_lender()
}

/// First applicable checkpoint in catalog order lacking an actual date.
/// First-match-wins: an unmet early checkpoint masks later ones even when
/// later actual dates exist.
pub fn find_blocking_milestone(
    contract: &Contract,
    project: &Project,
) -> Option<&'static MilestoneDefinition> {
    CATALOG.iter().find(|definition| {
        is_applicable(definition, &project.financing)
            && !contract.dates_actual.contains_key(&definition.key)
    })
}

/// Delay accrued on one checkpoint, never negative. An open checkpoint
/// accrues against `today`; a met one against its actual date; no planned
/// date means no delay.
pub fn milestone_delay_days(contract: &Contract, key: MilestoneKey, today: Date) -> i64 {
    let Some(planned) = contract.dates_planned.get(&key).copied() else {
        return 0;
    };
    let reference = contract.dates_actual.get(&key).copied().unwrap_or(today);
    days_between(planned, reference).max(0)
}

fn is_signed_or_closed(contract: &Contract) -> bool {
    matches!(
        contract.status,
        ContractStatus::Signed | ContractStatus::Closed
    )
}

/// Percentage of signed-or-closed contracts, rounded; 0 on an empty set.
pub fn contracting_rate(contracts: &[&Contract]) -> u32 {
    if contracts.is_empty() {
        return 0;
    }
    let signed = contracts.iter().filter(|c| is_signed_or_closed(c)).count();
    (100.0 * signed as f64 / contracts.len() as f64).round() as u32
}

pub fn amount_planned(contracts: &[&Contract]) -> i64 {
    contracts.iter().map(|c| c.planned_amount).sum()
}

/// Sum of realized-or-planned amounts over the signed/closed subset.
pub fn amount_engaged(contracts: &[&Contract]) -> i64 {
    contracts
        .iter()
        .filter(|c| is_signed_or_closed(c))
        .map(|c| c.realized_amount.unwrap_or(c.planned_amount))
        .sum()
}

pub fn amount_remaining(contracts: &[&Contract]) -> i64 {
    amount_planned(contracts) - amount_engaged(contracts)
}

fn procurement_duration(dates: &BTreeMap<MilestoneKey, Date>) -> Option<i64> {
    let start = dates.get(&MilestoneKey::SaisineCipm)?;
    let end = dates.get(&MilestoneKey::SignatureMarche)?;
    let days = days_between(*start, *end);
    (days > 0).then_some(days)
}

fn mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Ratio of mean planned to mean realized procurement duration (CIPM
/// referral to signature), as a rounded percentage. `None` when either mean
/// is undefined, displayed as "N/A".
pub fn celerity_index(contracts: &[&Contract]) -> Option<u32> {
    let signed: Vec<&&Contract> = contracts.iter().filter(|c| is_signed_or_closed(c)).collect();
    let planned: Vec<f64> = signed
        .iter()
        .filter_map(|c| procurement_duration(&c.dates_planned))
        .map(|days| days as f64)
        .collect();
    let realized: Vec<f64> = signed
        .iter()
        .filter_map(|c| procurement_duration(&c.dates_actual))
        .map(|days| days as f64)
        .collect();
    let planned_mean = mean(&planned)?;
    let realized_mean = mean(&realized)?;
    if planned_mean <= 0.0 || realized_mean <= 0.0 {
        return None;
    }
    Some((100.0 * planned_mean / realized_mean).round() as u32)
}

/// Share of contracts under appeal, one decimal, as the display string;
/// literally `"0"` on an empty set.
pub fn litigation_rate(contracts: &[&Contract]) -> String {
    if contracts.is_empty() {
        return "0".to_string();
    }
    let appeals = contracts.iter().filter(|c| c.appeal.is_some()).count();
    let rate = 100.0 * appeals as f64 / contracts.len() as f64;
    format!("{:.1}", (rate * 10.0).round() / 10.0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayAlert {
    pub contract_id: ContractId,
    pub object: String,
    pub blocking_label: &'static str,
    pub delay_days: i64,
    pub up_to_date: bool,
}

/// Blocking point + delay for every planned/in-progress contract, worst
/// first, capped at five rows.
pub fn delay_alerts(contracts: &[&Contract], projects: &[Project], today: Date) -> Vec<DelayAlert> {
    let mut alerts = Vec::new();
    for contract in contracts {
        if !matches!(
            contract.status,
            ContractStatus::InProgress | ContractStatus::Planned
        ) {
            continue;
        }
        let Some(project) = projects.iter().find(|p| p.id == contract.project_id) else {
            continue;
        };
        let Some(blocking) = find_blocking_milestone(contract, project) else {
            continue;
        };
        let delay_days = milestone_delay_days(contract, blocking.key, today);
        alerts.push(DelayAlert {
            contract_id: contract.id.clone(),
            object: contract.object.clone(),
            blocking_label: blocking.label,
            delay_days,
            up_to_date: delay_days <= 0,
        });
    }
    alerts.sort_by(|a, b| b.delay_days.cmp(&a.delay_days));
    alerts.truncate(5);
    alerts
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MilestoneProgress {
    pub met: usize,
    pub applicable: usize,
}

/// Completion summary for table views: met vs applicable checkpoints.
pub fn milestone_progress(contract: &Contract, project: &Project) -> MilestoneProgress {
    let mut met = 0;
    let mut applicable = 0;
    for definition in CATALOG {
        if !is_applicable(definition, &project.financing) {
            continue;
        }
        applicable += 1;
        if contract.dates_actual.contains_key(&definition.key) {
            met += 1;
        }
    }
    MilestoneProgress { met, applicable }
}
