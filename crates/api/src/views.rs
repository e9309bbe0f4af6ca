#![forbid(unsafe_code)]

use serde_json::{Value, json};
use time::Date;

use mt_core::metrics::{
    amount_engaged, amount_planned, amount_remaining, celerity_index, contracting_rate,
    delay_alerts, find_blocking_milestone, litigation_rate, milestone_delay_days,
    milestone_progress,
};
use mt_storage::{ContractFilter, MemoryStore};

/// Whole currency units with thousands grouping and the currency suffix.
/// Display-side only; KPI arithmetic never goes through here.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} FCFA")
}

/// Dashboard payload over the filtered contract set: headline KPIs plus the
/// top-five delay alerts. `celerity_index` is `null` when not computable;
/// the consumer renders it as "N/A".
pub fn dashboard_snapshot(store: &MemoryStore, filter: &ContractFilter, today: Date) -> Value {
    let contracts = store.filter_contracts(filter);
    let alerts = delay_alerts(&contracts, store.projects(), today);
    json!({
        "fiscal_year": filter.fiscal_year,
        "total": contracts.len(),
        "contracting_rate": contracting_rate(&contracts),
        "amount_planned": amount_planned(&contracts),
        "amount_engaged": amount_engaged(&contracts),
        "amount_remaining": amount_remaining(&contracts),
        "celerity_index": celerity_index(&contracts),
        "litigation_rate": litigation_rate(&contracts),
        "alerts": alerts
            .iter()
            .map(|alert| {
                json!({
                    "contract": alert.contract_id.as_str(),
                    "object": alert.object,
                    "blocking": alert.blocking_label,
                    "delay_days": alert.delay_days,
                    "up_to_date": alert.up_to_date,
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// One row per contract for the tracking table: status, blocking point,
/// accrued delay and milestone completion.
pub fn contract_rows(store: &MemoryStore, filter: &ContractFilter, today: Date) -> Vec<Value> {
    store
        .filter_contracts(filter)
        .into_iter()
        .map(|contract| {
            let project = store.get_project(&contract.project_id);
            let blocking = project.and_then(|p| find_blocking_milestone(contract, p));
            let delay_days = blocking
                .map(|b| milestone_delay_days(contract, b.key, today))
                .unwrap_or(0);
            let progress = project.map(|p| milestone_progress(contract, p));
            json!({
                "reference": contract.id.as_str(),
                "object": contract.object,
                "project": contract.project_id.as_str(),
                "status": contract.status.as_str(),
                "amount": format_amount(contract.planned_amount),
                "blocking": blocking.map(|b| b.label),
                "delay_days": delay_days,
                "milestones_met": progress.map(|p| p.met),
                "milestones_applicable": progress.map(|p| p.applicable),
            })
        })
        .collect()
}
