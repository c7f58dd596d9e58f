//! Payment totals per payee and the year-end tax-form threshold
//!
//! Amounts come from the payments collection of the data store. Nothing
//! here invents or estimates a cost.

use crate::core::entity::Entity;
use indexmap::IndexMap;
use serde::Serialize;

/// Total paid to one payee at or above which a tax form must be filed
pub const TAX_FORM_THRESHOLD: f64 = 600.0;

/// Whether a payee's total requires a tax form
pub fn requires_tax_form(total: f64) -> bool {
    total >= TAX_FORM_THRESHOLD
}

/// Total paid to one payee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub payee: String,
    pub total: f64,
    pub payments: usize,
    pub requires_tax_form: bool,
}

/// Group payments by payee and total them.
///
/// Summaries come out in the order each payee first appears. Payments
/// with no payee are skipped; a missing or non-numeric amount counts as 0.
pub fn summarize_payments<E: Entity>(
    payments: &[E],
    payee_field: &str,
    amount_field: &str,
) -> Vec<PaymentSummary> {
    let mut totals: IndexMap<String, (f64, usize)> = IndexMap::new();

    for payment in payments {
        let Some(payee) = payment
            .field_value(payee_field)
            .and_then(|v| v.as_string().map(str::to_string))
            .filter(|p| !p.is_empty())
        else {
            tracing::trace!(field = payee_field, "skipping payment without payee");
            continue;
        };
        let amount = payment
            .field_value(amount_field)
            .and_then(|v| v.as_number())
            .unwrap_or(0.0);

        let entry = totals.entry(payee).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(payee, (total, payments))| PaymentSummary {
            payee,
            total,
            payments,
            requires_tax_form: requires_tax_form(total),
        })
        .collect()
}
