//! Customer financial aggregation pipeline.
//!
//! Pure functions over already-fetched collections. The stateful view in
//! [`view`](crate::services::view) delegates here, so the aggregation logic
//! exists exactly once.

use crate::models::{Contract, CustomerLedgerEntry, InvoiceSettings};
use crate::services::settlement;
use crate::services::store::CustomerRecords;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Explanatory decomposition of a customer's debt by source category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebtBreakdown {
    pub contracts: Decimal,
    pub sales_invoices: Decimal,
    pub print_invoices: Decimal,
    pub composite_tasks: Decimal,
    pub other_debts: Decimal,
}

impl DebtBreakdown {
    pub fn total(&self) -> Decimal {
        self.contracts
            + self.sales_invoices
            + self.print_invoices
            + self.composite_tasks
            + self.other_debts
    }
}

/// Consistent view of what a customer owes, has paid, and has settled
/// through non-cash means.
///
/// `remaining_debt` is the authoritative owed figure (settlement formula,
/// clamped non-negative); `total_debt` and the breakdown explain it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerFinancials {
    pub total_debt: Decimal,
    pub total_paid: Decimal,
    pub remaining_debt: Decimal,
    pub repayment_percentage: u32,
    pub total_discounts: Decimal,
    pub total_purchases: Decimal,
    pub friend_rental_total: Decimal,
    pub debt_breakdown: DebtBreakdown,
}

/// Sum of externally-sourced rental costs nested in the customer's contracts.
pub fn friend_rental_total(contracts: &[Contract]) -> Decimal {
    contracts
        .iter()
        .flat_map(|c| c.friend_rentals())
        .map(|r| r.rental_cost)
        .sum()
}

/// Decompose the customer's debt by category, de-duplicating amounts that are
/// already represented elsewhere:
/// - print invoices folded into a contract or referenced by a composite task
///   count zero;
/// - composite tasks folded into an invoice count zero;
/// - debit ledger entries that back an invoice count zero (dropped entirely,
///   not re-added elsewhere).
pub fn debt_breakdown(records: &CustomerRecords) -> DebtBreakdown {
    let combined_invoice_ids: HashSet<Uuid> = records
        .composite_tasks
        .iter()
        .filter_map(|t| t.combined_invoice_id)
        .collect();

    DebtBreakdown {
        contracts: records.contracts.iter().map(|c| c.total).sum(),
        sales_invoices: records
            .sales_invoices
            .iter()
            .map(|i| i.total_amount)
            .sum(),
        print_invoices: records
            .print_invoices
            .iter()
            .filter(|i| !i.included_in_contract && !combined_invoice_ids.contains(&i.invoice_id))
            .map(|i| i.amount())
            .sum(),
        composite_tasks: records
            .composite_tasks
            .iter()
            .filter(|t| t.combined_invoice_id.is_none())
            .map(|t| t.customer_total)
            .sum(),
        other_debts: records
            .ledger_entries
            .iter()
            .filter(|e| {
                e.parsed_entry_type().is_some_and(|t| t.is_debit()) && !e.has_invoice_link()
            })
            .map(|e| e.amount)
            .sum(),
    }
}

/// Sum of all credit-classified ledger entries. No linkage exclusion:
/// payments reduce debt exactly once by construction.
pub fn total_payments(entries: &[CustomerLedgerEntry]) -> Decimal {
    entries
        .iter()
        .filter(|e| e.parsed_entry_type().is_some_and(|t| t.is_credit()))
        .map(|e| e.amount)
        .sum()
}

/// Run the whole aggregation pipeline over already-fetched collections.
pub fn calculate_customer_financials(records: &CustomerRecords) -> CustomerFinancials {
    let friend_rental_total = friend_rental_total(&records.contracts);
    let debt_breakdown = debt_breakdown(records);
    let total_debt = debt_breakdown.total();
    let total_paid = total_payments(&records.ledger_entries);

    let total_discounts: Decimal = records
        .discounts
        .iter()
        .filter(|d| d.is_active())
        .map(|d| d.discount_value)
        .sum();

    let purchase_credit: Decimal = records
        .purchase_invoices
        .iter()
        .map(|i| i.available_credit())
        .sum();
    let total_purchases = purchase_credit + friend_rental_total;

    let remaining_debt = settlement::total_remaining_debt(
        &records.contracts,
        &records.ledger_entries,
        &records.sales_invoices,
        &records.print_invoices,
        &records.purchase_invoices,
        total_discounts,
        &records.composite_tasks,
        friend_rental_total,
    )
    .max(Decimal::ZERO);

    let repayment_percentage =
        repayment_percentage(total_debt, total_paid + total_discounts + total_purchases);

    CustomerFinancials {
        total_debt,
        total_paid,
        remaining_debt,
        repayment_percentage,
        total_discounts,
        total_purchases,
        friend_rental_total,
        debt_breakdown,
    }
}

/// Share of the debt settled through payments, discounts, and purchase
/// offsets, as a whole percent in [0, 100]. No debt means fully settled.
fn repayment_percentage(total_debt: Decimal, settled: Decimal) -> u32 {
    if total_debt <= Decimal::ZERO {
        return 100;
    }

    let percent = (settled / total_debt * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    percent
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0)
}

/// One display row of the debt breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub amount: Decimal,
    pub formatted: String,
}

/// Project the breakdown into display rows, skipping empty categories.
/// Amounts carry the configured currency code when settings are available.
pub fn breakdown_rows(
    financials: &CustomerFinancials,
    settings: Option<&InvoiceSettings>,
) -> Vec<BreakdownRow> {
    let breakdown = &financials.debt_breakdown;
    let categories = [
        ("Contracts", breakdown.contracts),
        ("Sales invoices", breakdown.sales_invoices),
        ("Print invoices", breakdown.print_invoices),
        ("Composite tasks", breakdown.composite_tasks),
        ("Other debts", breakdown.other_debts),
    ];

    categories
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(label, amount)| BreakdownRow {
            label,
            amount,
            formatted: match settings {
                Some(s) => format!("{} {}", amount, s.currency),
                None => amount.to_string(),
            },
        })
        .collect()
}
