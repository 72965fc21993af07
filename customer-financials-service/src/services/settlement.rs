//! Shared remaining-debt settlement formula.
//!
//! Every customer-facing "amount still owed" figure in the platform comes
//! from this one function, so it takes the raw collections directly and
//! stays independent of the aggregation pipeline that explains the number.
//! The caller is responsible for clamping the result to zero.

use crate::models::{
    CompositeTask, Contract, CustomerLedgerEntry, PrintInvoice, PurchaseInvoice, SalesInvoice,
};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

/// Total the customer still owes: gross debt minus payments, discounts,
/// available purchase credit, and friend-rental costs.
///
/// Gross debt applies the same de-duplication rules as the debt breakdown:
/// print invoices folded into a contract or a composite task are skipped, a
/// composite task folded into an invoice is skipped, and debit ledger entries
/// that back an invoice are skipped.
#[allow(clippy::too_many_arguments)]
pub fn total_remaining_debt(
    contracts: &[Contract],
    ledger_entries: &[CustomerLedgerEntry],
    sales_invoices: &[SalesInvoice],
    print_invoices: &[PrintInvoice],
    purchase_invoices: &[PurchaseInvoice],
    total_discounts: Decimal,
    composite_tasks: &[CompositeTask],
    friend_rental_total: Decimal,
) -> Decimal {
    let combined_invoice_ids: HashSet<Uuid> = composite_tasks
        .iter()
        .filter_map(|t| t.combined_invoice_id)
        .collect();

    let gross_debt: Decimal = contracts.iter().map(|c| c.total).sum::<Decimal>()
        + sales_invoices
            .iter()
            .map(|i| i.total_amount)
            .sum::<Decimal>()
        + print_invoices
            .iter()
            .filter(|i| !i.included_in_contract && !combined_invoice_ids.contains(&i.invoice_id))
            .map(|i| i.amount())
            .sum::<Decimal>()
        + composite_tasks
            .iter()
            .filter(|t| t.combined_invoice_id.is_none())
            .map(|t| t.customer_total)
            .sum::<Decimal>()
        + ledger_entries
            .iter()
            .filter(|e| {
                e.parsed_entry_type().is_some_and(|t| t.is_debit()) && !e.has_invoice_link()
            })
            .map(|e| e.amount)
            .sum::<Decimal>();

    let payments: Decimal = ledger_entries
        .iter()
        .filter(|e| e.parsed_entry_type().is_some_and(|t| t.is_credit()))
        .map(|e| e.amount)
        .sum();

    let purchase_credit: Decimal = purchase_invoices
        .iter()
        .map(|i| i.available_credit())
        .sum();

    gross_debt - payments - total_discounts - purchase_credit - friend_rental_total
}
