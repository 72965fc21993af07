//! Customer Financials Service - financial reconciliation for billboard advertising customers.

pub mod config;
pub mod models;
pub mod services;
