//! Core business logic for Stockbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `stock` - Batch and serialized-unit cost ledger rules
//! - `costing` - Cost resolution for sold line items
//! - `sales` - Read-only sale records and period sales totals
//! - `expenses` - Operating expense categorization and summarization
//! - `reports` - Period statement composition and comparison

pub mod costing;
pub mod expenses;
pub mod reports;
pub mod sales;
pub mod stock;
