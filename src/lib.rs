//! Finance tracker - personal transactions, budgets and savings goals
//!
//! This library provides the core of a single-user finance tracker: income
//! and expense records, per-category spending limits, savings goals, and the
//! reports derived from them (expenses by category, budget alerts and goal
//! projections). Data lives in JSON files on the local machine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and the settings store
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, goals, money)
//! - `storage`: JSON document collections
//! - `services`: CRUD over each collection
//! - `reports`: Derived reports and saving towards goals
//! - `ipc`: Line-delimited JSON relay for a front-end process
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::paths::FinancePaths;
//! use finance_tracker::storage::Storage;
//! use finance_tracker::reports::ReportEngine;
//! use finance_tracker::services::{BudgetService, GoalService, TransactionService};
//!
//! let storage = Storage::open(FinancePaths::new()?)?;
//! let (txns, budgets, goals) = (
//!     TransactionService::new(&storage),
//!     BudgetService::new(&storage),
//!     GoalService::new(&storage),
//! );
//! let report = ReportEngine::new(&txns, &budgets, &goals).expenses_by_category("month")?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ipc;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
