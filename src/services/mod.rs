//! Service layer for the finance tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, ordering and logging of every mutation.

pub mod budget;
pub mod goal;
pub mod transaction;

pub use budget::BudgetService;
pub use goal::GoalService;
pub use transaction::{DateRange, TransactionQuery, TransactionService};
