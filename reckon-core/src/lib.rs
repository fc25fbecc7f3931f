//! reckon-core: data model and calibration for the statement extraction engine.

pub mod config;
pub mod hash;
pub mod metadata;
pub mod money;
pub mod reconcile;
pub mod summary;
pub mod transaction;

pub use config::EngineConfig;
pub use hash::{statement_hash, transaction_hash};
pub use metadata::{StatementMetadata, StatementPeriod};
pub use money::{Currency, parse_amount, round2, round3};
pub use reconcile::{
    ManualAdjustment, ReconciliationResult, apply_manual_adjustments, reconcile,
    statement_confidence,
};
pub use summary::{DailyFlow, MonthlySummary, monthly_summary};
pub use transaction::{Direction, RowAudit, Transaction};
