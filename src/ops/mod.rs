//! Background operation tracking

pub mod ledger;

pub use ledger::OperationLedger;
