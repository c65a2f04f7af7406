//! Acceptance oracle adapters.

mod ledger;

pub use ledger::InMemoryAcceptanceLedger;
