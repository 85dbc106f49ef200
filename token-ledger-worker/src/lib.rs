//! # General description
//!
//! Operational layer of the token ledger state: balance arithmetic, asset
//! records and transaction receipts, expressed over the abstract store
//! interfaces of `token_ledger_exports`.
//!
//! The crate is invoked, not scheduled: it spawns nothing, waits on nothing
//! and owns no store. The execution engine drives `StateLedger` while
//! applying a state transition; RPC handlers drive `StateReader` against a
//! point-in-time read accessor.
//!
//! # Architecture
//!
//! ## `ledger.rs`
//! `StateLedger`, the mutating operations. Only the execution engine calls
//! these, one state transition at a time.
//!
//! ## `read_state.rs`
//! `StateReader`, the query operations over batched point-in-time reads.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod ledger;
mod read_state;

pub use ledger::StateLedger;
pub use read_state::StateReader;

#[cfg(test)]
pub(crate) mod test_exports;
