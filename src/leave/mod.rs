//! The leave-balance reconciliation core: pre-submission validation, pure
//! ledger arithmetic, and the request state machine that ties the two to the
//! stores. No HTTP types in here; the `api` handlers are thin adapters over
//! this module.

pub mod ledger;
pub mod lifecycle;
pub mod validation;

pub use lifecycle::{CommitState, Engine, LeaveDraft, TransitionOutcome};
