//! Implementation of *networks of timed automata* (NTA)
//! as consumed by the UPPAAL model checker.
//!
//! An NTA is defined through an [`NtaBuilder`](nta::NtaBuilder),
//! by adding templates, locations, edges and declarations,
//! and then built into an immutable [`Nta`](nta::Nta)
//! that is guaranteed to be structurally complete.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod nta;

pub use nta::*;
