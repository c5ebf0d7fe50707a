//! Generator of timed-automata models for the UPPAAL model checker.
//!
//! A network of timed automata is defined through the [`NtaBuilder`](nta_core::NtaBuilder),
//! either directly or by replaying a JSON [`NtaDescription`],
//! and serialized into UPPAAL's flat-system XML format by [`nta_fmt_xml`].

mod cli;
pub mod description;

pub use cli::{Cli, Notation};
pub use description::{NtaDescription, load};
pub use nta_core;
pub use nta_fmt_xml;
