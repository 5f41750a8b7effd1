//! Build orchestration for the guide JSON API.
//!
//! Ties the Markdown extractors together into a full output build
//! ([`assembler::build`]), renders the HTML index, and drives debounced
//! rebuilds from file changes ([`watch`]).

pub mod assembler;
pub mod index;
pub mod version;
pub mod watch;

pub use assembler::{BuildReport, GeneratedGuide, build, build_dated};
