//! Public IP discovery
//!
//! An ordered fallback chain ([`DiscoverPool`]) over pluggable discovery
//! sources, plus the stock source: an HTTP IP-echo endpoint returning JSON
//! ([`HttpFinder`]). The chain returns the first source that produces an
//! IPv4 address; a source failure only means the next one is tried.

pub mod constants;
pub mod errors;
pub mod impls;
pub mod types;

pub use errors::DiscoverError;
pub use types::{DiscoverPool, HttpFinder};
