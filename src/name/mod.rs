//! Name decomposition and per-query name flags.
//!
//! [`DecomposedName`] partitions a raw full name into first / middle / last
//! component vectors after cleaning; [`extract_name_flags`] derives the
//! three normalisation flags the feature matrix carries for the investor.

pub mod constants;
pub mod decomposer;
pub mod features;


pub use constants::{NICKNAME_MAPPINGS, find_nicknames};
pub use decomposer::DecomposedName;
pub use features::{NameFlags, extract_name_flags};
