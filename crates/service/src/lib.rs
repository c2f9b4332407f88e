//! Service layer for the student directory.
//! - Keeps the collection behind a store trait so handlers never touch raw state.
//! - Reuses request/record types from the `models` crate.

pub mod errors;
pub mod directory;
