//! In-memory student directory and its storage trait.

pub mod memory;
pub mod store;

pub use memory::InMemoryStudentStore;
pub use store::StudentStore;
