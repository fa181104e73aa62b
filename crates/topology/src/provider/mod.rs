//! Store implementations of the collaborator traits.

pub mod memory_provider;

pub use memory_provider::InMemoryStore;
