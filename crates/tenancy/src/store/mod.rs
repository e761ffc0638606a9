//! Storage backends for the repository traits.

mod memory;

pub use memory::InMemoryStore;
