//! Storage implementations for the collection store

pub mod in_memory;

pub use in_memory::InMemoryStore;
