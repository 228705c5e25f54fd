//! In-memory adapters backing tests and local development.

mod store;

pub use store::InMemoryStore;
