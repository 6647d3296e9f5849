mod memory;
mod postgres;

pub mod models;
pub mod schema;

pub use memory::MemoryStore;
pub use postgres::DbStore;
