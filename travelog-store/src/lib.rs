pub mod persist;
pub mod store;

pub use store::EntryStore;
