mod app;
mod cataas;
mod file_store;
mod json_storage;
mod memory_store;

pub use app::{App, Outcome, RequestKind, RequestTicket, FIRST_CAPTION};
pub use cataas::{CataasClient, FetchError, ImageSource, DEFAULT_ENDPOINT};
pub use file_store::FileStore;
pub use json_storage::JsonStorage;
pub use memory_store::MemoryStore;
