mod medium;
mod seed;
mod store;

pub use medium::{MemoryMedium, StorageMedium};
pub use seed::default_records;
pub use store::{HistoryStore, DEFAULT_STORAGE_KEY, MAX_ITEMS};
