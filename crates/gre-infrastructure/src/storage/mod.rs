pub mod atomic_json;
pub mod local_storage;

pub use atomic_json::AtomicJsonFile;
pub use local_storage::FileLocalStorage;
