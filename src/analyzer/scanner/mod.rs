pub mod file_scanner;

pub use file_scanner::{DEFAULT_MAX_FILE_SIZE, FileScanner};
