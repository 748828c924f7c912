pub mod directory_scanner;
pub mod file_locator;
pub mod search_path;

pub use directory_scanner::DirectoryScanner;
pub use file_locator::FileLocator;
pub use search_path::resolve_search_path;
