pub mod cli;
pub mod downloader;
pub mod error;
pub mod file_manager;
pub mod html_parser;
pub mod naming;
pub mod urls;

// Re-export main types for convenience
pub use cli::ArchiveCommand;
pub use downloader::{HttpClient, PageArchiver};
pub use error::ArchiveError;
pub use file_manager::FileManager;
pub use html_parser::{LocalizedResource, ResourceReference, ResourceTag};
pub use naming::PageContext;
