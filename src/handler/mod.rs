//! Request handler module
//!
//! Static file serving in the manner of a conventional development server:
//! files, index pages, directory listings and trailing-slash redirects.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
