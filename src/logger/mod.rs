//! Logger module
//!
//! Provides logging utilities shared by both binaries:
//! - Staging trace output
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::LoggingConfig;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_stage_phase(phase: &str) {
    write_info(phase);
}

pub fn log_dir_found(src: &Path, dst: &Path) {
    write_info(&format!(
        "Found directory: {} --> {}",
        src.display(),
        dst.display()
    ));
}

pub fn log_dir_created() {
    write_info("Created directory!");
}

pub fn log_subdir(index: usize, name: &str) {
    write_info(&format!("\tsubdir {index}: {name}"));
}

pub fn log_file_copied(src: &Path, dst: &Path) {
    write_info(&format!("\t{} --> {}", src.display(), dst.display()));
}

pub fn log_bundle_command(program: &str, args: &[String]) {
    write_info(&format!("[Bundle] {program} {}", args.join(" ")));
}

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    write_info(&format!("serving at port {}", addr.port()));
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Document root: {}", root.display()));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
