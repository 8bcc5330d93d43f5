//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Server lifecycle logging
//! - Per-request lookup logging (found / not found)
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Every function here is best-effort: a failed write is dropped and never
//! reaches the caller.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use writer::LogWriter;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    write_info_to(writer::get(), message);
}

fn write_info_to(target: Option<&LogWriter>, message: &str) {
    match target {
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

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("File server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving files from: {}", config.files.root));
    if config.files.confine_to_root {
        write_info("Requests are confined to the serving root");
    }
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop(in_flight: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, {in_flight} connection(s) still in flight"
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

// Per-request lookup lines all go to the info target, so a lookup and its
// outcome stay together on one stream.

/// Lookup started for a resolved path
pub fn log_lookup(display_path: &str) {
    lookup_to(writer::get(), display_path);
}

pub fn log_found(display_path: &str) {
    found_to(writer::get(), display_path);
}

/// Lookup failed; `reason` carries the underlying error kind
pub fn log_not_found(display_path: &str, reason: &str) {
    not_found_to(writer::get(), display_path, reason);
}

fn lookup_to(target: Option<&LogWriter>, display_path: &str) {
    write_info_to(target, &format!("Trying to find '{display_path}'..."));
}

fn found_to(target: Option<&LogWriter>, display_path: &str) {
    write_info_to(target, &format!("Found '{display_path}'."));
}

fn not_found_to(target: Option<&LogWriter>, display_path: &str, reason: &str) {
    write_info_to(
        target,
        &format!("ERROR: Cannot find '{display_path}'. ({reason})"),
    );
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
