//! Development utilities for a static web project.
//!
//! - [`stage`]: rebuild the `.temp` staging mirror of the project and hand
//!   it to `gen-bundle` to produce a Web Bundle.
//! - [`server`]: serve the working directory over HTTP with `.wasm` and
//!   `.wbn` MIME types and optional cross-origin isolation headers.
//!
//! The two share only configuration, logging and error types.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod stage;
