//! folio-core library.
//!
//! The in-memory catalog engine behind the folio literary archive:
//!
//! - [`catalog`] loads the archive document into an immutable, newest-first
//!   [`catalog::Catalog`];
//! - [`view`] holds the reader's lens, author filter, search text and
//!   per-category display limits;
//! - [`projection`] combines the two into what each category shows;
//! - [`session`] is the controller that owns both and applies user actions.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for load and store failures,
//!   `anyhow::Result` at the configuration boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod preview;
pub mod projection;
pub mod roman;
pub mod session;
pub mod store;
pub mod theme;
pub mod view;
