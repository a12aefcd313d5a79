//! Table persistence for the MTX workflow matrix service.
//!
//! A workflow owns at most one table. This crate stores and retrieves
//! tables by [`WorkflowId`](mtx_types::WorkflowId), translates between the
//! wire format and the in-memory model, and normalizes date/time-like text
//! columns on the way in.
//!
//! # Storage Backends
//!
//! All backends implement the [`TableStore`] trait:
//!
//! - [`InMemoryTableStore`] — `HashMap`-based store for tests and embedding
//! - [`FsTableStore`] — one JSON document per workflow, atomic replacement
//!
//! # Design Rules
//!
//! 1. At most one table per workflow; `store` replaces wholesale.
//! 2. Replacement is all-or-nothing (replace-then-commit), never
//!    incremental column writes.
//! 3. Date/time detection runs at the storage boundary, not inside the
//!    merge engine.
//! 4. All I/O errors are propagated, never silently ignored; no retries.

pub mod config;
pub mod datetime;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;
pub mod wire;

pub use config::IngestConfig;
pub use datetime::{detect_datetime_columns, parse_datetime};
pub use error::{StoreError, StoreResult, TableTranslationError};
pub use fs::FsTableStore;
pub use memory::InMemoryTableStore;
pub use traits::TableStore;
pub use wire::TableDocument;
