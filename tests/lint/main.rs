//! Integration tests for the OpenTelemetry span lint.
//!
//! Each module contains individual #[test] functions over single-file Go
//! fixtures written to a tempdir, exercising the full parse -> lint -> fix
//! pipeline.

mod exemptions;
mod format;
mod handler;
mod missing_span;
mod utils;
