//! spanlint: a linter for Go services that use OpenTelemetry
//! instrumentation. It can locate and fix missing spans and spans whose name
//! does not match the function they are in.

pub mod ast;
pub mod config;
pub mod goparse;
pub mod lint;
