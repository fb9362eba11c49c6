//! Test utilities for spanlint integration tests.

use std::fs;

use spanlint::{config::LintConfig, lint};

/// Lint a single-file Go fixture written to a tempdir.
pub fn lint_fixture(src: &str, cfg: &LintConfig) -> Vec<lint::Diagnostic> {
	let dir = tempfile::tempdir().expect("failed to create tempdir");
	fs::write(dir.path().join("main.go"), src).expect("failed to write fixture");

	let files = lint::collect_go_files(dir.path());
	files.iter().flat_map(|f| lint::lint_file(cfg, f)).collect()
}

/// Assert that a fixture produces no diagnostics.
#[track_caller]
pub fn assert_check_passing(src: &str, cfg: &LintConfig) {
	let diags = lint_fixture(src, cfg);
	if !diags.is_empty() {
		let msgs: Vec<String> = diags.iter().map(|d| format!("{}: {}", d.line, d.message)).collect();
		panic!("expected no diagnostics, but found {}:\n{}", diags.len(), msgs.join("\n"));
	}
}

/// Run the lint and render diagnostics one per line, for snapshot testing.
#[track_caller]
pub fn simulate_check(src: &str, cfg: &LintConfig) -> String {
	let diags = lint_fixture(src, cfg);
	assert!(!diags.is_empty(), "simulate_check called but no diagnostics found - use assert_check_passing instead");

	diags
		.iter()
		.map(|d| format!("[{}] /main.go:{}: {}", lint::RULE, d.line, d.message))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Run `spanlint format` over a fixture and return the file after all fixes.
pub fn simulate_format(src: &str, cfg: &LintConfig) -> String {
	let dir = tempfile::tempdir().expect("failed to create tempdir");
	let path = dir.path().join("main.go");
	fs::write(&path, src).expect("failed to write fixture");

	lint::run_format(dir.path(), cfg).expect("run_format failed");

	fs::read_to_string(&path).expect("failed to read fixture back")
}
