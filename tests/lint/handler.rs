use spanlint::config::LintConfig;

use crate::utils::{assert_check_passing, simulate_check, simulate_format};

fn cfg() -> LintConfig {
	LintConfig::default()
}

#[test]
fn handler_missing_span() {
	let src = r#"package lint

import (
	"fmt"
	"net/http"
)

func Index(w http.ResponseWriter, r *http.Request) {
	fmt.Fprintf(w, "hi")
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:8: Missing OpenTelemetry span for `Index`");

	// The context expression comes from the request parameter.
	let fixed = simulate_format(src, &cfg());
	assert_eq!(
		fixed,
		r#"package lint

import (
	"fmt"
	"net/http"
)

func Index(w http.ResponseWriter, r *http.Request) {
	ctx, span := tracer().Start(r.Context(), "Index")
defer span.End()

fmt.Fprintf(w, "hi")
}
"#
	);
	assert_check_passing(&fixed, &cfg());
}

#[test]
fn handler_misspelled_span() {
	let src = r#"package lint

import (
	"fmt"
	"net/http"
)

func Index(w http.ResponseWriter, r *http.Request) {
	ctx, span := tracer().Start(r.Context(), "index")
	defer span.End()
	_ = ctx

	fmt.Fprintf(w, "hi")
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:9: OpenTelemetry span misspelled, expected `Index`");
}

#[test]
fn handler_with_span_passes() {
	assert_check_passing(
		r#"package lint

import (
	"fmt"
	"net/http"
)

func Index(w http.ResponseWriter, r *http.Request) {
	ctx, span := tracer().Start(r.Context(), "Index")
	defer span.End()
	_ = ctx

	fmt.Fprintf(w, "hi")
}
"#,
		&cfg(),
	);
}

#[test]
fn other_two_parameter_shapes_are_ignored() {
	assert_check_passing(
		r#"package lint

import (
	"net/http"
)

func NotAHandler(w http.ResponseWriter, s string) {
	serve(w, s)
}
"#,
		&cfg(),
	);
}
