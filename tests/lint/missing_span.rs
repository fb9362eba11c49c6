use spanlint::config::LintConfig;

use crate::utils::{assert_check_passing, simulate_check, simulate_format};

fn cfg() -> LintConfig {
	LintConfig::default()
}

// === Passing cases ===

#[test]
fn span_ok_passes() {
	assert_check_passing(
		r#"package lint

import (
	"context"
	"database/sql"
)

func SpanOk(ctx context.Context, db *sql.DB) error {
	ctx, span := tracer().Start(ctx, "SpanOk")
	defer span.End()

	row := db.QueryRowContext(ctx, `SELECT * FROM sample_text`)
	return row.Err()
}
"#,
		&cfg(),
	);
}

#[test]
fn function_without_context_passes() {
	assert_check_passing(
		r#"package lint

func Add(a, b int) int {
	return a + b
}
"#,
		&cfg(),
	);
}

// === Violation cases ===

#[test]
fn missing_span_on_pointer_method() {
	let src = r#"package lint

import (
	"context"
)

type querier struct {
	db *sql.DB
}

func (q *querier) Query(ctx context.Context) error {
	row := q.db.QueryRowContext(ctx, `SELECT * FROM sample_text`)
	return row.Err()
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:11: Missing OpenTelemetry span for `(*querier).Query`");

	let fixed = simulate_format(src, &cfg());
	assert_eq!(
		fixed,
		r#"package lint

import (
	"context"
)

type querier struct {
	db *sql.DB
}

func (q *querier) Query(ctx context.Context) error {
	ctx, span := tracer().Start(ctx, "(*querier).Query")
defer span.End()

row := q.db.QueryRowContext(ctx, `SELECT * FROM sample_text`)
	return row.Err()
}
"#
	);
	assert_check_passing(&fixed, &cfg());
}

#[test]
fn missing_span_with_unnamed_context_parameter() {
	let src = r#"package lint

import (
	"context"
)

func ContextNotNamed(context.Context) {
	a := 1
	_ = a
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:7: Missing OpenTelemetry span for `ContextNotNamed`");

	// The fix references a synthesized `ctx`; existing uses of the parameter
	// (there are none by construction) are not rewritten.
	let fixed = simulate_format(src, &cfg());
	assert_eq!(
		fixed,
		r#"package lint

import (
	"context"
)

func ContextNotNamed(context.Context) {
	ctx, span := tracer().Start(ctx, "ContextNotNamed")
defer span.End()

a := 1
	_ = a
}
"#
	);
	assert_check_passing(&fixed, &cfg());
}

#[test]
fn missing_span_in_empty_function() {
	let src = r#"package lint

import (
	"context"
)

func EmptyFunction(ctx context.Context) {
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:7: Missing OpenTelemetry span for `EmptyFunction`");

	let fixed = simulate_format(src, &cfg());
	assert_eq!(
		fixed,
		r#"package lint

import (
	"context"
)

func EmptyFunction(ctx context.Context) {
ctx, span := tracer().Start(ctx, "EmptyFunction")
defer span.End()

}
"#
	);
	assert_check_passing(&fixed, &cfg());
}

#[test]
fn span_nested_in_block_does_not_count() {
	let src = r#"package lint

import (
	"context"
)

func Nested(ctx context.Context) error {
	if condition {
		ctx, span := tracer().Start(ctx, "Nested")
		defer span.End()
		_ = ctx
		_ = span
	}
	return nil
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:7: Missing OpenTelemetry span for `Nested`");
}

#[test]
fn diagnostics_follow_declaration_order() {
	let src = r#"package lint

import (
	"context"
)

func First(ctx context.Context) {
	work(ctx)
}

func Second(ctx context.Context) {
	work(ctx)
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @r"
	[opentelemetry] /main.go:7: Missing OpenTelemetry span for `First`
	[opentelemetry] /main.go:11: Missing OpenTelemetry span for `Second`
	");
}
