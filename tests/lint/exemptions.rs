use spanlint::config::LintConfig;

use crate::utils::{assert_check_passing, simulate_check};

fn cfg() -> LintConfig {
	LintConfig::default()
}

#[test]
fn context_builder_is_exempt() {
	assert_check_passing(
		r#"package lint

import (
	"context"
)

func AddToContext(ctx context.Context, thing string) context.Context {
	return context.WithValue(ctx, 1337, thing)
}
"#,
		&cfg(),
	);
}

#[test]
fn fallible_context_builder_is_exempt() {
	assert_check_passing(
		r#"package lint

import (
	"context"
)

func AddToContextButCanFail(ctx context.Context, thing string) (context.Context, error) {
	return context.WithValue(ctx, 1337, thing), nil
}
"#,
		&cfg(),
	);
}

#[test]
fn value_accessor_is_exempt() {
	assert_check_passing(
		r#"package lint

import (
	"context"
)

func GetFromContext(ctx context.Context) string {
	return ctx.Value(1337).(string)
}
"#,
		&cfg(),
	);
}

#[test]
fn context_used_beyond_value_is_flagged() {
	let src = r#"package lint

import (
	"context"
)

func UserName(ctx context.Context) string {
	name := ctx.Value(1337).(string)
	audit(ctx, name)
	return name
}
"#;
	insta::assert_snapshot!(simulate_check(src, &cfg()), @"[opentelemetry] /main.go:7: Missing OpenTelemetry span for `UserName`");
}

#[test]
fn no_context_means_no_diagnostic_regardless_of_body() {
	assert_check_passing(
		r#"package lint

func NoContext(a int) int {
	_, span := tracer().Start(background(), "WrongName")
	defer span.End()
	return a
}
"#,
		&cfg(),
	);
}
