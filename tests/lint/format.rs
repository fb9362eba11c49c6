use spanlint::config::LintConfig;

use crate::utils::{assert_check_passing, lint_fixture, simulate_format};

fn cfg() -> LintConfig {
	LintConfig::default()
}

#[test]
fn applying_all_fixes_reaches_a_fixed_point() {
	let src = r#"package lint

import (
	"context"
)

func A(ctx context.Context) {
	work(ctx)
}

func B(ctx context.Context) {
	ctx, span := tracer().Start(ctx, "wrong")
	defer span.End()
	work(ctx)
}
"#;
	let fixed = simulate_format(src, &cfg());

	assert_check_passing(&fixed, &cfg());
	assert!(fixed.contains(r#"tracer().Start(ctx, "A")"#), "missing-span fix not applied:\n{fixed}");
	assert!(fixed.contains(r#"tracer().Start(ctx, "B")"#), "misspelled fix not applied:\n{fixed}");

	// A second format pass changes nothing.
	assert_eq!(simulate_format(&fixed, &cfg()), fixed);
}

#[test]
fn generated_files_are_left_alone() {
	let src = r#"// Code generated by protoc-gen-go. DO NOT EDIT.
package lint

import (
	"context"
)

func F(ctx context.Context) {
	work(ctx)
}
"#;
	assert!(lint_fixture(src, &cfg()).is_empty());
	assert_eq!(simulate_format(src, &cfg()), src);
}

#[test]
fn only_the_first_comment_marks_a_file_generated() {
	let src = r#"// Package lint exercises the span rule.
package lint

import (
	"context"
)

// DO NOT EDIT the behavior of F lightly.
func F(ctx context.Context) {
	work(ctx)
}
"#;
	let diags = lint_fixture(src, &cfg());
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].message, "Missing OpenTelemetry span for `F`");
}
