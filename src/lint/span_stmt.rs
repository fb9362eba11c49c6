use crate::ast::{Body, Expr, GoType, Span, Stmt, TypeInfo};

/// A located span-opening statement.
#[derive(Clone, Debug)]
pub struct SpanStart {
	/// The unquoted literal span name and its full source range, when the
	/// name argument is a plain string literal. A computed name is never
	/// validated.
	pub name_lit: Option<(String, Span)>,
	/// Index among the body's immediate statements. Informational only; fix
	/// placement does not depend on it.
	pub stmt_index: usize,
}

/// Scans the body's immediate statements for an assignment of the
/// `(context.Context, trace.Span)` pair from a `.Start(...)` call. Statements
/// nested inside blocks are intentionally invisible.
pub fn find_span_start(body: &Body, types: &dyn TypeInfo) -> Option<SpanStart> {
	for (stmt_index, stmt) in body.stmts.iter().enumerate() {
		let Stmt::Assign { rhs, .. } = stmt else { continue };
		if rhs.len() != 1 {
			continue;
		}
		let expr = &rhs[0];
		match types.type_of(expr.id()) {
			Some(ty) if *ty == GoType::span_start_tuple() => {}
			_ => continue,
		}
		let Expr::Call { fun, args, .. } = expr else { continue };
		let Expr::Selector { sel, .. } = fun.as_ref() else { continue };
		if sel != "Start" {
			continue;
		}

		let name_lit = match args.get(1) {
			Some(Expr::StringLit { value, span, .. }) => Some((value.clone(), *span)),
			_ => None,
		};
		return Some(SpanStart { name_lit, stmt_index });
	}
	None
}
