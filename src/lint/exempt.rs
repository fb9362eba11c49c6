//! Exemptions for functions whose relationship to the context is wrapping or
//! reading values, not instrumented work. The instrumentation for those
//! belongs to their callers.

use super::context_arg::ContextRef;
use crate::ast::{BodyTok, FuncDecl, GoType};

/// A function that produces a `context.Context` is a builder/wrapper.
pub fn returns_context(func: &FuncDecl) -> bool {
	func.results.iter().any(|ty| *ty == GoType::context())
}

/// Checks whether the context binding is referenced in, and only in,
/// `.Value(...)` calls.
///
/// Counts every syntactic reference to the binding across the whole body, and
/// separately every reference that is the receiver of a `Value` call (each of
/// those is already included in the first count). If only `Value` receivers
/// occur, the two counts are equal.
pub fn uses_context_value_only(func: &FuncDecl, context_ref: &ContextRef) -> bool {
	// A synthesized binding has no name in source, so the body cannot
	// reference it; derived references are not bindings at all.
	let ContextRef::Direct { name, synthesized: false } = context_ref else {
		return false;
	};
	let Some(body) = &func.body else {
		return false;
	};

	let mut references = 0usize;
	let mut value_receivers = 0usize;
	for (i, tok) in body.toks.iter().enumerate() {
		let BodyTok::Ident(text) = tok else { continue };
		if text != name {
			continue;
		}
		// A selector field like `req.ctx` is not a reference to the binding.
		if i > 0 && matches!(body.toks[i - 1], BodyTok::Punct(".")) {
			continue;
		}
		references += 1;
		if matches!(body.toks.get(i + 1), Some(BodyTok::Punct(".")))
			&& matches!(body.toks.get(i + 2), Some(BodyTok::Ident(sel)) if sel == "Value")
			&& matches!(body.toks.get(i + 3), Some(BodyTok::Punct("(")))
		{
			value_receivers += 1;
		}
	}

	value_receivers > 0 && references == value_receivers
}
