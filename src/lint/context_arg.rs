use crate::ast::{FuncDecl, GoType};

/// An expression that evaluates to the context reachable at the top of a
/// function body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContextRef {
	/// The context parameter's own identifier. `synthesized` marks the
	/// unnamed-parameter fallback `ctx`, which exists only in fix text; other
	/// uses inside the body are never rewritten to match.
	Direct { name: String, synthesized: bool },
	/// An accessor call on another parameter, e.g. `r.Context()`.
	Derived { expr: String },
}

impl ContextRef {
	/// Source text usable as the span-start call's context argument.
	pub fn source_text(&self) -> &str {
		match self {
			ContextRef::Direct { name, .. } => name,
			ContextRef::Derived { expr } => expr,
		}
	}
}

/// Returns the expression that can be used to obtain the context passed to
/// `func`, or `None` when the function is not an instrumentation candidate.
///
/// Priority order, not a search: a `context.Context` first parameter wins,
/// then the `net/http` handler shape; nothing else qualifies.
pub fn find_context_argument(func: &FuncDecl) -> Option<ContextRef> {
	if let Some(first) = func.params.first()
		&& first.ty == GoType::context()
	{
		return Some(match &first.name {
			Some(name) => ContextRef::Direct { name: name.clone(), synthesized: false },
			None => ContextRef::Direct { name: "ctx".to_string(), synthesized: true },
		});
	}

	if func.params.len() == 2 && func.params[0].ty == GoType::response_writer() && func.params[1].ty == GoType::request() {
		// An unnamed request parameter leaves nothing to call Context() on.
		let name = func.params[1].name.as_ref()?;
		return Some(ContextRef::Derived { expr: format!("{name}.Context()") });
	}

	None
}
