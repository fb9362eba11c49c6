//! The pre-resolved Go declaration/type model the lint operates on.
//!
//! This is deliberately a small subset of Go's syntax: function declarations
//! with resolved parameter/return types, and just enough body structure to
//! recognize top-level assignments. Everything the lint does not need to
//! understand stays opaque. The model is built by [`crate::goparse`], but the
//! lint itself only depends on these types plus the [`TypeInfo`] capability,
//! so it can be driven from hand-built trees in tests.

use std::collections::HashMap;

/// Byte range into the original source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}
}

/// Identity of an expression node, assigned by whatever built the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ExprId(pub u32);

/// A resolved Go type. `pkg` is the full import path, empty for builtins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GoType {
	Named { pkg: String, name: String },
	Pointer(Box<GoType>),
	Tuple(Vec<GoType>),
	/// Anything structural understanding is not needed for (slices, maps, func types, ...).
	Opaque(String),
}

impl GoType {
	pub fn named(pkg: &str, name: &str) -> Self {
		Self::Named { pkg: pkg.to_string(), name: name.to_string() }
	}

	/// `context.Context`
	pub fn context() -> Self {
		Self::named("context", "Context")
	}

	/// `net/http.ResponseWriter`
	pub fn response_writer() -> Self {
		Self::named("net/http", "ResponseWriter")
	}

	/// `*net/http.Request`
	pub fn request() -> Self {
		Self::Pointer(Box::new(Self::named("net/http", "Request")))
	}

	/// `go.opentelemetry.io/otel/trace.Span`
	pub fn otel_span() -> Self {
		Self::named("go.opentelemetry.io/otel/trace", "Span")
	}

	/// The result shape of `trace.Tracer.Start`: `(context.Context, trace.Span)`
	pub fn span_start_tuple() -> Self {
		Self::Tuple(vec![Self::context(), Self::otel_span()])
	}
}

#[derive(Clone, Debug)]
pub enum Expr {
	Ident { id: ExprId, name: String, span: Span },
	/// `value` is the text between the quotes, kept verbatim (escapes are not interpreted).
	StringLit { id: ExprId, value: String, span: Span },
	Selector { id: ExprId, recv: Box<Expr>, sel: String, span: Span },
	Call { id: ExprId, fun: Box<Expr>, args: Vec<Expr>, span: Span },
	Opaque { id: ExprId, span: Span },
}

impl Expr {
	pub fn id(&self) -> ExprId {
		match self {
			Expr::Ident { id, .. } | Expr::StringLit { id, .. } | Expr::Selector { id, .. } | Expr::Call { id, .. } | Expr::Opaque { id, .. } => *id,
		}
	}

	pub fn span(&self) -> Span {
		match self {
			Expr::Ident { span, .. } | Expr::StringLit { span, .. } | Expr::Selector { span, .. } | Expr::Call { span, .. } | Expr::Opaque { span, .. } => *span,
		}
	}
}

#[derive(Clone, Debug)]
pub enum Stmt {
	Assign { lhs: Vec<Expr>, rhs: Vec<Expr>, define: bool, span: Span },
	Other { span: Span },
}

impl Stmt {
	pub fn span(&self) -> Span {
		match self {
			Stmt::Assign { span, .. } | Stmt::Other { span, .. } => *span,
		}
	}
}

/// Flattened body token, kept so classifiers can scan the whole body
/// (including statements the parser left opaque) for identifier references.
#[derive(Clone, Debug)]
pub enum BodyTok {
	Ident(String),
	Punct(&'static str),
	/// String/number/rune literal. Contents are irrelevant to the scans.
	Lit,
}

#[derive(Clone, Debug)]
pub struct Body {
	pub lbrace: usize,
	pub rbrace: usize,
	/// Immediate statements only; nested blocks live inside `Stmt::Other`.
	pub stmts: Vec<Stmt>,
	pub toks: Vec<BodyTok>,
}

#[derive(Clone, Debug)]
pub struct Receiver {
	pub pointer: bool,
	/// Type name without any package qualifier (last path segment only).
	pub type_name: String,
}

#[derive(Clone, Debug)]
pub struct Param {
	/// `None` for unnamed and blank (`_`) parameters.
	pub name: Option<String>,
	pub ty: GoType,
}

#[derive(Clone, Debug)]
pub struct FuncDecl {
	pub name: String,
	/// Offset of the `func` keyword; diagnostics for the whole function anchor here.
	pub func_pos: usize,
	pub receiver: Option<Receiver>,
	pub params: Vec<Param>,
	pub results: Vec<GoType>,
	pub body: Option<Body>,
}

#[derive(Clone, Debug)]
pub struct Comment {
	/// Full comment text including the `//` or `/* */` markers.
	pub text: String,
	pub offset: usize,
}

#[derive(Clone, Debug, Default)]
pub struct File {
	pub decls: Vec<FuncDecl>,
	pub comments: Vec<Comment>,
}

/// Capability to resolve the static type of an expression node.
///
/// The front end fills a [`TypeTable`]; tests can implement this over a
/// hand-built map without any parser involved.
pub trait TypeInfo {
	fn type_of(&self, id: ExprId) -> Option<&GoType>;
}

#[derive(Clone, Debug, Default)]
pub struct TypeTable {
	types: HashMap<ExprId, GoType>,
}

impl TypeTable {
	pub fn insert(&mut self, id: ExprId, ty: GoType) {
		self.types.insert(id, ty);
	}
}

impl TypeInfo for TypeTable {
	fn type_of(&self, id: ExprId) -> Option<&GoType> {
		self.types.get(&id)
	}
}
