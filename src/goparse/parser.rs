//! Best-effort Go parser producing the [`crate::ast`] model.
//!
//! Only function declarations are shaped in full (receiver, parameters,
//! results, top-level body statements). Everything else is skipped with
//! bracket-depth tracking. Parameter and result types are resolved against
//! the file's import table; right-hand sides of two-value assignments from a
//! `.Start(...)` call are typed syntax-directed, standing in for the type
//! checker the Go toolchain would provide.

use std::collections::HashMap;

use color_eyre::eyre::{Result, bail};

use super::lexer::{self, Tok, TokKind};
use crate::ast::{Body, BodyTok, Expr, ExprId, File, FuncDecl, GoType, Param, Receiver, Span, Stmt, TypeTable};

pub fn parse_file(src: &str) -> Result<(File, TypeTable)> {
	let (toks, comments) = lexer::lex(src);
	if !toks.first().is_some_and(|t| t.is_ident("package")) {
		bail!("missing package clause");
	}
	let mut parser = Parser {
		toks: &toks,
		imports: HashMap::new(),
		types: TypeTable::default(),
		next_expr_id: 0,
	};
	let decls = parser.parse();
	Ok((File { decls, comments }, parser.types))
}

struct Parser<'a> {
	toks: &'a [Tok],
	/// package alias -> full import path
	imports: HashMap<String, String>,
	types: TypeTable,
	next_expr_id: u32,
}

impl<'a> Parser<'a> {
	fn parse(&mut self) -> Vec<FuncDecl> {
		// Skip the package clause.
		let mut i = 0;
		while i < self.toks.len() && self.toks[i].kind != TokKind::Semi {
			i += 1;
		}
		i += 1;

		let mut decls = Vec::new();
		let mut depth = 0i32;
		let mut at_boundary = true;
		while i < self.toks.len() {
			if depth == 0 && at_boundary && self.toks[i].is_ident("import") {
				i = self.parse_import(i);
				at_boundary = true;
				continue;
			}
			if depth == 0
				&& at_boundary
				&& self.toks[i].is_ident("func")
				&& let Some((decl, next)) = self.parse_func(i)
			{
				decls.push(decl);
				i = next;
				at_boundary = true;
				continue;
			}
			if let TokKind::Punct(p) = self.toks[i].kind {
				match p {
					"(" | "[" | "{" => depth += 1,
					")" | "]" | "}" => depth -= 1,
					_ => {}
				}
			}
			at_boundary = depth == 0 && self.toks[i].kind == TokKind::Semi;
			i += 1;
		}
		decls
	}

	fn parse_import(&mut self, i: usize) -> usize {
		let mut i = i + 1;
		if self.at_punct(i, "(") {
			i += 1;
			while i < self.toks.len() && !self.toks[i].is_punct(")") {
				if self.toks[i].kind == TokKind::Semi {
					i += 1;
					continue;
				}
				i = self.parse_import_entry(i);
			}
			(i + 1).min(self.toks.len())
		} else {
			self.parse_import_entry(i)
		}
	}

	fn parse_import_entry(&mut self, i: usize) -> usize {
		let mut i = i;
		let mut alias: Option<String> = None;
		let mut blank = false;
		match self.toks.get(i) {
			Some(t) if t.kind == TokKind::Ident => {
				if t.text == "_" { blank = true } else { alias = Some(t.text.clone()) }
				i += 1;
			}
			Some(t) if t.is_punct(".") => {
				blank = true;
				i += 1;
			}
			_ => {}
		}
		if let Some(TokKind::Str { value }) = self.toks.get(i).map(|t| &t.kind) {
			let path = value.clone();
			if !blank {
				let alias = alias.unwrap_or_else(|| path.rsplit('/').next().unwrap_or(&path).to_string());
				self.imports.insert(alias, path);
			}
			i += 1;
		}
		while i < self.toks.len() && self.toks[i].kind != TokKind::Semi && !self.toks[i].is_punct(")") {
			i += 1;
		}
		if i < self.toks.len() && self.toks[i].kind == TokKind::Semi {
			i += 1;
		}
		i
	}

	/// Parse one `func` declaration starting at the `func` keyword.
	/// Returns `None` when the shape doesn't match a declaration; the caller
	/// then resumes its skip scan.
	fn parse_func(&mut self, i: usize) -> Option<(FuncDecl, usize)> {
		let func_pos = self.toks[i].span.start;
		let mut i = i + 1;

		let mut receiver = None;
		if self.at_punct(i, "(") {
			let (grp, next) = group(self.toks, i)?;
			// A method has the function name right after the receiver group;
			// anything else (a function literal) is not a declaration.
			let name_follows = self.toks.get(next).is_some_and(|t| t.kind == TokKind::Ident && !t.is_keyword());
			if !name_follows {
				return None;
			}
			receiver = Some(parse_receiver(grp)?);
			i = next;
		}

		let name_tok = self.toks.get(i)?;
		if name_tok.kind != TokKind::Ident || name_tok.is_keyword() {
			return None;
		}
		let name = name_tok.text.clone();
		i += 1;

		if self.at_punct(i, "[") {
			let (_, next) = group(self.toks, i)?;
			i = next;
		}

		if !self.at_punct(i, "(") {
			return None;
		}
		let (param_toks, next) = group(self.toks, i)?;
		let params = self.parse_params(param_toks);
		i = next;

		let mut results = Vec::new();
		if self.at_punct(i, "(") {
			let (res_toks, next) = group(self.toks, i)?;
			results = self.parse_params(res_toks).into_iter().map(|p| p.ty).collect();
			i = next;
		} else if !self.at_punct(i, "{") && self.toks.get(i).is_some_and(|t| t.kind != TokKind::Semi) {
			let start = i;
			let mut depth = 0i32;
			while i < self.toks.len() {
				let t = &self.toks[i];
				if depth == 0 && (t.is_punct("{") || t.kind == TokKind::Semi) {
					break;
				}
				if let TokKind::Punct(p) = t.kind {
					match p {
						"(" | "[" => depth += 1,
						")" | "]" => depth -= 1,
						_ => {}
					}
				}
				i += 1;
			}
			results.push(self.parse_type(&self.toks[start..i]));
		}

		let mut body = None;
		if self.at_punct(i, "{") {
			let (body_toks, next) = group(self.toks, i)?;
			let lbrace = self.toks[i].span.start;
			let rbrace = self.toks[next - 1].span.start;
			body = Some(self.parse_body(body_toks, lbrace, rbrace));
			i = next;
		}

		Some((FuncDecl { name, func_pos, receiver, params, results, body }, i))
	}

	/// Parses both parameter and (parenthesized) result lists; results come
	/// out as unnamed or named params whose types are what matters.
	fn parse_params(&mut self, toks: &[Tok]) -> Vec<Param> {
		let segments = split_commas(toks);
		if segments.is_empty() {
			return Vec::new();
		}
		if !segments.iter().any(|s| is_named_segment(s)) {
			return segments.into_iter().map(|s| Param { name: None, ty: self.parse_type(s) }).collect();
		}
		// Named list. Single idents share the type of the next typed segment,
		// e.g. `(a, b string)`.
		let mut params: Vec<Param> = Vec::new();
		let mut pending = 0usize;
		for seg in &segments {
			if seg.len() == 1 && seg[0].kind == TokKind::Ident && !seg[0].is_keyword() {
				params.push(Param {
					name: param_name(&seg[0]),
					ty: GoType::Opaque(String::new()),
				});
				pending += 1;
			} else if is_named_segment(seg) {
				let ty = self.parse_type(&seg[1..]);
				for p in params.iter_mut().rev().take(pending) {
					p.ty = ty.clone();
				}
				pending = 0;
				params.push(Param { name: param_name(&seg[0]), ty });
			} else {
				params.push(Param { name: None, ty: self.parse_type(seg) });
				pending = 0;
			}
		}
		params
	}

	fn parse_type(&self, toks: &[Tok]) -> GoType {
		match toks {
			[] => GoType::Opaque(String::new()),
			[t] if t.kind == TokKind::Ident && !t.is_keyword() => GoType::named("", &t.text),
			[star, rest @ ..] if star.is_punct("*") => GoType::Pointer(Box::new(self.parse_type(rest))),
			[a, dot, b] if a.kind == TokKind::Ident && dot.is_punct(".") && b.kind == TokKind::Ident => {
				let pkg = self.imports.get(&a.text).cloned().unwrap_or_else(|| a.text.clone());
				GoType::Named { pkg, name: b.text.clone() }
			}
			_ => GoType::Opaque(toks.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")),
		}
	}

	fn parse_body(&mut self, toks: &[Tok], lbrace: usize, rbrace: usize) -> Body {
		let mut stmts = Vec::new();
		let mut depth = 0i32;
		let mut start = 0;
		for (i, t) in toks.iter().enumerate() {
			match &t.kind {
				TokKind::Punct(p) => match *p {
					"(" | "[" | "{" => depth += 1,
					")" | "]" | "}" => depth -= 1,
					_ => {}
				},
				TokKind::Semi if depth == 0 => {
					if i > start {
						stmts.push(self.make_stmt(&toks[start..i]));
					}
					start = i + 1;
				}
				_ => {}
			}
		}
		if start < toks.len() {
			stmts.push(self.make_stmt(&toks[start..]));
		}

		let flat = toks
			.iter()
			.map(|t| match &t.kind {
				TokKind::Ident => BodyTok::Ident(t.text.clone()),
				TokKind::Punct(p) => BodyTok::Punct(p),
				_ => BodyTok::Lit,
			})
			.collect();

		Body { lbrace, rbrace, stmts, toks: flat }
	}

	fn make_stmt(&mut self, piece: &[Tok]) -> Stmt {
		let span = Span::new(piece[0].span.start, piece[piece.len() - 1].span.end);
		// Keyword-headed statements (if/for/defer/return/...) stay opaque, so
		// assignments nested in their blocks are invisible here.
		if piece[0].is_keyword() {
			return Stmt::Other { span };
		}
		let mut depth = 0i32;
		for (i, t) in piece.iter().enumerate() {
			if let TokKind::Punct(p) = t.kind {
				match p {
					"(" | "[" | "{" => depth += 1,
					")" | "]" | "}" => depth -= 1,
					":=" | "=" if depth == 0 => {
						let define = p == ":=";
						let lhs: Vec<Expr> = split_commas(&piece[..i]).into_iter().map(|s| self.parse_expr(s)).collect();
						let rhs: Vec<Expr> = split_commas(&piece[i + 1..]).into_iter().map(|s| self.parse_expr(s)).collect();
						self.infer_assign_types(lhs.len(), &rhs);
						return Stmt::Assign { lhs, rhs, define, span };
					}
					_ => {}
				}
			}
		}
		Stmt::Other { span }
	}

	/// Syntax-directed stand-in for the type checker: a two-value assignment
	/// from a `.Start(...)` call gets the `(context.Context, trace.Span)`
	/// result shape.
	fn infer_assign_types(&mut self, lhs_len: usize, rhs: &[Expr]) {
		if lhs_len == 2
			&& rhs.len() == 1
			&& let Expr::Call { id, fun, args, .. } = &rhs[0]
			&& let Expr::Selector { sel, .. } = fun.as_ref()
			&& sel == "Start"
			&& args.len() >= 2
		{
			self.types.insert(*id, GoType::span_start_tuple());
		}
	}

	fn parse_expr(&mut self, toks: &[Tok]) -> Expr {
		let Some(first) = toks.first() else {
			return Expr::Opaque { id: self.fresh(), span: Span::new(0, 0) };
		};
		let full_span = Span::new(first.span.start, toks[toks.len() - 1].span.end);
		match self.parse_operand(toks) {
			Some((expr, used)) if used == toks.len() => expr,
			_ => Expr::Opaque { id: self.fresh(), span: full_span },
		}
	}

	fn parse_operand(&mut self, toks: &[Tok]) -> Option<(Expr, usize)> {
		let first = toks.first()?;
		let (mut expr, mut i) = match &first.kind {
			TokKind::Ident if !first.is_keyword() => (
				Expr::Ident {
					id: self.fresh(),
					name: first.text.clone(),
					span: first.span,
				},
				1,
			),
			TokKind::Str { value } => (
				Expr::StringLit {
					id: self.fresh(),
					value: value.clone(),
					span: first.span,
				},
				1,
			),
			TokKind::Number | TokKind::Rune => (Expr::Opaque { id: self.fresh(), span: first.span }, 1),
			TokKind::Punct("(") => {
				let (inner, next) = group(toks, 0)?;
				(self.parse_expr(inner), next)
			}
			_ => return None,
		};
		loop {
			match (toks.get(i), toks.get(i + 1)) {
				(Some(dot), Some(name)) if dot.is_punct(".") && name.kind == TokKind::Ident && !name.is_keyword() => {
					let span = Span::new(toks[0].span.start, name.span.end);
					expr = Expr::Selector {
						id: self.fresh(),
						recv: Box::new(expr),
						sel: name.text.clone(),
						span,
					};
					i += 2;
				}
				(Some(open), _) if open.is_punct("(") => {
					let (inner, next) = group(toks, i)?;
					let args: Vec<Expr> = split_commas(inner).into_iter().map(|s| self.parse_expr(s)).collect();
					let span = Span::new(toks[0].span.start, toks[next - 1].span.end);
					expr = Expr::Call {
						id: self.fresh(),
						fun: Box::new(expr),
						args,
						span,
					};
					i = next;
				}
				(Some(open), _) if open.is_punct("[") => {
					let (_, next) = group(toks, i)?;
					let span = Span::new(toks[0].span.start, toks[next - 1].span.end);
					expr = Expr::Opaque { id: self.fresh(), span };
					i = next;
				}
				_ => break,
			}
		}
		Some((expr, i))
	}

	fn at_punct(&self, i: usize, p: &str) -> bool {
		self.toks.get(i).is_some_and(|t| t.is_punct(p))
	}

	fn fresh(&mut self) -> ExprId {
		let id = ExprId(self.next_expr_id);
		self.next_expr_id += 1;
		id
	}
}

fn parse_receiver(grp: &[Tok]) -> Option<Receiver> {
	let mut rest = grp;
	// Optional receiver name, e.g. `q *querier`.
	if rest.len() >= 2 && rest[0].kind == TokKind::Ident && !rest[0].is_keyword() && (rest[1].is_punct("*") || rest[1].kind == TokKind::Ident) {
		rest = &rest[1..];
	}
	let pointer = rest.first().is_some_and(|t| t.is_punct("*"));
	if pointer {
		rest = &rest[1..];
	}
	let type_name = rest.iter().find(|t| t.kind == TokKind::Ident)?.text.clone();
	Some(Receiver { pointer, type_name })
}

fn param_name(tok: &Tok) -> Option<String> {
	if tok.text == "_" { None } else { Some(tok.text.clone()) }
}

/// A segment like `ctx context.Context` (name followed by a type), as opposed
/// to a bare type like `context.Context` or `*http.Request`.
fn is_named_segment(seg: &[Tok]) -> bool {
	seg.len() >= 2 && seg[0].kind == TokKind::Ident && !seg[0].is_keyword() && !seg[1].is_punct(".")
}

/// Tokens inside the bracket group opening at `i`, plus the index past the close.
fn group(toks: &[Tok], i: usize) -> Option<(&[Tok], usize)> {
	let mut depth = 0i32;
	let mut j = i;
	while j < toks.len() {
		if let TokKind::Punct(p) = toks[j].kind {
			match p {
				"(" | "[" | "{" => depth += 1,
				")" | "]" | "}" => {
					depth -= 1;
					if depth == 0 {
						return Some((&toks[i + 1..j], j + 1));
					}
				}
				_ => {}
			}
		}
		j += 1;
	}
	None
}

fn split_commas(toks: &[Tok]) -> Vec<&[Tok]> {
	let mut out = Vec::new();
	let mut depth = 0i32;
	let mut start = 0;
	for (i, t) in toks.iter().enumerate() {
		if let TokKind::Punct(p) = t.kind {
			match p {
				"(" | "[" | "{" => depth += 1,
				")" | "]" | "}" => depth -= 1,
				"," if depth == 0 => {
					if i > start {
						out.push(&toks[start..i]);
					}
					start = i + 1;
				}
				_ => {}
			}
		}
	}
	if start < toks.len() {
		out.push(&toks[start..]);
	}
	out
}
