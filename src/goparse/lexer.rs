//! Go lexer: tokens with byte offsets, automatic semicolon insertion, and
//! comments split out of the token stream.

use crate::ast::{Comment, Span};

pub const GO_KEYWORDS: &[&str] = &[
	"break",
	"case",
	"chan",
	"const",
	"continue",
	"default",
	"defer",
	"else",
	"fallthrough",
	"for",
	"func",
	"go",
	"goto",
	"if",
	"import",
	"interface",
	"map",
	"package",
	"range",
	"return",
	"select",
	"struct",
	"switch",
	"type",
	"var",
];

/// Operators and delimiters, longest first so matching is greedy.
const PUNCTS: &[&str] = &[
	"<<=", ">>=", "&^=", "...", ":=", "==", "!=", "<=", ">=", "&&", "||", "<-", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%",
	"&", "|", "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ";", ".", ":", "~",
];

#[derive(Clone, Debug, PartialEq)]
pub enum TokKind {
	Ident,
	Number,
	/// `value` is the text between the quotes, kept uninterpreted.
	Str { value: String },
	Rune,
	Punct(&'static str),
	/// An explicit `;` or one inserted at a line break.
	Semi,
}

#[derive(Clone, Debug)]
pub struct Tok {
	pub kind: TokKind,
	pub text: String,
	pub span: Span,
}

impl Tok {
	pub fn is_punct(&self, p: &str) -> bool {
		matches!(self.kind, TokKind::Punct(q) if q == p)
	}

	pub fn is_ident(&self, name: &str) -> bool {
		self.kind == TokKind::Ident && self.text == name
	}

	pub fn is_keyword(&self) -> bool {
		self.kind == TokKind::Ident && GO_KEYWORDS.contains(&self.text.as_str())
	}
}

pub fn lex(src: &str) -> (Vec<Tok>, Vec<Comment>) {
	let b = src.as_bytes();
	let mut toks: Vec<Tok> = Vec::new();
	let mut comments: Vec<Comment> = Vec::new();
	let mut i = 0;

	while i < b.len() {
		let c = b[i];
		match c {
			b'\n' => {
				insert_semi(&mut toks, i);
				i += 1;
			}
			b' ' | b'\t' | b'\r' => i += 1,
			b'/' if b.get(i + 1) == Some(&b'/') => {
				let start = i;
				while i < b.len() && b[i] != b'\n' {
					i += 1;
				}
				comments.push(Comment { text: src[start..i].to_string(), offset: start });
			}
			b'/' if b.get(i + 1) == Some(&b'*') => {
				let start = i;
				i += 2;
				while i < b.len() && !(b[i] == b'*' && b.get(i + 1) == Some(&b'/')) {
					i += 1;
				}
				i = (i + 2).min(b.len());
				let text = src[start..i].to_string();
				// A general comment containing a line break acts as a newline.
				if text.contains('\n') {
					insert_semi(&mut toks, start);
				}
				comments.push(Comment { text, offset: start });
			}
			b'"' => {
				let start = i;
				i += 1;
				while i < b.len() && b[i] != b'"' {
					if b[i] == b'\\' { i += 2 } else { i += 1 }
				}
				let inner_end = i.min(b.len());
				i = (i + 1).min(b.len());
				toks.push(Tok {
					kind: TokKind::Str {
						value: src[(start + 1).min(inner_end)..inner_end].to_string(),
					},
					text: src[start..i].to_string(),
					span: Span::new(start, i),
				});
			}
			b'`' => {
				let start = i;
				i += 1;
				while i < b.len() && b[i] != b'`' {
					i += 1;
				}
				let inner_end = i.min(b.len());
				i = (i + 1).min(b.len());
				toks.push(Tok {
					kind: TokKind::Str {
						value: src[(start + 1).min(inner_end)..inner_end].to_string(),
					},
					text: src[start..i].to_string(),
					span: Span::new(start, i),
				});
			}
			b'\'' => {
				let start = i;
				i += 1;
				while i < b.len() && b[i] != b'\'' {
					if b[i] == b'\\' { i += 2 } else { i += 1 }
				}
				i = (i + 1).min(b.len());
				toks.push(Tok {
					kind: TokKind::Rune,
					text: src[start..i.min(b.len())].to_string(),
					span: Span::new(start, i.min(b.len())),
				});
			}
			c if is_ident_start(c) => {
				let start = i;
				while i < b.len() && is_ident_continue(b[i]) {
					i += 1;
				}
				toks.push(Tok {
					kind: TokKind::Ident,
					text: src[start..i].to_string(),
					span: Span::new(start, i),
				});
			}
			c if c.is_ascii_digit() => {
				let start = i;
				while i < b.len() && (b[i].is_ascii_alphanumeric() || b[i] == b'.' || b[i] == b'_') {
					i += 1;
				}
				toks.push(Tok {
					kind: TokKind::Number,
					text: src[start..i].to_string(),
					span: Span::new(start, i),
				});
			}
			b'.' if b.get(i + 1).is_some_and(u8::is_ascii_digit) => {
				let start = i;
				i += 1;
				while i < b.len() && (b[i].is_ascii_alphanumeric() || b[i] == b'.' || b[i] == b'_') {
					i += 1;
				}
				toks.push(Tok {
					kind: TokKind::Number,
					text: src[start..i].to_string(),
					span: Span::new(start, i),
				});
			}
			_ => {
				let rest = &src[i..];
				if let Some(p) = PUNCTS.iter().copied().find(|p| rest.starts_with(p)) {
					let kind = if p == ";" { TokKind::Semi } else { TokKind::Punct(p) };
					toks.push(Tok {
						kind,
						text: p.to_string(),
						span: Span::new(i, i + p.len()),
					});
					i += p.len();
				} else {
					// Unknown byte, be tolerant.
					i += 1;
				}
			}
		}
	}
	insert_semi(&mut toks, b.len());

	(toks, comments)
}

fn is_ident_start(c: u8) -> bool {
	c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

fn is_ident_continue(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80
}

/// Go's automatic semicolon insertion rule.
fn insert_semi(toks: &mut Vec<Tok>, offset: usize) {
	let Some(last) = toks.last() else { return };
	let eligible = match &last.kind {
		TokKind::Ident => !last.is_keyword() || matches!(last.text.as_str(), "break" | "continue" | "fallthrough" | "return"),
		TokKind::Number | TokKind::Rune | TokKind::Str { .. } => true,
		TokKind::Punct(p) => matches!(*p, ")" | "]" | "}" | "++" | "--"),
		TokKind::Semi => false,
	};
	if eligible {
		toks.push(Tok {
			kind: TokKind::Semi,
			text: String::new(),
			span: Span::new(offset, offset),
		});
	}
}
