//! The OpenTelemetry span rule: every function receiving a request-scoped
//! context must open a span named after itself, unless it only wraps or reads
//! context values. Produces diagnostics with byte-range text-edit fixes;
//! applying a fix is plain text substitution, never a syntax-tree mutation.

pub mod context_arg;
pub mod exempt;
pub mod fix;
pub mod func_name;
pub mod span_stmt;

use std::{
	fs,
	path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, bail};
use walkdir::WalkDir;

use crate::{
	ast,
	config::LintConfig,
	goparse,
	lint::context_arg::ContextRef,
};

pub const RULE: &str = "opentelemetry";

#[derive(Clone, Debug)]
pub struct Diagnostic {
	pub file: String,
	pub line: usize,
	pub column: usize,
	/// Byte offset of the diagnostic anchor in the original source.
	pub offset: usize,
	pub message: String,
	pub fix: Option<SuggestedFix>,
}

#[derive(Clone, Debug)]
pub struct SuggestedFix {
	pub label: String,
	pub edits: Vec<TextEdit>,
}

#[derive(Clone, Debug)]
pub struct TextEdit {
	pub start_byte: usize,
	pub end_byte: usize,
	pub replacement: String,
}

/// One parsed, type-resolved compilation unit.
#[derive(Clone, derive_new::new)]
pub struct SourceFile {
	pub path: PathBuf,
	pub contents: String,
	pub ast: ast::File,
	pub types: ast::TypeTable,
}

/// Lints one file. Generated files report nothing.
pub fn lint_file(cfg: &LintConfig, file: &SourceFile) -> Vec<Diagnostic> {
	if is_file_do_not_edit(&file.ast) {
		return Vec::new();
	}
	let mut diags = Vec::new();
	for decl in &file.ast.decls {
		lint_function(cfg, file, decl, &mut diags);
	}
	diags
}

fn is_file_do_not_edit(file: &ast::File) -> bool {
	file.comments.first().is_some_and(|c| c.text.contains("DO NOT EDIT"))
}

fn lint_function(cfg: &LintConfig, file: &SourceFile, func: &ast::FuncDecl, diags: &mut Vec<Diagnostic>) {
	let Some(context_ref) = context_arg::find_context_argument(func) else {
		return;
	};

	// Functions that act as wrappers for setting and getting values on the
	// context are exempt.
	if exempt::returns_context(func) {
		return;
	}
	if exempt::uses_context_value_only(func, &context_ref) {
		return;
	}

	let Some(body) = &func.body else {
		return;
	};
	let func_name = func_name::full_func_name(func);

	let Some(span_start) = span_stmt::find_span_start(body, &file.types) else {
		let context_out = match &context_ref {
			ContextRef::Direct { name, .. } => name.clone(),
			ContextRef::Derived { .. } => "ctx".to_string(),
		};
		let insert_pos = body.stmts.first().map_or(body.rbrace, |s| s.span().start);
		let (line, column) = line_col(&file.contents, func.func_pos);
		diags.push(Diagnostic {
			file: file.path.display().to_string(),
			line,
			column,
			offset: func.func_pos,
			message: format!("Missing OpenTelemetry span for `{func_name}`"),
			fix: Some(SuggestedFix {
				label: "Insert span".to_string(),
				edits: vec![TextEdit {
					start_byte: insert_pos,
					end_byte: insert_pos,
					replacement: fix::span_call_src(cfg, context_ref.source_text(), &context_out, &func_name),
				}],
			}),
		});
		return;
	};

	// A computed span name is not validated.
	let Some((span_name, lit_span)) = &span_start.name_lit else {
		return;
	};

	if *span_name != func_name {
		let (line, column) = line_col(&file.contents, lit_span.start);
		diags.push(Diagnostic {
			file: file.path.display().to_string(),
			line,
			column,
			offset: lit_span.start,
			message: format!("OpenTelemetry span misspelled, expected `{func_name}`"),
			fix: Some(SuggestedFix {
				label: "Alter span name".to_string(),
				edits: vec![TextEdit {
					start_byte: lit_span.start,
					end_byte: lit_span.end,
					replacement: format!("\"{func_name}\""),
				}],
			}),
		});
	}
}

/// Applies a fix against the original source. Pure text substitution;
/// `None` when an edit does not fit the source.
pub fn apply_fix(contents: &str, fix: &SuggestedFix) -> Option<String> {
	let mut edits = fix.edits.clone();
	edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));
	let mut new_contents = contents.to_string();
	for edit in &edits {
		if edit.start_byte > edit.end_byte || edit.end_byte > new_contents.len() {
			return None;
		}
		new_contents.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
	}
	Some(new_contents)
}

pub fn run_assert(target_dir: &Path, cfg: &LintConfig) -> Result<i32> {
	cfg.validate()?;
	if !target_dir.exists() {
		bail!("target directory does not exist: {target_dir:?}");
	}

	let files = collect_go_files(target_dir);
	let mut all_diags = Vec::new();
	for file in &files {
		all_diags.extend(lint_file(cfg, file));
	}

	if all_diags.is_empty() {
		println!("spanlint: all checks passed");
		Ok(0)
	} else {
		eprintln!("spanlint: found {} violation(s):\n", all_diags.len());
		for d in &all_diags {
			eprintln!("  [{RULE}] {}:{}:{}: {}", d.file, d.line, d.column, d.message);
		}
		Ok(1)
	}
}

pub fn run_format(target_dir: &Path, cfg: &LintConfig) -> Result<i32> {
	cfg.validate()?;
	if !target_dir.exists() {
		bail!("target directory does not exist: {target_dir:?}");
	}

	let file_paths: Vec<PathBuf> = collect_go_files(target_dir).into_iter().map(|f| f.path).collect();

	let mut fixed_count = 0;
	let mut unfixable = Vec::new();
	for file_path in file_paths {
		let (file_fixed, file_unfixable) = format_file_iteratively(&file_path, cfg);
		fixed_count += file_fixed;
		unfixable.extend(file_unfixable);
	}

	if fixed_count == 0 && unfixable.is_empty() {
		println!("spanlint: all checks passed, nothing to format");
		return Ok(0);
	}
	if fixed_count > 0 {
		println!("spanlint: fixed {fixed_count} violation(s)");
	}
	if !unfixable.is_empty() {
		eprintln!("spanlint: {} violation(s) need manual fixing:\n", unfixable.len());
		for d in &unfixable {
			eprintln!("  [{RULE}] {}:{}:{}: {}", d.file, d.line, d.column, d.message);
		}
		return Ok(1);
	}
	Ok(0)
}

/// Apply one fix at a time, rewrite, re-parse, repeat until a fixed point.
/// Offsets stay valid because every round works against freshly parsed source.
fn format_file_iteratively(file_path: &Path, cfg: &LintConfig) -> (usize, Vec<Diagnostic>) {
	let mut fixed_count = 0;

	loop {
		let Some(file) = parse_go_file(file_path.to_path_buf()) else {
			return (fixed_count, Vec::new());
		};
		match format_round(cfg, &file) {
			FormatRound::Done(diags) => return (fixed_count, diags),
			FormatRound::Rewritten(new_contents) => {
				if fs::write(file_path, new_contents).is_err() {
					return (fixed_count, lint_file(cfg, &file));
				}
				fixed_count += 1;
			}
		}
	}
}

enum FormatRound {
	/// No fix could be applied; whatever diagnostics remain need manual fixing.
	Done(Vec<Diagnostic>),
	/// One fix applied, contents to be written back before the next round.
	Rewritten(String),
}

fn format_round(cfg: &LintConfig, file: &SourceFile) -> FormatRound {
	let diags = lint_file(cfg, file);
	let Some(fix) = diags.iter().find_map(|d| d.fix.clone()) else {
		return FormatRound::Done(diags);
	};
	match apply_fix(&file.contents, &fix) {
		Some(new_contents) => FormatRound::Rewritten(new_contents),
		None => FormatRound::Done(diags),
	}
}

pub fn collect_go_files(target_dir: &Path) -> Vec<SourceFile> {
	let mut files = Vec::new();

	let walker = WalkDir::new(target_dir).sort_by_file_name().into_iter().filter_entry(|e| {
		// The walk root is whatever the caller named, hidden or not; the
		// filters apply to what is found inside it.
		if e.depth() == 0 {
			return true;
		}
		let name = e.file_name().to_string_lossy();
		!name.starts_with('.') && name != "vendor" && name != "testdata"
	});

	for entry in walker.filter_map(Result::ok) {
		let path = entry.path().to_path_buf();
		if path.extension().is_some_and(|ext| ext == "go")
			&& let Some(file) = parse_go_file(path)
		{
			files.push(file);
		}
	}
	files
}

fn parse_go_file(path: PathBuf) -> Option<SourceFile> {
	let contents = fs::read_to_string(&path).ok()?;
	match goparse::parse_file(&contents) {
		Ok((ast, types)) => Some(SourceFile::new(path, contents, ast, types)),
		Err(e) => {
			eprintln!("Failed to parse file {path:?}: {e}");
			None
		}
	}
}

fn line_col(contents: &str, offset: usize) -> (usize, usize) {
	let offset = offset.min(contents.len());
	let mut line = 1;
	let mut line_start = 0;
	for (i, ch) in contents.char_indices() {
		if i >= offset {
			break;
		}
		if ch == '\n' {
			line += 1;
			line_start = i + 1;
		}
	}
	(line, offset - line_start + 1)
}
