//! Syntax-aware comment removal for Python sources.
//!
//! Docstrings (the first statement of a module, function, or class body,
//! when it is a standalone string literal) are protected line-for-line.
//! Outside those ranges, any line whose stripped content begins with `#`
//! is dropped whole. Trailing comments after code stay; only whole-line
//! comments are removed.

use anyhow::{anyhow, Result};
use rustpython_parser::ast::{self, Ranged, Stmt};
use rustpython_parser::Parse;

/// 0-based inclusive line span occupied by a protected docstring.
type LineSpan = (usize, usize);

pub fn strip_python(source: &str) -> Result<String> {
    let body = ast::Suite::parse(source, "<source>")
        .map_err(|err| anyhow!("Python syntax error: {err}"))?;

    let starts = line_starts(source);
    let mut protected: Vec<LineSpan> = Vec::new();
    collect_docstring_spans(&body, true, &starts, &mut protected);

    let kept: Vec<&str> = source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            if protected.iter().any(|(start, end)| (*start..=*end).contains(&idx)) {
                return Some(line);
            }
            if line.trim_start().starts_with('#') {
                return None;
            }
            Some(line)
        })
        .collect();

    Ok(kept.join("\n"))
}

/// Walk every statement body. `scope` is true for bodies that can open with
/// a docstring (module, function, class); block bodies merely get recursed
/// so nested definitions are still found.
fn collect_docstring_spans(
    body: &[Stmt],
    scope: bool,
    starts: &[usize],
    out: &mut Vec<LineSpan>,
) {
    if scope {
        if let Some(span) = docstring_span(body, starts) {
            out.push(span);
        }
    }

    for stmt in body {
        match stmt {
            Stmt::FunctionDef(def) => collect_docstring_spans(&def.body, true, starts, out),
            Stmt::AsyncFunctionDef(def) => collect_docstring_spans(&def.body, true, starts, out),
            Stmt::ClassDef(def) => collect_docstring_spans(&def.body, true, starts, out),
            Stmt::If(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                collect_docstring_spans(&inner.orelse, false, starts, out);
            }
            Stmt::While(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                collect_docstring_spans(&inner.orelse, false, starts, out);
            }
            Stmt::For(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                collect_docstring_spans(&inner.orelse, false, starts, out);
            }
            Stmt::AsyncFor(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                collect_docstring_spans(&inner.orelse, false, starts, out);
            }
            Stmt::With(inner) => collect_docstring_spans(&inner.body, false, starts, out),
            Stmt::AsyncWith(inner) => collect_docstring_spans(&inner.body, false, starts, out),
            Stmt::Try(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                for handler in &inner.handlers {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    collect_docstring_spans(&handler.body, false, starts, out);
                }
                collect_docstring_spans(&inner.orelse, false, starts, out);
                collect_docstring_spans(&inner.finalbody, false, starts, out);
            }
            Stmt::TryStar(inner) => {
                collect_docstring_spans(&inner.body, false, starts, out);
                for handler in &inner.handlers {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    collect_docstring_spans(&handler.body, false, starts, out);
                }
                collect_docstring_spans(&inner.orelse, false, starts, out);
                collect_docstring_spans(&inner.finalbody, false, starts, out);
            }
            Stmt::Match(inner) => {
                for case in &inner.cases {
                    collect_docstring_spans(&case.body, false, starts, out);
                }
            }
            _ => {}
        }
    }
}

/// The line span of `body`'s leading docstring, when present.
fn docstring_span(body: &[Stmt], starts: &[usize]) -> Option<LineSpan> {
    let first = body.first()?;
    let Stmt::Expr(expr) = first else {
        return None;
    };
    let ast::Expr::Constant(constant) = expr.value.as_ref() else {
        return None;
    };
    if !matches!(constant.value, ast::Constant::Str(_)) {
        return None;
    }

    let start = line_of(starts, u32::from(first.start()) as usize);
    // end() is exclusive; the last byte of the closing quote decides the line.
    let end_offset = (u32::from(first.end()) as usize).saturating_sub(1);
    let end = line_of(starts, end_offset);
    Some((start, end.max(start)))
}

/// Byte offsets at which each line begins.
fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (idx, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(idx + 1);
        }
    }
    starts
}

/// 0-based line containing the byte at `offset`.
fn line_of(starts: &[usize], offset: usize) -> usize {
    starts.partition_point(|start| *start <= offset).saturating_sub(1)
}
