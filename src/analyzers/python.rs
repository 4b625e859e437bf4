use rustpython_parser::ast;
use std::path::Path;

use crate::checker;
use crate::core::annotation::Annotation;
use crate::core::signature::{DefaultKind, FunctionSignature, Parameter, SourcePos};
use crate::core::{Diagnostic, FileReport};
use crate::errors::DocdriftError;

/// Byte offsets of every line start, for mapping AST ranges to positions.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line and 0-based byte column, CPython's convention.
    fn position(&self, offset: usize) -> SourcePos {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        SourcePos::new(line, offset - self.line_starts[line - 1])
    }
}

/// Parses Python modules and runs the docstring checks over every function
/// definition found, however deeply nested.
#[derive(Default)]
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn check_source(&self, content: &str, path: &Path) -> Result<FileReport, DocdriftError> {
        let parsed = rustpython_parser::parse(
            content,
            rustpython_parser::Mode::Module,
            &path.to_string_lossy(),
        )
        .map_err(|e| DocdriftError::parse(path, e.to_string()))?;

        let index = LineIndex::new(content);
        let mut diagnostics = Vec::new();
        let mut functions_checked = 0;
        if let ast::Mod::Module(module) = &parsed {
            walk_statements(&module.body, &index, &mut diagnostics, &mut functions_checked);
        }
        Ok(FileReport {
            path: path.to_path_buf(),
            functions_checked,
            diagnostics,
        })
    }
}

/// Visit every statement suite, checking each function definition on the way
/// down. Class and function bodies are entered so nested defs are covered.
fn walk_statements(
    stmts: &[ast::Stmt],
    index: &LineIndex,
    diagnostics: &mut Vec<Diagnostic>,
    functions_checked: &mut usize,
) {
    for stmt in stmts {
        match stmt {
            ast::Stmt::FunctionDef(def) => {
                check_def(
                    &def.name,
                    &def.args,
                    def.returns.as_deref(),
                    &def.body,
                    def.range.start().to_usize(),
                    index,
                    diagnostics,
                    functions_checked,
                );
                walk_statements(&def.body, index, diagnostics, functions_checked);
            }
            ast::Stmt::AsyncFunctionDef(def) => {
                check_def(
                    &def.name,
                    &def.args,
                    def.returns.as_deref(),
                    &def.body,
                    def.range.start().to_usize(),
                    index,
                    diagnostics,
                    functions_checked,
                );
                walk_statements(&def.body, index, diagnostics, functions_checked);
            }
            ast::Stmt::ClassDef(def) => {
                walk_statements(&def.body, index, diagnostics, functions_checked);
            }
            ast::Stmt::If(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
            }
            ast::Stmt::Match(s) => {
                for case in &s.cases {
                    walk_statements(&case.body, index, diagnostics, functions_checked);
                }
            }
            ast::Stmt::For(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
            }
            ast::Stmt::AsyncFor(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
            }
            ast::Stmt::While(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
            }
            ast::Stmt::With(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
            }
            ast::Stmt::AsyncWith(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
            }
            ast::Stmt::Try(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                for handler in &s.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    walk_statements(&h.body, index, diagnostics, functions_checked);
                }
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
                walk_statements(&s.finalbody, index, diagnostics, functions_checked);
            }
            ast::Stmt::TryStar(s) => {
                walk_statements(&s.body, index, diagnostics, functions_checked);
                for handler in &s.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    walk_statements(&h.body, index, diagnostics, functions_checked);
                }
                walk_statements(&s.orelse, index, diagnostics, functions_checked);
                walk_statements(&s.finalbody, index, diagnostics, functions_checked);
            }
            _ => {}
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn check_def(
    name: &str,
    args: &ast::Arguments,
    returns: Option<&ast::Expr>,
    body: &[ast::Stmt],
    start_offset: usize,
    index: &LineIndex,
    diagnostics: &mut Vec<Diagnostic>,
    functions_checked: &mut usize,
) {
    let pos = index.position(start_offset);
    let signature = build_signature(name, args, returns, body, pos, index);
    let docstring = find_docstring(body);
    diagnostics.extend(checker::check_function(&signature, docstring));
    *functions_checked += 1;
}

fn build_signature(
    name: &str,
    args: &ast::Arguments,
    returns: Option<&ast::Expr>,
    body: &[ast::Stmt],
    pos: SourcePos,
    index: &LineIndex,
) -> FunctionSignature {
    let params = args
        .posonlyargs
        .iter()
        .chain(&args.args)
        .chain(&args.kwonlyargs)
        .map(|arg| Parameter {
            name: arg.def.arg.to_string(),
            annotation: arg.def.annotation.as_deref().map(convert_annotation),
            default: arg.default.as_deref().map(default_kind),
            pos: index.position(arg.def.range.start().to_usize()),
        })
        .collect();

    FunctionSignature {
        name: name.to_string(),
        pos,
        params,
        has_vararg: args.vararg.is_some(),
        has_kwarg: args.kwarg.is_some(),
        returns: returns.map(convert_annotation),
        body_len: body.len(),
        passthrough_body: body.iter().all(is_passthrough_stmt),
    }
}

/// Fold an annotation expression into the checker's closed shape set.
/// Anything outside it becomes `Unsupported` and renders empty.
fn convert_annotation(expr: &ast::Expr) -> Annotation {
    match expr {
        ast::Expr::Name(name) => Annotation::Name(name.id.to_string()),
        ast::Expr::Attribute(attr) => Annotation::Attribute(attr.attr.to_string()),
        ast::Expr::Subscript(sub) => Annotation::Subscript {
            value: Box::new(convert_annotation(&sub.value)),
            slice: Box::new(convert_annotation(&sub.slice)),
        },
        ast::Expr::List(list) => {
            Annotation::List(list.elts.iter().map(convert_annotation).collect())
        }
        ast::Expr::Tuple(tuple) => {
            Annotation::Tuple(tuple.elts.iter().map(convert_annotation).collect())
        }
        ast::Expr::BinOp(op) if matches!(op.op, ast::Operator::BitOr) => Annotation::Union(
            Box::new(convert_annotation(&op.left)),
            Box::new(convert_annotation(&op.right)),
        ),
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Ellipsis => Annotation::Ellipsis,
            ast::Constant::None => Annotation::None,
            _ => Annotation::Unsupported,
        },
        _ => Annotation::Unsupported,
    }
}

fn default_kind(expr: &ast::Expr) -> DefaultKind {
    match expr {
        ast::Expr::Constant(c) if matches!(c.value, ast::Constant::None) => {
            DefaultKind::NoneLiteral
        }
        _ => DefaultKind::Other,
    }
}

/// First body statement that is a bare string literal, if any.
fn find_docstring(body: &[ast::Stmt]) -> Option<&str> {
    for stmt in body {
        if let ast::Stmt::Expr(expr) = stmt {
            if let ast::Expr::Constant(constant) = expr.value.as_ref() {
                if let ast::Constant::Str(s) = &constant.value {
                    return Some(s);
                }
            }
        }
    }
    None
}

fn is_passthrough_stmt(stmt: &ast::Stmt) -> bool {
    matches!(
        stmt,
        ast::Stmt::Expr(_) | ast::Stmt::Return(_) | ast::Stmt::Raise(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticCode;

    fn check(code: &str) -> FileReport {
        PythonAnalyzer::new()
            .check_source(code, Path::new("test.py"))
            .unwrap()
    }

    fn codes(code: &str) -> Vec<DiagnosticCode> {
        check(code).diagnostics.into_iter().map(|d| d.code).collect()
    }

    #[test]
    fn line_index_maps_offsets() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.position(0), SourcePos::new(1, 0));
        assert_eq!(index.position(1), SourcePos::new(1, 1));
        assert_eq!(index.position(3), SourcePos::new(2, 0));
        assert_eq!(index.position(6), SourcePos::new(3, 0));
        assert_eq!(index.position(8), SourcePos::new(4, 1));
    }

    #[test]
    fn clean_function_produces_no_diagnostics() {
        let code = r#"
def add(a: int, b: int) -> int:
    """Add two integers.

    Args:
        a (int): left operand.
        b (int): right operand.

    Returns:
        int: the sum.
    """
    total = a + b
    return total
"#;
        let report = check(code);
        assert_eq!(report.functions_checked, 1);
        assert_eq!(report.diagnostics, vec![]);
    }

    #[test]
    fn missing_annotation_points_at_the_parameter() {
        let code = r#"
def greet(name) -> None:
    """Say hello.

    Args:
        name (str): who to greet.
    """
    print(name)
"#;
        let report = check(code);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.code, DiagnosticCode::MissingParamAnnotation);
        assert_eq!((d.line, d.column), (2, 10));
    }

    #[test]
    fn missing_docstring_points_at_the_def() {
        let code = r#"
class Greeter:
    def greet(self, name: str) -> None:
        count = 1
        print(name * count)
"#;
        let report = check(code);
        assert_eq!(report.functions_checked, 1);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.code, DiagnosticCode::MissingDocstring);
        assert_eq!((d.line, d.column), (3, 4));
    }

    #[test]
    fn async_and_nested_functions_are_checked() {
        let code = r#"
async def outer(x: int) -> int:
    """Run the pipeline.

    Args:
        x (int): seed value.

    Returns:
        int: processed value.
    """
    def inner(y: int) -> int:
        total = y + 1
        return total
    return inner(x)
"#;
        let report = check(code);
        assert_eq!(report.functions_checked, 2);
        assert_eq!(
            report.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
            vec![DiagnosticCode::MissingDocstring]
        );
        assert_eq!(report.diagnostics[0].line, 11);
    }

    #[test]
    fn functions_behind_conditionals_are_found() {
        let code = r#"
import sys

if sys.version_info >= (3, 10):
    def probe(x: int) -> None:
        count = x + 1
        print(count)
"#;
        let report = check(code);
        assert_eq!(report.functions_checked, 1);
        assert_eq!(codes(code), vec![DiagnosticCode::MissingDocstring]);
    }

    #[test]
    fn keyword_only_params_are_declared_params() {
        let code = r#"
def configure(*, retries: int, timeout: int) -> None:
    """Configure the client.

    Args:
        retries (int): attempt budget.
        timeout (int): per-call limit in seconds.
    """
    apply(retries)
    apply(timeout)
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn vararg_and_kwarg_set_flags_only() {
        let code = r#"
def call(*args, **kwargs) -> None:
    """Invoke with whatever arrives.

    Args:
        *args: positional payload.
        **kwargs: keyword payload.
    """
    dispatch(args, kwargs)
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn pep604_optional_default_is_accepted() {
        let code = r#"
def lookup(key: str, fallback: str | None = None) -> str:
    """Look a key up.

    Args:
        key (str): cache key.
        fallback (str | None): value when absent.

    Returns:
        str: the stored value.
    """
    value = store.get(key, fallback)
    return value
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn plain_none_default_is_flagged() {
        let code = r#"
def lookup(key: str, fallback: str = None) -> str:
    """Look a key up.

    Args:
        key (str): cache key.
        fallback (str): value when absent.

    Returns:
        str: the stored value.
    """
    value = store.get(key, fallback)
    return value
"#;
        let report = check(code);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.code, DiagnosticCode::NoneDefaultNotOptional);
        assert_eq!((d.line, d.column), (2, 0));
    }

    #[test]
    fn optional_subscript_default_is_accepted() {
        let code = r#"
def lookup(key: str, limit: Optional[int] = None) -> str:
    """Look a key up.

    Args:
        key (str): cache key.
        limit (Optional[int]): result cap.

    Returns:
        str: the stored value.
    """
    value = store.get(key, limit)
    return value
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn attribute_annotations_compare_by_member() {
        let code = r#"
def fetch(frame: pd.DataFrame) -> None:
    """Fetch rows.

    Args:
        frame (pandas.DataFrame): source table.
    """
    frame.head()
    frame.tail()
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn passthrough_bodies_need_no_docs() {
        let code = r#"
def ping() -> str:
    return "pong"
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn private_functions_skip_doc_checks_but_not_annotations() {
        let code = r#"
def _helper(x) -> None:
    value = x + 1
    print(value)
"#;
        assert_eq!(codes(code), vec![DiagnosticCode::MissingParamAnnotation]);
    }

    #[test]
    fn dunder_methods_are_exempt() {
        let code = r#"
class Point:
    def __init__(self, x, y):
        self.x = x
        self.y = y
"#;
        assert_eq!(codes(code), vec![]);
    }

    #[test]
    fn syntax_errors_surface_as_parse_failures() {
        let err = PythonAnalyzer::new()
            .check_source("def broken(:\n", Path::new("bad.py"))
            .unwrap_err();
        assert!(matches!(err, DocdriftError::Parse { .. }));
        assert!(err.to_string().contains("bad.py"));
    }
}
