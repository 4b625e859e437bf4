pub mod context;
pub mod patterns;
pub mod scanner;

pub use context::{DocContext, DocSection};

use crate::core::signature::{DefaultKind, FunctionSignature};
use crate::core::{Diagnostic, DiagnosticCode, DiagnosticSink};

/// Check one function: annotation presence first, then the docstring scan
/// and its post-scan verification. Findings come back in emission order.
pub fn check_function(sig: &FunctionSignature, docstring: Option<&str>) -> Vec<Diagnostic> {
    let mut sink = DiagnosticSink::new();
    check_annotations(sig, &mut sink);
    check_documentation(sig, docstring, &mut sink);
    sink.into_vec()
}

/// Signature-level checks that need no docstring at all. Dunder-style names
/// get a blanket pass; their signatures are dictated by the protocol.
fn check_annotations(sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if sig.is_dunder() {
        return;
    }
    for param in &sig.params {
        match &param.annotation {
            None => {
                if !param.is_reserved() {
                    sink.report(
                        param.pos,
                        DiagnosticCode::MissingParamAnnotation,
                        format!("argument '{}' is missing a type hint.", param.name),
                    );
                }
            }
            Some(annotation) => {
                if param.default == Some(DefaultKind::NoneLiteral) && !annotation.allows_none() {
                    sink.report(
                        sig.pos,
                        DiagnosticCode::NoneDefaultNotOptional,
                        format!(
                            "argument '{}' has a 'None' default but its type hint doesn't \
                             allow 'None'.",
                            param.name
                        ),
                    );
                }
            }
        }
    }
    if sig.returns.is_none() {
        sink.report(
            sig.pos,
            DiagnosticCode::MissingReturnAnnotation,
            format!("function '{}' is missing a type hint for the return value.", sig.name),
        );
    }
}

fn check_documentation(
    sig: &FunctionSignature,
    docstring: Option<&str>,
    sink: &mut DiagnosticSink,
) {
    let Some(doc) = docstring else {
        if sig.requires_documentation() {
            sink.report(
                sig.pos,
                DiagnosticCode::MissingDocstring,
                format!("function '{}' is missing documentation.", sig.name),
            );
        }
        return;
    };
    scanner::scan_docstring(sig, doc, sink);
}
