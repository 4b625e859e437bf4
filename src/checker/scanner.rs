use regex::Captures;

use crate::checker::context::{DocContext, DocSection};
use crate::checker::patterns;
use crate::core::annotation::{strip_whitespace, types_match};
use crate::core::signature::FunctionSignature;
use crate::core::{DiagnosticCode, DiagnosticSink};

/// Scan a docstring line by line, then verify the collected facts against
/// the signature. Every finding is positioned at the function definition.
pub fn scan_docstring(sig: &FunctionSignature, doc: &str, sink: &mut DiagnosticSink) {
    let mut ctx = DocContext::new();
    for line in doc.split('\n') {
        scan_line(line, &mut ctx, sig, sink);
    }
    verify(&ctx, sig, sink);
}

/// Header recognition runs before section handling, so a header is honored
/// from any state. A duplicate header is flagged and then deliberately NOT
/// consumed: it falls through and gets parsed as ordinary section content,
/// which usually costs it an indent or unknown-argument finding as well.
fn scan_line(line: &str, ctx: &mut DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if args_header(line, ctx, sig, sink) {
        return;
    }
    if return_header(line, ctx, sig, sink) {
        return;
    }
    if misc_header(line, ctx) {
        return;
    }
    match ctx.section {
        DocSection::Description => {
            if line.trim().chars().count() > 1 {
                ctx.found_description = true;
            }
        }
        DocSection::Arguments => match patterns::ARG_ENTRY.captures(line) {
            Some(caps) => argument_entry(&caps, ctx, sig, sink),
            None => check_indent(ctx.args_indent + 4, line, ctx),
        },
        DocSection::ReturnFirstLine => {
            if let Some(caps) = patterns::RETURN_ENTRY.captures(line) {
                return_entry(&caps, ctx, sig, sink);
            }
            ctx.section = DocSection::ReturnRest;
        }
        DocSection::ReturnRest => check_indent(ctx.return_indent, line, ctx),
        DocSection::Misc => {}
    }
}

fn args_header(
    line: &str,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) -> bool {
    let Some(caps) = patterns::ARGS_HEADER.captures(line) else {
        return false;
    };
    if ctx.found_args {
        sink.report(
            sig.pos,
            DiagnosticCode::DuplicateArgsSection,
            "duplicate 'Args:' section in the documentation.",
        );
        return false;
    }
    if ctx.found_return {
        sink.report(
            sig.pos,
            DiagnosticCode::SectionsOutOfOrder,
            "'Args:' section found after 'Returns:' section.",
        );
    }
    ctx.found_args = true;
    ctx.args_indent = caps[1].len() + 4;
    ctx.section = DocSection::Arguments;
    true
}

fn return_header(
    line: &str,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) -> bool {
    let Some(caps) = patterns::RETURN_HEADER.captures(line) else {
        return false;
    };
    if ctx.found_return {
        sink.report(
            sig.pos,
            DiagnosticCode::DuplicateReturnsSection,
            "duplicate 'Returns:' section in the documentation.",
        );
        return false;
    }
    ctx.found_return = true;
    ctx.return_indent = caps[1].len() + 4;
    ctx.section = DocSection::ReturnFirstLine;
    true
}

fn misc_header(line: &str, ctx: &mut DocContext) -> bool {
    if patterns::MISC_HEADER.is_match(line) {
        ctx.section = DocSection::Misc;
        return true;
    }
    false
}

fn argument_entry(
    caps: &Captures,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) {
    let indent = caps[1].len();
    let name = caps[2].trim_matches('`');
    let doc_type = caps.get(3).map(|m| m.as_str());
    let description = &caps[4];
    let index = sig.param_index(name);

    argument_indent(indent, name, index, ctx, sig, sink);
    let Some(index) = index else {
        return;
    };
    argument_docs(name, doc_type, description, index, ctx, sig, sink);
    ctx.current_arg = index + 1;
}

fn argument_indent(
    indent: usize,
    name: &str,
    index: Option<usize>,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) {
    if indent == ctx.args_indent {
        // Correctly indented entries that name nothing in the signature are
        // phantom arguments. Starred names document *args / **kwargs and get
        // a pass, as does the empty name a stray colon line produces.
        if index.is_none() && !name.is_empty() && !name.starts_with('*') {
            sink.report(
                sig.pos,
                DiagnosticCode::UnknownDocParam,
                format!("documented argument '{name}' doesn't appear in the function signature."),
            );
        }
    } else if indent != ctx.args_indent + 4 {
        ctx.record_invalid_indent(name);
    }
}

fn argument_docs(
    name: &str,
    doc_type: Option<&str>,
    description: &str,
    index: usize,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) {
    if !ctx.documented.insert(index) {
        sink.report(
            sig.pos,
            DiagnosticCode::DocParamRepeated,
            format!("argument '{name}' is documented more than once."),
        );
        return;
    }
    if ctx.current_arg == 0
        && index != 0
        && sig.params.first().map_or(false, |p| p.is_reserved())
    {
        // The receiver needs no entry; documentation may start at index 1.
        ctx.current_arg = 1;
    }
    if index != ctx.current_arg {
        sink.report(
            sig.pos,
            DiagnosticCode::DocParamOutOfOrder,
            format!("argument '{name}' is documented out of order."),
        );
    }
    match doc_type {
        None => sink.report(
            sig.pos,
            DiagnosticCode::DocParamMissingType,
            format!("argument '{name}' doesn't specify a type in the documentation."),
        ),
        Some(doc_type) => {
            if let Some(annotation) = &sig.params[index].annotation {
                let documented = strip_whitespace(&doc_type[1..doc_type.len() - 1]);
                let rendered = strip_whitespace(&annotation.render());
                if !types_match(&rendered, &documented) {
                    sink.report(
                        sig.pos,
                        DiagnosticCode::DocParamTypeMismatch,
                        format!(
                            "argument '{name}' type hint doesn't match documentation. \
                             expected: '{rendered}', documented as: '{documented}'."
                        ),
                    );
                }
            }
        }
    }
    // Long names and types routinely push the description to the next line,
    // so entries already past 70 columns are left alone.
    if description.trim().chars().count() < 2
        && name.len() + doc_type.map_or(0, str::len) < 70
    {
        sink.report(
            sig.pos,
            DiagnosticCode::DocParamMissingDescription,
            format!("argument '{name}' is missing a description in the documentation."),
        );
    }
}

fn return_entry(
    caps: &Captures,
    ctx: &mut DocContext,
    sig: &FunctionSignature,
    sink: &mut DiagnosticSink,
) {
    let indent = caps[1].len();
    let type_text = &caps[2];
    let has_colon = caps.get(3).is_some();
    let mut description = caps.get(4).map_or("", |m| m.as_str());
    let mut doc_type = Some(type_text.as_ref());

    if indent != ctx.return_indent {
        ctx.record_invalid_indent(type_text);
    }
    if !has_colon {
        // No colon means the whole line is description, not a type.
        description = type_text;
        doc_type = None;
    }
    let has_description = description.trim().chars().count() > 1;

    let Some(returns) = &sig.returns else {
        return;
    };
    if !has_description {
        sink.report(
            sig.pos,
            DiagnosticCode::DocReturnMissingDescription,
            format!("return documentation for function '{}' is missing a description.", sig.name),
        );
    }
    let rendered = strip_whitespace(&returns.render());
    match doc_type {
        None => sink.report(
            sig.pos,
            DiagnosticCode::DocReturnTypeMissing,
            format!(
                "function '{}' doesn't specify a return type in the documentation. \
                 expected: '{rendered}'.",
                sig.name
            ),
        ),
        Some(doc_type) => {
            let documented = strip_whitespace(doc_type);
            if !types_match(&rendered, &documented) {
                sink.report(
                    sig.pos,
                    DiagnosticCode::DocReturnTypeMismatch,
                    format!(
                        "function '{}' return type hint doesn't match documentation. \
                         expected: '{rendered}', documented as: '{documented}'.",
                        sig.name
                    ),
                );
            }
        }
    }
}

/// Continuation lines must sit exactly at the expected indent. Blank lines
/// are exempt.
fn check_indent(expected: usize, line: &str, ctx: &mut DocContext) {
    if let Some(caps) = patterns::INDENT.captures(line) {
        if caps[1].len() != expected {
            ctx.record_invalid_indent(line);
        }
    }
}

/// Post-scan verification: everything that can only be judged once the whole
/// docstring has been read.
fn verify(ctx: &DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    verify_description(ctx, sig, sink);
    verify_args(ctx, sig, sink);
    verify_return(ctx, sig, sink);
    verify_indents(ctx, sig, sink);
}

fn verify_description(ctx: &DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if !ctx.found_description && sig.requires_documentation() {
        sink.report(
            sig.pos,
            DiagnosticCode::MissingDescription,
            format!("function '{}' is missing a description in the documentation.", sig.name),
        );
    }
}

fn verify_args(ctx: &DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if !ctx.found_args {
        if sig.has_documentable_params() && sig.requires_documentation() {
            sink.report(
                sig.pos,
                DiagnosticCode::MissingArgsSection,
                format!("function '{}' is missing argument documentation.", sig.name),
            );
        }
        return;
    }
    if !sig.has_documentable_params() && !sig.has_vararg && !sig.has_kwarg {
        sink.report(
            sig.pos,
            DiagnosticCode::RedundantArgsSection,
            format!("function '{}' documents arguments but takes none.", sig.name),
        );
        return;
    }
    // An Args section whose every entry failed to parse yields no coverage
    // information at all; per-argument nagging would only pile on.
    if ctx.documented.is_empty() {
        return;
    }
    for (index, param) in sig.params.iter().enumerate() {
        if !ctx.documented.contains(&index) && !param.is_reserved() {
            sink.report(
                sig.pos,
                DiagnosticCode::ParamNotDocumented,
                format!("argument '{}' is missing from the documentation.", param.name),
            );
        }
    }
}

fn verify_return(ctx: &DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if ctx.found_return {
        if sig.returns.is_none() {
            sink.report(
                sig.pos,
                DiagnosticCode::RedundantReturnsSection,
                format!(
                    "function '{}' documents a return value but has no return type.",
                    sig.name
                ),
            );
        }
    } else if sig.requires_documentation() && sig.return_requires_documentation() {
        sink.report(
            sig.pos,
            DiagnosticCode::MissingReturnsSection,
            format!("function '{}' is missing return documentation.", sig.name),
        );
    }
}

fn verify_indents(ctx: &DocContext, sig: &FunctionSignature, sink: &mut DiagnosticSink) {
    if ctx.invalid_indents > 0 {
        let first = ctx.first_invalid_indent.as_deref().unwrap_or_default();
        sink.report(
            sig.pos,
            DiagnosticCode::InvalidIndentation,
            format!(
                "found {} invalid documentation indents, starting with ('{first}').",
                ctx.invalid_indents
            ),
        );
    }
}
