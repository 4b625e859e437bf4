pub mod annotation;
pub mod signature;

use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

pub use annotation::{strip_whitespace, types_match, Annotation};
pub use signature::{
    DefaultKind, FunctionSignature, Parameter, SourcePos, RESERVED_RECEIVERS,
};

/// Stable identifier for one rule. The numeric suffix never changes meaning
/// across releases; retired rules leave holes rather than being reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCode {
    /// DOC001: parameter without a type hint.
    MissingParamAnnotation,
    /// DOC002: function without a return type hint.
    MissingReturnAnnotation,
    /// DOC003: function without a docstring.
    MissingDocstring,
    /// DOC004: documented argument without a type.
    DocParamMissingType,
    /// DOC005: documented argument type differs from the hint.
    DocParamTypeMismatch,
    /// DOC006: return documentation without a type.
    DocReturnTypeMissing,
    /// DOC007: documented argument that is not declared.
    UnknownDocParam,
    /// DOC008: documented argument without a description.
    DocParamMissingDescription,
    /// DOC009: argument documented more than once.
    DocParamRepeated,
    /// DOC010: documented return type differs from the hint.
    DocReturnTypeMismatch,
    /// DOC011: declared parameter missing from the docs.
    ParamNotDocumented,
    /// DOC012: second `Args:` section.
    DuplicateArgsSection,
    /// DOC013: `Args:` after `Returns:`.
    SectionsOutOfOrder,
    /// DOC014: second `Returns:` section.
    DuplicateReturnsSection,
    /// DOC015: arguments documented out of declaration order.
    DocParamOutOfOrder,
    /// DOC016: return documentation without a description.
    DocReturnMissingDescription,
    /// DOC017: docstring without a leading description.
    MissingDescription,
    /// DOC018: docstring without an `Args:` section.
    MissingArgsSection,
    /// DOC019: `Args:` section on a function without arguments.
    RedundantArgsSection,
    /// DOC020: `Returns:` section on a function without a return type.
    RedundantReturnsSection,
    /// DOC021: missing `Returns:` section.
    MissingReturnsSection,
    /// DOC022: malformed indentation inside the docstring.
    InvalidIndentation,
    /// DOC023: `None` default on a parameter whose hint excludes `None`.
    NoneDefaultNotOptional,
}

impl DiagnosticCode {
    /// Every code, in numeric order.
    pub fn all() -> &'static [DiagnosticCode] {
        use DiagnosticCode::*;
        &[
            MissingParamAnnotation,
            MissingReturnAnnotation,
            MissingDocstring,
            DocParamMissingType,
            DocParamTypeMismatch,
            DocReturnTypeMissing,
            UnknownDocParam,
            DocParamMissingDescription,
            DocParamRepeated,
            DocReturnTypeMismatch,
            ParamNotDocumented,
            DuplicateArgsSection,
            SectionsOutOfOrder,
            DuplicateReturnsSection,
            DocParamOutOfOrder,
            DocReturnMissingDescription,
            MissingDescription,
            MissingArgsSection,
            RedundantArgsSection,
            RedundantReturnsSection,
            MissingReturnsSection,
            InvalidIndentation,
            NoneDefaultNotOptional,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingParamAnnotation => "DOC001",
            DiagnosticCode::MissingReturnAnnotation => "DOC002",
            DiagnosticCode::MissingDocstring => "DOC003",
            DiagnosticCode::DocParamMissingType => "DOC004",
            DiagnosticCode::DocParamTypeMismatch => "DOC005",
            DiagnosticCode::DocReturnTypeMissing => "DOC006",
            DiagnosticCode::UnknownDocParam => "DOC007",
            DiagnosticCode::DocParamMissingDescription => "DOC008",
            DiagnosticCode::DocParamRepeated => "DOC009",
            DiagnosticCode::DocReturnTypeMismatch => "DOC010",
            DiagnosticCode::ParamNotDocumented => "DOC011",
            DiagnosticCode::DuplicateArgsSection => "DOC012",
            DiagnosticCode::SectionsOutOfOrder => "DOC013",
            DiagnosticCode::DuplicateReturnsSection => "DOC014",
            DiagnosticCode::DocParamOutOfOrder => "DOC015",
            DiagnosticCode::DocReturnMissingDescription => "DOC016",
            DiagnosticCode::MissingDescription => "DOC017",
            DiagnosticCode::MissingArgsSection => "DOC018",
            DiagnosticCode::RedundantArgsSection => "DOC019",
            DiagnosticCode::RedundantReturnsSection => "DOC020",
            DiagnosticCode::MissingReturnsSection => "DOC021",
            DiagnosticCode::InvalidIndentation => "DOC022",
            DiagnosticCode::NoneDefaultNotOptional => "DOC023",
        }
    }

    /// One-line rationale shown by `docdrift rules`.
    pub fn help(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingParamAnnotation => {
                "every parameter should carry a type hint"
            }
            DiagnosticCode::MissingReturnAnnotation => {
                "every function should declare its return type"
            }
            DiagnosticCode::MissingDocstring => {
                "public functions with real bodies need documentation"
            }
            DiagnosticCode::DocParamMissingType => {
                "documented arguments should repeat their type in parentheses"
            }
            DiagnosticCode::DocParamTypeMismatch => {
                "documented argument types must match the signature"
            }
            DiagnosticCode::DocReturnTypeMissing => {
                "return documentation should lead with the return type"
            }
            DiagnosticCode::UnknownDocParam => {
                "documentation must not mention arguments the signature lacks"
            }
            DiagnosticCode::DocParamMissingDescription => {
                "each documented argument needs a description"
            }
            DiagnosticCode::DocParamRepeated => {
                "each argument may be documented only once"
            }
            DiagnosticCode::DocReturnTypeMismatch => {
                "the documented return type must match the signature"
            }
            DiagnosticCode::ParamNotDocumented => {
                "every declared parameter belongs in the Args section"
            }
            DiagnosticCode::DuplicateArgsSection => {
                "a docstring holds at most one Args section"
            }
            DiagnosticCode::SectionsOutOfOrder => {
                "the Args section comes before Returns"
            }
            DiagnosticCode::DuplicateReturnsSection => {
                "a docstring holds at most one Returns section"
            }
            DiagnosticCode::DocParamOutOfOrder => {
                "arguments should be documented in declaration order"
            }
            DiagnosticCode::DocReturnMissingDescription => {
                "return documentation needs a description after the type"
            }
            DiagnosticCode::MissingDescription => {
                "docstrings open with a prose description"
            }
            DiagnosticCode::MissingArgsSection => {
                "functions with arguments need an Args section"
            }
            DiagnosticCode::RedundantArgsSection => {
                "functions without arguments must not document any"
            }
            DiagnosticCode::RedundantReturnsSection => {
                "functions without a return type must not document one"
            }
            DiagnosticCode::MissingReturnsSection => {
                "functions returning a value need a Returns section"
            }
            DiagnosticCode::InvalidIndentation => {
                "section entries indent four spaces past their header"
            }
            DiagnosticCode::NoneDefaultNotOptional => {
                "a None default requires a hint that admits None"
            }
        }
    }

    /// Parse a code string such as `DOC005`, case-insensitively.
    pub fn parse(s: &str) -> Option<DiagnosticCode> {
        let wanted = s.trim().to_ascii_uppercase();
        DiagnosticCode::all()
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DiagnosticCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DiagnosticCode::parse(&s)
            .ok_or_else(|| D::Error::custom(format!("unknown diagnostic code '{s}'")))
    }
}

/// One positioned finding. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(pos: SourcePos, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {}", self.line, self.column, self.code, self.message)
    }
}

/// Append-only collector for one function check. Findings keep emission
/// order and are never deduplicated; one parameter may well accumulate
/// several distinct codes.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, pos: SourcePos, code: DiagnosticCode, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(pos, code, message));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Findings for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub functions_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    pub files_checked: usize,
    pub files_skipped: usize,
    pub functions_checked: usize,
    pub total_diagnostics: usize,
}

/// Everything one run produced, ready for a writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResults {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub summary: CheckSummary,
    pub files: Vec<FileReport>,
}

impl CheckResults {
    pub fn new(project_path: PathBuf, files: Vec<FileReport>, files_skipped: usize) -> Self {
        let summary = CheckSummary {
            files_checked: files.len(),
            files_skipped,
            functions_checked: files.iter().map(|f| f.functions_checked).sum(),
            total_diagnostics: files.iter().map(|f| f.diagnostics.len()).sum(),
        };
        Self {
            project_path,
            timestamp: Utc::now(),
            summary,
            files,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.summary.total_diagnostics == 0
    }
}
