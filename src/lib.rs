// Export modules for library usage
pub mod analyzers;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;

// Re-export commonly used types
pub use crate::analyzers::{check_file, PythonAnalyzer};
pub use crate::checker::check_function;
pub use crate::config::DocdriftConfig;
pub use crate::core::{
    strip_whitespace, types_match, Annotation, CheckResults, CheckSummary, DefaultKind,
    Diagnostic, DiagnosticCode, DiagnosticSink, FileReport, FunctionSignature, Parameter,
    SourcePos,
};
pub use crate::errors::DocdriftError;
