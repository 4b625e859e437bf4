use std::fs;
use std::path::Path;

use crate::core::FileReport;
use crate::errors::DocdriftError;

pub mod python;

pub use python::PythonAnalyzer;

/// Read one file from disk and check it.
pub fn check_file(path: &Path) -> Result<FileReport, DocdriftError> {
    let content = fs::read_to_string(path).map_err(|e| DocdriftError::io(path, e))?;
    PythonAnalyzer::new().check_source(&content, path)
}
