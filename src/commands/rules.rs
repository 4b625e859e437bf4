use colored::*;

use crate::core::DiagnosticCode;

/// Print every diagnostic code with its one-line rationale.
pub fn run_rules() {
    for code in DiagnosticCode::all() {
        println!("{}  {}", code.as_str().yellow().bold(), code.help());
    }
}
