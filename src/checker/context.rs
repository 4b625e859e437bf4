use std::collections::HashSet;

/// Which part of the docstring the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocSection {
    /// The prose before any recognized header.
    #[default]
    Description,
    /// Inside `Args:`.
    Arguments,
    /// The line immediately after `Returns:`, which carries the type.
    ReturnFirstLine,
    /// Continuation lines under `Returns:`.
    ReturnRest,
    /// After `Raises:` and friends; content there is not checked.
    Misc,
}

/// Scan state for one docstring. Built fresh per function, mutated line by
/// line, then read once by the post-scan verification.
#[derive(Debug, Default)]
pub struct DocContext {
    pub section: DocSection,
    pub found_description: bool,
    pub found_args: bool,
    pub found_return: bool,
    /// Indent expected of argument entries: the `Args:` header indent plus 4.
    pub args_indent: usize,
    /// Indent expected of the return type line: header indent plus 4.
    pub return_indent: usize,
    /// Index of the parameter expected next, for the ordering check.
    pub current_arg: usize,
    /// Indices of declared parameters seen in the docs so far.
    pub documented: HashSet<usize>,
    pub invalid_indents: usize,
    pub first_invalid_indent: Option<String>,
}

impl DocContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one malformed indent, remembering a snippet of the first.
    pub fn record_invalid_indent(&mut self, line: &str) {
        if self.invalid_indents == 0 {
            self.first_invalid_indent = Some(snippet(line));
        }
        self.invalid_indents += 1;
    }
}

/// Trim and clamp an offending line for the indent summary message.
fn snippet(line: &str) -> String {
    let line = line.trim();
    if line.chars().count() > 18 {
        let head: String = line.chars().take(15).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}
