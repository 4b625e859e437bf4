use once_cell::sync::Lazy;
use regex::Regex;

/// `Args:` section header. Group 1 is the header's indentation.
pub static ARGS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)Args\s*:\s*$").unwrap());

/// `Returns:` or `Yields:` section header.
pub static RETURN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(Returns|Yields)\s*:\s*$").unwrap());

/// Headers that switch the scan into the free-form tail of the docstring.
pub static MISC_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(Throws|Raises|See Also|Note|Example|Examples|Warnings)\s*:\s*$").unwrap()
});

/// One documented argument: indentation, a name optionally wrapped in
/// backticks and/or star-prefixed, an optional parenthesized type, and the
/// description after the colon. Lines without the colon do not match.
pub static ARG_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(`{0,2}\*{0,2}\w*`{0,2})\s*(\([^:]*\))?\s*:\s*(.*)").unwrap());

/// First line under a `Returns:` header: indentation, type text, an optional
/// colon, and the rest. Matches any line; the colon decides whether group 2
/// is a type or already the description.
pub static RETURN_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([^:]*)\s*(:)?\s*(.*)").unwrap());

/// Any line with visible content; group 1 is its indentation.
pub static INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\S+.*").unwrap());
