//! End-to-end checks over real Python sources: parse, extract, scan, verify.

use docdrift::analyzers::PythonAnalyzer;
use docdrift::{DiagnosticCode, FileReport};
use pretty_assertions::assert_eq;
use std::path::Path;

fn check(code: &str) -> FileReport {
    PythonAnalyzer::new()
        .check_source(code, Path::new("fixture.py"))
        .unwrap()
}

fn codes(code: &str) -> Vec<DiagnosticCode> {
    check(code).diagnostics.into_iter().map(|d| d.code).collect()
}

#[test]
fn fully_documented_module_is_clean() {
    let code = r#"
"""Module docstring."""


def resize(width: int, height: int) -> bool:
    """Resize the canvas.

    Args:
        width (int): target width.
        height (int): target height.

    Returns:
        bool: whether anything changed.
    """
    state = width + height
    return state > 0


def clamp(value: int, /, low: int, high: int) -> int:
    """Clamp a value into a range.

    Args:
        value (int): raw value.
        low (int): lower bound.
        high (int): upper bound.

    Returns:
        int: the clamped value.
    """
    result = max(low, min(high, value))
    return result
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 2);
    assert_eq!(report.diagnostics, vec![]);
}

#[test]
fn indent_slips_are_counted_once_with_first_offender() {
    let code = r#"
def resize(width: int, height: int) -> bool:
    """Resize the canvas.

    Args:
      width (int): target width.
        height (int): target height.
            wrapped continuation line.

    Returns:
        bool: whether anything changed.
          over-wrapped tail.
    """
    state = width + height
    return state > 0
"#;
    let report = check(code);
    assert_eq!(report.diagnostics.len(), 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::InvalidIndentation);
    assert_eq!(
        d.message,
        "found 2 invalid documentation indents, starting with ('width')."
    );
}

#[test]
fn none_default_needs_an_optional_hint() {
    let code = r#"
def configure(mode: str, level: str = None) -> None:
    """Configure the runtime.

    Args:
        mode (str): run mode.
        level (str): verbosity, defaults when omitted.
    """
    state = {}
    state[mode] = level
"#;
    let report = check(code);
    assert_eq!(report.diagnostics.len(), 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::NoneDefaultNotOptional);
    assert_eq!((d.line, d.column), (2, 0));
    assert!(d.message.contains("'level'"));
}

#[test]
fn pep604_unions_render_with_pipes() {
    let code = r#"
def coerce(value: str | None) -> str:
    """Coerce a value.

    Args:
        value (str | None): maybe missing.

    Returns:
        str: the coerced value.
    """
    result = value or ""
    return result
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn nested_generics_match_whitespace_insensitively() {
    let code = r#"
def merge(table: Dict[str, List[int]], fallback: Optional[Union[int, float]]) -> Tuple[int, ...]:
    """Merge keyed counters.

    Args:
        table (Dict[str,List[int]]): keyed counters.
        fallback (Optional[Union[int, float]]): used when a key is empty.

    Returns:
        Tuple[int, ...]: merged counts.
    """
    data = dict(table)
    return tuple(data)
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn callable_annotations_render_their_argument_list() {
    let code = r#"
def register(hook: Callable[[int, str], bool]) -> None:
    """Register a hook.

    Args:
        hook (Callable[[int, str], bool]): invoked per event.
    """
    hooks = []
    hooks.append(hook)
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn generic_mismatch_reports_both_spellings() {
    let code = r#"
def tally(counts: List[int]) -> None:
    """Tally counters.

    Args:
        counts (List[str]): mistyped element.
    """
    total = sum(counts)
    print(total)
"#;
    let report = check(code);
    assert_eq!(report.diagnostics.len(), 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::DocParamTypeMismatch);
    assert!(d.message.contains("expected: 'List[int]'"));
    assert!(d.message.contains("documented as: 'List[str]'"));
}

#[test]
fn keyword_only_parameters_document_in_declaration_order() {
    let code = r#"
def schedule(task: str, *, delay: int, repeat: bool) -> None:
    """Schedule a task.

    Args:
        task (str): task name.
        delay (int): seconds to wait.
        repeat (bool): whether to requeue.
    """
    queue = make_queue()
    queue.put((task, delay, repeat))
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn yields_header_counts_as_return_documentation() {
    let code = r#"
def stream(limit: int) -> Iterator[int]:
    """Stream values.

    Args:
        limit (int): item budget.

    Yields:
        Iterator[int]: values in order.
    """
    for i in range(limit):
        yield i
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn raises_section_is_not_checked() {
    let code = r#"
def load(path: str) -> bytes:
    """Load a file.

    Args:
        path (str): file location.

    Returns:
        bytes: raw contents.

    Raises:
        OSError: when the path is unreadable
              with continuation lines at odd depths.
    """
    handle = open(path, "rb")
    return handle.read()
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn methods_report_positions_inside_the_class() {
    let code = r#"
class Shape:
    def area(self, scale):
        ...
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 1);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.diagnostics[0].code, DiagnosticCode::MissingParamAnnotation);
    assert_eq!(
        (report.diagnostics[0].line, report.diagnostics[0].column),
        (3, 19)
    );
    assert_eq!(report.diagnostics[1].code, DiagnosticCode::MissingReturnAnnotation);
    assert_eq!(
        (report.diagnostics[1].line, report.diagnostics[1].column),
        (3, 4)
    );
}

#[test]
fn classmethods_with_cls_need_no_receiver_docs() {
    let code = r#"
class Registry:
    def add(self, name: str) -> None:
        """Add an entry.

        Args:
            name (str): entry name.
        """
        items = self.items
        items.append(name)

    @classmethod
    def shared(cls) -> None:
        """Install the shared registry."""
        cls.instance = object()
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 2);
    assert_eq!(report.diagnostics, vec![]);
}

#[test]
fn defs_inside_match_arms_are_checked() {
    let code = r#"
def route(kind: str) -> None:
    """Dispatch on the payload kind.

    Args:
        kind (str): discriminator tag.
    """
    match kind:
        case "event":
            def handler(payload: int) -> None:
                count = payload + 1
                print(count)
        case _:
            pass
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 2);
    assert_eq!(report.diagnostics.len(), 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::MissingDocstring);
    assert_eq!((d.line, d.column), (10, 12));
}

#[test]
fn defs_inside_except_group_handlers_are_checked() {
    let code = r#"
try:
    connect()
except* OSError:
    def retry(delay: int) -> None:
        wait = delay * 2
        sleep(wait)
finally:
    def cleanup(handle: int) -> None:
        state = handle - 1
        release(state)
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 2);
    let found: Vec<_> = report.diagnostics.iter().map(|d| (d.line, d.code)).collect();
    assert_eq!(
        found,
        vec![
            (5, DiagnosticCode::MissingDocstring),
            (9, DiagnosticCode::MissingDocstring),
        ]
    );
}

#[test]
fn docstring_is_found_even_behind_a_leading_expression() {
    let code = r#"
def weird() -> None:
    42
    """Still the docstring."""
    value = 1
    print(value)
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn oversized_entries_skip_the_description_requirement() {
    let code = r#"
def apply_threshold(minimum_acceptable_signal_to_noise_ratio_for_detection: Dict[str, Union[int, float, complex]]) -> None:
    """Apply detection thresholds.

    Args:
        minimum_acceptable_signal_to_noise_ratio_for_detection (Dict[str, Union[int, float, complex]]):
    """
    stored = [minimum_acceptable_signal_to_noise_ratio_for_detection]
    print(stored)
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn raise_only_bodies_need_no_docstring() {
    let code = r#"
def not_implemented() -> int:
    raise NotImplementedError("todo")
"#;
    assert_eq!(codes(code), vec![]);
}

#[test]
fn diagnostics_accumulate_across_functions_in_order() {
    let code = r#"
def first(x: int) -> None:
    y = x + 1
    print(y)


def second(a: int, b: int) -> int:
    """Adds.

    Args:
        b (int): out of order.
        a (int): out of order.

    Returns:
        int: the sum.
    """
    total = a + b
    return total
"#;
    let report = check(code);
    assert_eq!(report.functions_checked, 2);
    let found: Vec<_> = report.diagnostics.iter().map(|d| (d.line, d.code)).collect();
    assert_eq!(
        found,
        vec![
            (2, DiagnosticCode::MissingDocstring),
            (7, DiagnosticCode::DocParamOutOfOrder),
            (7, DiagnosticCode::DocParamOutOfOrder),
        ]
    );
}

#[test]
fn report_remembers_the_checked_path() {
    let report = check("x = 1\n");
    assert_eq!(report.path, Path::new("fixture.py"));
    assert_eq!(report.functions_checked, 0);
}
