/// Shape of a Python type annotation, reduced to the forms the checker
/// understands. Language frontends fold their AST into this closed set once;
/// everything downstream works on these variants and never sees raw syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// A bare name such as `int` or `ndarray`.
    Name(String),
    /// Attribute access such as `np.ndarray`; only the trailing member is kept.
    Attribute(String),
    /// A subscripted generic such as `List[int]` or `Optional[Union[A, B]]`.
    Subscript {
        value: Box<Annotation>,
        slice: Box<Annotation>,
    },
    /// A list literal of element types, e.g. the `[int, str]` in `Callable[[int, str], bool]`.
    List(Vec<Annotation>),
    /// A bare tuple of element types, e.g. the `int, ...` inside `Tuple[int, ...]`.
    Tuple(Vec<Annotation>),
    /// The literal `...`.
    Ellipsis,
    /// The literal `None`.
    None,
    /// A PEP 604 union such as `str | None`.
    Union(Box<Annotation>, Box<Annotation>),
    /// Anything else (calls, string literals, dict literals). Renders empty.
    Unsupported,
}

impl Annotation {
    /// Render the display string a docstring type field is compared against.
    ///
    /// The policy is lenient on purpose: shapes outside the supported set
    /// render as an empty string rather than an error, and a `Subscript`
    /// whose value is not a bare name renders empty as a whole. Elements of
    /// lists, tuples, and unions are joined without spaces; callers compare
    /// whitespace-stripped strings anyway.
    pub fn render(&self) -> String {
        match self {
            Annotation::Name(id) => id.clone(),
            Annotation::Attribute(member) => member.clone(),
            Annotation::Subscript { value, slice } => match value.as_ref() {
                Annotation::Name(id) => format!("{}[{}]", id, slice.render()),
                _ => String::new(),
            },
            Annotation::List(elts) => format!("[{}]", render_joined(elts)),
            Annotation::Tuple(elts) => render_joined(elts),
            Annotation::Ellipsis => "...".to_string(),
            Annotation::None => "None".to_string(),
            Annotation::Union(left, right) => format!("{}|{}", left.render(), right.render()),
            Annotation::Unsupported => String::new(),
        }
    }

    /// Whether the annotation admits `None`: a union whose rightmost arm is
    /// `None`, an `Optional[...]` subscript, or the bare `None` literal.
    pub fn allows_none(&self) -> bool {
        match self {
            Annotation::None => true,
            Annotation::Union(_, right) => right.allows_none(),
            Annotation::Subscript { value, .. } => {
                matches!(value.as_ref(), Annotation::Name(id) if id == "Optional")
            }
            _ => false,
        }
    }
}

fn render_joined(elts: &[Annotation]) -> String {
    elts.iter()
        .map(Annotation::render)
        .collect::<Vec<_>>()
        .join(",")
}

/// Remove every whitespace character. Type comparisons never care about
/// spacing, so both sides are normalized through this first.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compare a rendered annotation against a documented type string.
///
/// Both inputs must already be whitespace-stripped. Beyond exact equality,
/// the documented side may be a dotted path whose final segment names the
/// annotation, so `numpy.ndarray` documents a signature's bare `ndarray`.
pub fn types_match(rendered: &str, documented: &str) -> bool {
    if rendered == documented {
        return true;
    }
    match documented.rsplit_once('.') {
        Some((_, last)) => rendered == last,
        None => false,
    }
}
