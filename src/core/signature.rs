use crate::core::annotation::Annotation;

/// First-parameter names that are receivers rather than real arguments.
pub const RESERVED_RECEIVERS: &[&str] = &["self", "cls"];

/// Position of a syntax node, following CPython's reporting convention:
/// lines count from 1, columns count bytes from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl SourcePos {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// What a parameter's default value looks like, as far as the checks care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    /// The literal `None`.
    NoneLiteral,
    /// Any other default expression.
    Other,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<Annotation>,
    pub default: Option<DefaultKind>,
    pub pos: SourcePos,
}

impl Parameter {
    /// `self` and `cls` are receivers and exempt from every check.
    pub fn is_reserved(&self) -> bool {
        RESERVED_RECEIVERS.contains(&self.name.as_str())
    }
}

/// Frontend-supplied view of one function definition. The checker reads this
/// and the docstring text; it never touches the syntax tree itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub pos: SourcePos,
    /// Positional-only, regular, and keyword-only parameters in declaration
    /// order. `*args` and `**kwargs` are tracked by the flags below and are
    /// never members of this list.
    pub params: Vec<Parameter>,
    pub has_vararg: bool,
    pub has_kwarg: bool,
    pub returns: Option<Annotation>,
    /// Number of statements in the function body.
    pub body_len: usize,
    /// True when every body statement is a bare expression, `return`, or
    /// `raise`. Such bodies carry no logic worth documenting.
    pub passthrough_body: bool,
}

impl FunctionSignature {
    /// Index of the declared parameter with this name, if any.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Leading-underscore names are internal and exempt from docstring checks.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Dunder-style names (and the conventional `_`) are exempt from the
    /// annotation checks too.
    pub fn is_dunder(&self) -> bool {
        self.name.starts_with("__") || self.name == "_"
    }

    /// Whether the function must carry a docstring: public, with a body that
    /// does more than pass values through.
    pub fn requires_documentation(&self) -> bool {
        !self.is_private() && self.body_len > 0 && !self.passthrough_body
    }

    /// True when at least one parameter is neither `self` nor `cls`.
    pub fn has_documentable_params(&self) -> bool {
        self.params.iter().any(|p| !p.is_reserved())
    }

    /// A `Returns:` section is owed only for annotations that denote a real
    /// value; `-> None` documents nothing.
    pub fn return_requires_documentation(&self) -> bool {
        !matches!(self.returns, None | Some(Annotation::None))
    }
}
