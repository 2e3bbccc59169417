pub const DEFAULT_DELIMITER: &str = "/#?";
pub const DEFAULT_PREFIXES: &str = "./";

/// Transformation applied to literal text before it is escaped into the
/// automaton source. The default leaves text untouched;
/// [`percent_encode`](crate::matcher::percent_encode) is a drop-in choice
/// for routes registered from unencoded text.
pub type EncodeFn = fn(&str) -> String;

fn identity(value: &str) -> String {
    value.to_string()
}

/// Compilation surface for route patterns. Every field has a documented
/// default; unknown settings cannot exist.
///
/// `delimiter` and `prefixes` drive parsing (default capture pattern and
/// parameter prefix promotion), the rest drive automaton construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Match case-sensitively. Default `false`.
    pub sensitive: bool,
    /// Require the path to end exactly at the pattern, with no trailing
    /// delimiter allowance. Default `false`.
    pub strict: bool,
    /// Anchor the automaton at the beginning of the path. Default `true`.
    pub start: bool,
    /// Anchor the automaton at the end of the path. Default `true`.
    pub end: bool,
    /// Characters that terminate an unconstrained parameter capture and
    /// count as segment boundaries. Default `"/#?"`.
    pub delimiter: String,
    /// Characters that may terminate the match when `end` handling needs a
    /// boundary other than end-of-path. Default empty.
    pub ends_with: String,
    /// Characters eligible to become a parameter's implicit prefix instead
    /// of literal text. Default `"./"`.
    pub prefixes: String,
    /// Literal-text encoder. Default identity.
    pub encode: EncodeFn,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            start: true,
            end: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
            ends_with: String::new(),
            prefixes: DEFAULT_PREFIXES.to_string(),
            encode: identity,
        }
    }
}

impl CompileOptions {
    pub fn builder() -> CompileOptionsBuilder {
        CompileOptionsBuilder::default()
    }

    /// Delimiter set consulted by the parser. An empty delimiter falls back
    /// to the default at the parse layer only; the compiler honors an empty
    /// set by dropping its boundary constructs.
    pub(crate) fn parse_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CompileOptionsBuilder {
    options: CompileOptions,
}

impl CompileOptionsBuilder {
    pub fn sensitive(mut self, value: bool) -> Self {
        self.options.sensitive = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.options.strict = value;
        self
    }

    pub fn start(mut self, value: bool) -> Self {
        self.options.start = value;
        self
    }

    pub fn end(mut self, value: bool) -> Self {
        self.options.end = value;
        self
    }

    pub fn delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.options.delimiter = delimiter.into();
        self
    }

    pub fn ends_with<S: Into<String>>(mut self, ends_with: S) -> Self {
        self.options.ends_with = ends_with.into();
        self
    }

    pub fn prefixes<S: Into<String>>(mut self, prefixes: S) -> Self {
        self.options.prefixes = prefixes.into();
        self
    }

    pub fn encode(mut self, encode: EncodeFn) -> Self {
        self.options.encode = encode;
        self
    }

    pub fn build(self) -> CompileOptions {
        self.options
    }
}
