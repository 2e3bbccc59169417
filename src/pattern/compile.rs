use std::fmt;

use fancy_regex::Regex;

use super::error::PatternResult;
use super::options::CompileOptions;
use super::parser::{Key, ParamKey, Quantifier, Segment, parse};

/// Compile input: a route template in the pattern grammar, a raw regex used
/// as-is with its capture groups introspected, or a list combined into one
/// alternation under a single flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePath {
    Template(String),
    Regex(String),
    List(Vec<RoutePath>),
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => f.write_str(template),
            Self::Regex(raw) => f.write_str(raw),
            Self::List(paths) => {
                for (position, path) in paths.iter().enumerate() {
                    if position > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{path}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for RoutePath {
    fn from(template: &str) -> Self {
        Self::Template(template.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}

impl From<Vec<RoutePath>> for RoutePath {
    fn from(paths: Vec<RoutePath>) -> Self {
        Self::List(paths)
    }
}

impl From<Vec<&str>> for RoutePath {
    fn from(templates: Vec<&str>) -> Self {
        Self::List(templates.into_iter().map(RoutePath::from).collect())
    }
}

/// Escapes the characters the grammar can place in literal regex positions:
/// `. + * ? = ^ ! : $ { } ( ) [ ] | / \`.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(
            ch,
            '.' | '+'
                | '*'
                | '?'
                | '='
                | '^'
                | '!'
                | ':'
                | '$'
                | '{'
                | '}'
                | '('
                | ')'
                | '['
                | ']'
                | '|'
                | '/'
                | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn inline_flags(options: &CompileOptions) -> &'static str {
    if options.sensitive { "" } else { "(?i)" }
}

/// Character-class source for a boundary set; `None` when the set is empty.
/// The host syntax rejects `[]`, which could never match anyway.
fn class_of(set: &str) -> Option<String> {
    if set.is_empty() {
        None
    } else {
        Some(format!("[{}]", escape(set)))
    }
}

/// Compiles `path` into its automaton plus the ordered parameter keys. Key
/// order always equals capture-group order in the automaton.
#[tracing::instrument(level = "trace", skip(options))]
pub fn compile(path: &RoutePath, options: &CompileOptions) -> PatternResult<(Regex, Vec<Key>)> {
    let mut keys = Vec::new();
    let source = route_source(path, &mut keys, options)?;
    // A raw regex owns its flags; everything else shares the option-driven
    // flag set.
    let source = match path {
        RoutePath::Regex(_) => source,
        _ => format!("{}{}", inline_flags(options), source),
    };

    let regex = Regex::new(&source)?;

    tracing::event!(
        tracing::Level::DEBUG,
        source = %regex.as_str(),
        keys = keys.len(),
        "route pattern compiled"
    );

    Ok((regex, keys))
}

fn route_source(
    path: &RoutePath,
    keys: &mut Vec<Key>,
    options: &CompileOptions,
) -> PatternResult<String> {
    match path {
        RoutePath::Template(template) => template_source(template, keys, options),
        RoutePath::Regex(raw) => {
            raw_regex_keys(raw, keys);
            Ok(raw.clone())
        }
        RoutePath::List(paths) => {
            let mut parts = Vec::with_capacity(paths.len());
            for path in paths {
                parts.push(route_source(path, keys, options)?);
            }
            Ok(format!("(?:{})", parts.join("|")))
        }
    }
}

fn template_source(
    template: &str,
    keys: &mut Vec<Key>,
    options: &CompileOptions,
) -> PatternResult<String> {
    // The grammar has no bare-wildcard production; the single-character
    // template "*" is the documented wildcard and compiles as "(.*)".
    let template = if template == "*" { "(.*)" } else { template };
    let segments = parse(template, options)?;
    Ok(segments_to_source(&segments, keys, options))
}

fn segments_to_source(
    segments: &[Segment],
    keys: &mut Vec<Key>,
    options: &CompileOptions,
) -> String {
    let encode = options.encode;
    let delimiter_class = class_of(&options.delimiter);
    let ends_with_re = match class_of(&options.ends_with) {
        Some(class) => format!("{class}|$"),
        None => "$".to_string(),
    };

    let mut route = String::from(if options.start { "^" } else { "" });

    for segment in segments {
        match segment {
            Segment::Literal(text) => route.push_str(&escape(&encode(text))),
            Segment::Param(key) => {
                let prefix = escape(&encode(&key.prefix));
                let suffix = escape(&encode(&key.suffix));

                if key.is_capturing() {
                    keys.push(key.clone());

                    if !prefix.is_empty() || !suffix.is_empty() {
                        if key.modifier.is_repeating() {
                            // Repetitions separated by suffix+prefix, all
                            // inside one capture.
                            let outer = if key.modifier == Quantifier::ZeroOrMore {
                                "?"
                            } else {
                                ""
                            };
                            route.push_str(&format!(
                                "(?:{prefix}((?:{pattern})(?:{suffix}{prefix}(?:{pattern}))*){suffix}){outer}",
                                pattern = key.pattern,
                            ));
                        } else {
                            route.push_str(&format!(
                                "(?:{prefix}({pattern}){suffix}){modifier}",
                                pattern = key.pattern,
                                modifier = key.modifier.as_str(),
                            ));
                        }
                    } else if key.modifier.is_repeating() {
                        route.push_str(&format!("((?:{}){})", key.pattern, key.modifier.as_str()));
                    } else {
                        route.push_str(&format!("({}){}", key.pattern, key.modifier.as_str()));
                    }
                } else {
                    route.push_str(&format!("(?:{prefix}{suffix}){}", key.modifier.as_str()));
                }
            }
        }
    }

    if options.end {
        if !options.strict && let Some(class) = &delimiter_class {
            route.push_str(class);
            route.push('?');
        }

        if options.ends_with.is_empty() {
            route.push('$');
        } else {
            route.push_str(&format!("(?={ends_with_re})"));
        }
    } else {
        let end_delimited = match segments.last() {
            None => true,
            Some(Segment::Literal(text)) => text
                .chars()
                .last()
                .is_some_and(|last| options.delimiter.contains(last)),
            Some(Segment::Param(_)) => false,
        };

        if !options.strict && let Some(class) = &delimiter_class {
            route.push_str(&format!("(?:{class}(?={ends_with_re}))?"));
        }

        if !end_delimited {
            match &delimiter_class {
                Some(class) => route.push_str(&format!("(?={class}|{ends_with_re})")),
                None => route.push_str(&format!("(?={ends_with_re})")),
            }
        }
    }

    route
}

/// Walks the capture groups of a raw regex source in order, recording one
/// opaque key per group: the declared name for `(?<name>` / `(?P<name>`,
/// else the next positional index. Escapes, bracket classes, non-capturing
/// groups and lookarounds do not capture.
fn raw_regex_keys(source: &str, keys: &mut Vec<Key>) {
    let bytes = source.as_bytes();
    let mut index = 0usize;
    let mut i = 0usize;
    let mut in_class = false;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' if !in_class => {
                in_class = true;
                i += 1;
            }
            b']' if in_class => {
                in_class = false;
                i += 1;
            }
            b'(' if !in_class => {
                i += 1;
                if bytes.get(i) != Some(&b'?') {
                    keys.push(opaque_key(ParamKey::Index(index)));
                    index += 1;
                    continue;
                }

                let name_start = match (bytes.get(i + 1), bytes.get(i + 2)) {
                    (Some(b'<'), Some(b'=')) | (Some(b'<'), Some(b'!')) => None,
                    (Some(b'<'), _) => Some(i + 2),
                    (Some(b'P'), Some(b'<')) => Some(i + 3),
                    _ => None,
                };
                if let Some(start) = name_start
                    && let Some(close) = source[start..].find('>')
                {
                    keys.push(opaque_key(ParamKey::Name(
                        source[start..start + close].to_string(),
                    )));
                }
            }
            _ => i += 1,
        }
    }
}

fn opaque_key(name: ParamKey) -> Key {
    Key {
        name,
        prefix: String::new(),
        suffix: String::new(),
        pattern: String::new(),
        modifier: Quantifier::One,
    }
}
