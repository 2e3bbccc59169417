mod compile;
mod error;
mod lexer;
mod options;
mod parser;

pub use compile::{RoutePath, compile, escape};
pub use error::{PatternError, PatternResult};
pub use lexer::{LexToken, TokenKind, lex};
pub use options::{
    CompileOptions, CompileOptionsBuilder, DEFAULT_DELIMITER, DEFAULT_PREFIXES, EncodeFn,
};
pub use parser::{Key, ParamKey, Quantifier, Segment, parse};
