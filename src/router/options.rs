use thiserror::Error;

use crate::pattern::CompileOptions;

/// Router-level configuration: an optional routing prefix stripped from every
/// candidate path before matching, and the compile options applied to every
/// registered pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouterOptions {
    pub prefix: Option<String>,
    pub compile: CompileOptions,
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if let Some(prefix) = &self.prefix {
            if prefix.trim().is_empty() {
                return Err(RouterOptionsError::EmptyPrefix);
            }
            if !prefix.starts_with('/') {
                return Err(RouterOptionsError::PrefixMissingLeadingSlash {
                    prefix: prefix.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.options.prefix = Some(prefix.into());
        self
    }

    pub fn compile(mut self, compile: CompileOptions) -> Self {
        self.options.compile = compile;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("routing prefix must not be empty")]
    EmptyPrefix,
    #[error("routing prefix '{prefix}' must start with '/'")]
    PrefixMissingLeadingSlash { prefix: String },
}
