//! Errors raised while configuring or running rewrite passes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unknown pass `{0}` (expected one of: rename, fold, inline-code)")]
    UnknownPass(String),

    #[error("invalid pipeline configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("max-iterations must be at least 1")]
    NoIterations,

    #[error("template `{format}` references argument {index} but only {available} supplied")]
    TemplateArgument {
        format: String,
        index: usize,
        available: usize,
    },

    #[error("malformed template `{format}` at byte {offset}")]
    MalformedTemplate { format: String, offset: usize },
}

pub type Result<T> = std::result::Result<T, TransformError>;
