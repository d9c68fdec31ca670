// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A failed generation, named by the stage that failed.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to read {}: {source}", .path.display())]
    FileRead { path: PathBuf, source: io::Error },

    #[error("template syntax error: {0}")]
    TemplateSyntax(String),

    #[error("template evaluation error: {0}")]
    TemplateEvaluation(String),

    #[error("yaml parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("failed to write {}: {source}", .path.display())]
    FileWrite { path: PathBuf, source: io::Error },

    #[error("invalid variables: {0}")]
    Vars(String),

    #[error("{} is out of date, regenerate it", .path.display())]
    Stale { path: PathBuf },
}
