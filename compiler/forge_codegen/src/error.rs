use std::io;
use std::path::{Path, PathBuf};

use forge_fmt::FormatError;
use thiserror::Error;

use crate::template::TemplateError;

/// Failure while emitting or scaffolding. Emission stops at the first one.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("no template named `{0}`")]
    UnknownTemplate(String),

    #[error("formatting {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serializing API document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serializing API document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl EmitError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> EmitError + '_ {
        move |source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
