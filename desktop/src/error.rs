use std::path::{Path, PathBuf};

use lvimg_core::rgb565::EncodeError;

#[derive(Debug)]
pub enum ConvertError {
    InputNotFound(PathBuf),
    Walk(walkdir::Error),
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    Encode {
        path: PathBuf,
        source: EncodeError,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn decode(path: &Path, source: impl Into<image::ImageError>) -> Self {
        ConvertError::Decode {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        ConvertError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<walkdir::Error> for ConvertError {
    fn from(err: walkdir::Error) -> Self {
        ConvertError::Walk(err)
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::InputNotFound(path) => {
                write!(f, "Input directory not found: {}", path.display())
            }
            ConvertError::Walk(err) => match err.path() {
                Some(path) => write!(f, "Failed to walk {}: {}", path.display(), err),
                None => write!(f, "Failed to walk input tree: {}", err),
            },
            ConvertError::Decode { path, source } => {
                write!(f, "Failed to decode {}: {}", path.display(), source)
            }
            ConvertError::Encode { path, source } => {
                write!(f, "Failed to encode {}: {}", path.display(), source)
            }
            ConvertError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::InputNotFound(_) => None,
            ConvertError::Walk(err) => Some(err),
            ConvertError::Decode { source, .. } => Some(source),
            ConvertError::Encode { .. } => None,
            ConvertError::Write { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = core::result::Result<T, ConvertError>;
