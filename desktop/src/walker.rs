use std::path::{Path, PathBuf};

use log::{info, trace};
use walkdir::WalkDir;

use crate::error::{ConvertError, Result};

/// A PNG found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngEntry {
    pub path: PathBuf,
    /// Directory of the file relative to the input root, empty at the top level.
    pub relative_dir: PathBuf,
    pub stem: String,
}

impl PngEntry {
    pub fn output_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.relative_dir)
    }

    pub fn output_path(&self, output_root: &Path, extension: &str) -> PathBuf {
        self.output_dir(output_root)
            .join(format!("{}.{}", self.stem, extension))
    }
}

pub fn is_png(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

pub struct AssetTree {
    root: PathBuf,
}

impl AssetTree {
    pub fn open(input_root: &Path) -> Result<Self> {
        let root = std::path::absolute(input_root).unwrap_or_else(|_| input_root.to_path_buf());
        if !root.is_dir() {
            return Err(ConvertError::InputNotFound(root));
        }
        info!("Scanning {}", root.display());
        Ok(AssetTree { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields every PNG below the root. Unreadable directories are
    /// reported as errors and the walk continues past them.
    pub fn png_entries(&self) -> impl Iterator<Item = Result<PngEntry>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => return Some(Err(ConvertError::from(err))),
                };
                let is_file = entry.file_type().is_file()
                    || (entry.path_is_symlink() && entry.path().is_file());
                if !is_file {
                    return None;
                }
                if !is_png(entry.path()) {
                    trace!("Skipping {}", entry.path().display());
                    return None;
                }
                Some(Ok(self.entry_for(entry.path())))
            })
    }

    fn entry_for(&self, path: &Path) -> PngEntry {
        let relative_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        PngEntry {
            path: path.to_path_buf(),
            relative_dir,
            stem,
        }
    }
}
