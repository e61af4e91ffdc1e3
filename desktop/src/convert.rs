use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use lvimg_core::{
    asset::{ImageAsset, Symbol},
    rgb565::Rgb565Buffer,
};

use crate::{
    error::{ConvertError, Result},
    walker::{AssetTree, PngEntry},
};

pub const SOURCE_EXTENSION: &str = "c";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub converted: usize,
    pub failed: usize,
}

pub struct Converter {
    tree: AssetTree,
    output_root: PathBuf,
}

impl Converter {
    pub fn new(input_root: &Path, output_root: &Path) -> Result<Self> {
        let tree = AssetTree::open(input_root)?;
        let output_root =
            std::path::absolute(output_root).unwrap_or_else(|_| output_root.to_path_buf());
        Ok(Converter { tree, output_root })
    }

    /// Converts every PNG in the tree. A failing file is logged and skipped,
    /// the remaining files are still converted.
    pub fn run(&self) -> Summary {
        info!(
            "Converting {} -> {}",
            self.tree.root().display(),
            self.output_root.display()
        );
        let mut summary = Summary::default();
        for entry in self.tree.png_entries() {
            let result = entry.and_then(|entry| {
                let out = self.convert(&entry)?;
                println!("[OK] {} -> {}", entry.path.display(), out.display());
                Ok(())
            });
            match result {
                Ok(()) => summary.converted += 1,
                Err(err @ ConvertError::Walk(_)) => {
                    warn!("{err}");
                    summary.failed += 1;
                }
                Err(err) => {
                    error!("{err}");
                    summary.failed += 1;
                }
            }
        }
        info!(
            "Converted {} image(s), {} failure(s)",
            summary.converted, summary.failed
        );
        summary
    }

    /// Decodes, encodes and writes one PNG. Returns the written source path.
    pub fn convert(&self, entry: &PngEntry) -> Result<PathBuf> {
        let pixels = decode(&entry.path)?;
        let symbol = Symbol::from_file_stem(&entry.stem);
        let source = ImageAsset::new(&symbol, &pixels).to_c_source();

        let out_dir = entry.output_dir(&self.output_root);
        std::fs::create_dir_all(&out_dir).map_err(|err| ConvertError::write(&out_dir, err))?;
        debug!("Output directory {}", out_dir.display());

        let out_path = entry.output_path(&self.output_root, SOURCE_EXTENSION);
        std::fs::write(&out_path, source).map_err(|err| ConvertError::write(&out_path, err))?;
        Ok(out_path)
    }
}

fn decode(path: &Path) -> Result<Rgb565Buffer> {
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| ConvertError::decode(path, err))?
        .decode()
        .map_err(|err| ConvertError::decode(path, err))?
        .into_rgba8();

    let (width, height) = image.dimensions();
    let pixels = Rgb565Buffer::from_rgba8(width, height, image.as_raw()).map_err(|source| {
        ConvertError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(
        "{}: {}x{}, {} bytes",
        path.display(),
        width,
        height,
        pixels.len()
    );
    Ok(pixels)
}
