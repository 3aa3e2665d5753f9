//! Layer stack flattening and PNG output

use crate::collection::design::RenderJob;
use crate::io::configuration::{NAME_FORMAT_SLOT, OUTPUT_EXTENSION};
use crate::io::error::{BuildError, Result};
use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};

/// Immutable rendering configuration shared by every job
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Directory receiving composited images
    pub output_dir: PathBuf,
    /// Filename template with one `{}` slot for the unique index
    pub name_format: String,
}

impl RenderOptions {
    /// Output path for a job with the given unique index
    pub fn output_path(&self, unique_index: &str) -> PathBuf {
        let name = self.name_format.replacen(NAME_FORMAT_SLOT, unique_index, 1);
        self.output_dir.join(format!("{name}.{OUTPUT_EXTENSION}"))
    }
}

/// Flatten a job's layer stack into one image and write it to disk
///
/// The first layer defines the canvas dimensions; each subsequent layer is
/// composited over it at the origin using its own alpha channel. Layer
/// dimensions are not validated against the canvas. An existing output file
/// of the same name is overwritten.
///
/// # Errors
///
/// Returns an error if the job has no layers, a layer image cannot be loaded,
/// or the composited image cannot be saved.
pub fn render(job: &RenderJob, options: &RenderOptions) -> Result<PathBuf> {
    let mut paths = job.layers.iter();
    let base_path = paths.next().ok_or_else(|| BuildError::EmptyJob {
        unique_index: job.unique_index.clone(),
    })?;

    let mut canvas = open_layer(base_path)?;
    for path in paths {
        let layer = open_layer(path)?;
        imageops::overlay(&mut canvas, &layer, 0, 0);
    }

    let output_path = options.output_path(&job.unique_index);
    canvas
        .save(&output_path)
        .map_err(|e| BuildError::ImageExport {
            path: output_path.clone(),
            source: e,
        })?;

    Ok(output_path)
}

fn open_layer(path: &Path) -> Result<RgbaImage> {
    let layer = image::open(path).map_err(|e| BuildError::LayerLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(layer.to_rgba8())
}
