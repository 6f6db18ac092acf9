use std::path::{Path, PathBuf};

use pipeline::{Override, Setting};

pub const DEFAULT_PIXEL_SIZE: f64 = 2.0;
pub const DEFAULT_DATA_TYPE: &str = "uint16";
pub const DEFAULT_BANDS: &str = "ALL";

/// OSTN02 NTv2 transform grid, needed to project into the British National Grid.
pub const DEFAULT_TRANSFORM_GRID: &str = "/apps/contrib/arsf/arsf_common/ostn02/OSTN02_NTv2.gsb";

/// Explicit locations and settings for a run.
/// Anything left as `None` is inferred from the item's own directory, or
/// reported as missing if the pipeline needs it and it can't be inferred.
#[derive(Debug, Clone)]
pub struct Conventions {
    pub masks_dir: Option<PathBuf>,
    pub nav_dir: Option<PathBuf>,
    pub view_vectors: Option<PathBuf>,
    pub dem: Option<PathBuf>,
    pub projection: Option<String>,
    pub pixel_size: f64,
    pub data_type: String,
    pub bands: String,
    /// write compressed LAZ instead of LAS
    pub laz: bool,
    /// required when projecting to the national grid
    pub transform_grid: PathBuf,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            masks_dir: None,
            nav_dir: None,
            view_vectors: None,
            dem: None,
            projection: None,
            pixel_size: DEFAULT_PIXEL_SIZE,
            data_type: DEFAULT_DATA_TYPE.to_owned(),
            bands: DEFAULT_BANDS.to_owned(),
            laz: false,
            transform_grid: PathBuf::from(DEFAULT_TRANSFORM_GRID),
        }
    }
}

impl Conventions {
    pub fn override_path(&self, which: Override) -> Option<&Path> {
        match which {
            Override::Masks => self.masks_dir.as_deref(),
            Override::Navigation => self.nav_dir.as_deref(),
            Override::ViewVectors => self.view_vectors.as_deref(),
        }
    }

    /// Settings that name a file.
    pub fn file(&self, setting: Setting) -> Option<&Path> {
        match setting {
            Setting::Dem => self.dem.as_deref(),
            _ => None,
        }
    }

    /// Settings passed through to the job as text. Blank values count as unset.
    pub fn param(&self, setting: Setting) -> Option<String> {
        let value = match setting {
            Setting::Projection => self.projection.as_deref().map(str::trim)?.to_owned(),
            Setting::PixelSize => self.pixel_size.to_string(),
            Setting::DataType => self.data_type.trim().to_owned(),
            Setting::Bands => self.bands.trim().to_owned(),
            Setting::LasExtension => (if self.laz { ".laz" } else { ".las" }).to_owned(),
            Setting::Dem => self.dem.as_deref()?.to_str()?.to_owned(),
        };
        Some(value).filter(|v| !v.is_empty())
    }
}
