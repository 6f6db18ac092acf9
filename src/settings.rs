use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pipeline::{Flag, Preset};

use crate::args::{Args, CommonArgs, PipelineArgs};
use crate::resolve::Conventions;
use crate::submit::Mode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{flag} must not be empty")]
    Empty { flag: &'static str },
    #[error("invalid wall time '{0}' (should be formatted HH:MM)")]
    InvalidWallTime(String),
    #[error("{flag} must be a positive number, got {value}")]
    NotPositive { flag: &'static str, value: f64 },
}

/// Settings are like Args, except all the logic has
/// been applied so e.g. defaults are added in.
#[derive(Debug)]
pub struct Settings {
    pub preset: Preset,
    pub inputs: Vec<PathBuf>,
    pub outdir: PathBuf,
    pub outscripts: PathBuf,
    pub mode: Mode,
    pub queue: Option<String>,
    pub wall_time: Option<String>,
    pub scheduler: String,
    pub verbose: u8,
    pub conventions: Conventions,
    pub flags: Vec<Flag>,
}

impl TryFrom<Args> for Settings {
    type Error = anyhow::Error;
    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut conventions = Conventions::default();
        let mut flags = Vec::with_capacity(1);

        let (preset, common) = match args.pipeline {
            PipelineArgs::Apl { common, apl } => {
                conventions.dem = Some(absolute(&apl.dem)?);
                conventions.projection = Some(non_empty("--outproj", apl.outproj)?);
                conventions.nav_dir = apl.innav.as_deref().map(absolute).transpose()?;
                conventions.masks_dir = apl.inmasks.as_deref().map(absolute).transpose()?;
                conventions.view_vectors = apl.view_vectors.as_deref().map(absolute).transpose()?;
                conventions.pixel_size = positive("--pixel-size", apl.pixel_size)?;
                conventions.bands = non_empty("--bands", apl.bands)?;
                conventions.data_type = non_empty("--data-type", apl.data_type)?;
                if let Some(grid) = apl.grid_file.as_deref() {
                    conventions.transform_grid = absolute(grid)?;
                }
                if apl.zip {
                    flags.push(Flag::Zip);
                }
                (Preset::Apl, common)
            }
            PipelineArgs::LasToDsm {
                common,
                projection,
                resolution,
            } => {
                conventions.projection = Some(non_empty("--projection", projection)?);
                conventions.pixel_size = positive("--resolution", resolution)?;
                (Preset::LasToDsm, common)
            }
            PipelineArgs::AsciiToLas { common, laz } => {
                conventions.laz = laz;
                (Preset::AsciiToLas, common)
            }
            PipelineArgs::Jp2ToTiff { common } => (Preset::Jp2ToTiff, common),
        };

        let CommonArgs {
            inputs,
            outdir,
            outscripts,
            submit,
            queue,
            wall_time,
            scheduler,
            verbose,
        } = common;

        if let Some(wall_time) = &wall_time {
            check_wall_time(wall_time)?;
        }
        let queue = queue.map(|q| non_empty("--queue", q)).transpose()?;

        let outdir = absolute(&outdir)?;
        let outscripts = match outscripts {
            Some(dir) => absolute(&dir)?,
            None => outdir.clone(),
        };
        let inputs = inputs
            .iter()
            .map(|i| absolute(i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            preset,
            inputs,
            outdir,
            outscripts,
            mode: if submit { Mode::Submit } else { Mode::DryRun },
            queue,
            wall_time,
            scheduler: non_empty("--scheduler", scheduler)?,
            verbose,
            conventions,
            flags,
        })
    }
}

fn absolute(path: &str) -> Result<PathBuf> {
    std::path::absolute(Path::new(path)).with_context(|| format!("while resolving path {path:?}"))
}

fn non_empty(flag: &'static str, value: String) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::Empty { flag })
    } else {
        Ok(value.to_owned())
    }
}

fn positive(flag: &'static str, value: f64) -> Result<f64, Error> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NotPositive { flag, value })
    }
}

fn check_wall_time(wall_time: &str) -> Result<(), Error> {
    let valid = wall_time
        .split_once(':')
        .filter(|(h, m)| !h.is_empty() && m.len() == 2)
        .is_some_and(|(h, m)| {
            h.bytes().all(|b| b.is_ascii_digit())
                && m.parse::<u8>().is_ok_and(|m| m < 60)
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidWallTime(wall_time.to_owned()))
    }
}
