use clap::{Parser, Subcommand};

use crate::submit::DEFAULT_SCHEDULER;

const CMD_NAME: &str = "lsub";

/// Stores our command-line args format.
#[derive(Parser, Debug)]
#[command(name = CMD_NAME, version, about = "Submit campaign processing jobs to LOTUS", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub pipeline: PipelineArgs,
}

/// One subcommand per built-in pipeline.
#[derive(Subcommand, Debug)]
pub enum PipelineArgs {
    /// Mask, geocorrect and map hyperspectral level-1b lines with APL
    Apl {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        apl: AplArgs,
    },
    /// Create DSMs from LAS files
    LasToDsm {
        #[command(flatten)]
        common: CommonArgs,
        /// Output projection (e.g. UTM30N)
        #[arg(long, value_name = "PROJ")]
        projection: String,
        /// Output resolution
        #[arg(long, value_name = "METRES", default_value_t = 2.0)]
        resolution: f64,
    },
    /// Convert pre-2009 ASCII LiDAR (.all) to LAS
    AsciiToLas {
        #[command(flatten)]
        common: CommonArgs,
        /// Write compressed LAZ instead of LAS
        #[arg(long)]
        laz: bool,
    },
    /// Convert JPEG 2000 aerial photographs to GeoTIFF
    Jp2ToTiff {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl PipelineArgs {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Apl { common, .. }
            | Self::LasToDsm { common, .. }
            | Self::AsciiToLas { common, .. }
            | Self::Jp2ToTiff { common } => common,
        }
    }
}

/// Flags shared by every pipeline.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Input directory, or a list of input files
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub outdir: String,

    /// Directory for job scripts and scheduler logs (default: output directory)
    #[arg(long, value_name = "DIR")]
    pub outscripts: Option<String>,

    /// Submit jobs; without this only job scripts are written
    #[arg(short, long)]
    pub submit: bool,

    /// Scheduler queue (default depends on pipeline)
    #[arg(short, long)]
    pub queue: Option<String>,

    /// Wall-time limit per job (default depends on pipeline)
    #[arg(short = 'W', long, value_name = "HH:MM")]
    pub wall_time: Option<String>,

    /// Scheduler submission command
    #[arg(long, value_name = "CMD", default_value = DEFAULT_SCHEDULER)]
    #[arg(env = "LOTUS_SUBMIT_SCHEDULER")]
    pub scheduler: String,

    /// Print additional debugging info (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Options for the APL pipeline.
#[derive(clap::Args, Debug)]
pub struct AplArgs {
    /// DEM to geocorrect against
    #[arg(long, value_name = "FILE")]
    pub dem: String,

    /// Output projection; "osng" uses the national grid transform
    #[arg(long, value_name = "PROJ")]
    pub outproj: String,

    /// Navigation directory (default: level1b replaced by navigation)
    #[arg(long, value_name = "DIR")]
    pub innav: Option<String>,

    /// Mask directory (default: the input file's directory)
    #[arg(long, value_name = "DIR")]
    pub inmasks: Option<String>,

    /// View vector file (default: found in sensor_FOV_vectors)
    #[arg(long, value_name = "FILE")]
    pub view_vectors: Option<String>,

    /// Output pixel size
    #[arg(long, value_name = "METRES", default_value_t = 2.0)]
    pub pixel_size: f64,

    /// Bands to map
    #[arg(long, default_value = "ALL")]
    pub bands: String,

    /// Output data type
    #[arg(long, default_value = "uint16")]
    pub data_type: String,

    /// Transform grid used for "osng"
    #[arg(long, value_name = "FILE")]
    pub grid_file: Option<String>,

    /// Zip mapped files
    #[arg(long)]
    pub zip: bool,
}
