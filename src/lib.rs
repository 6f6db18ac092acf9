/// High-level command line app
mod app;
/// Definition of command-line args
mod args;
/// Runs a whole batch of items
pub mod batch;
/// Finding the items to process
pub mod discover;
/// Per-item errors
pub mod error;
/// Filesystem operations
pub mod fs;
/// Working out every path a pipeline needs for one item
pub mod resolve;
/// Interpreted command-line settings
mod settings;
/// Job scripts and the scheduler
pub mod submit;
/// Text UI
mod ui;

// exported for tests:
pub use app::App;
pub use args::{AplArgs, Args, CommonArgs, PipelineArgs};
pub use batch::BatchResult;
pub use settings::Settings;

/// Run the command-line app.
pub fn run() -> Result<BatchResult, anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    // INTERPRET SETTINGS ///////////////
    let settings: Settings = args.try_into()?;

    let log_level = match settings.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    simple_logging::log_to_stderr(log_level);

    // RUN THE THING /////////////////
    let app = App::new(settings);
    app.run()
}
