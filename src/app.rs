use anyhow::{Context, Result};

use crate::batch::{BatchOrchestrator, BatchResult};
use crate::discover::discover;
use crate::fs::Fs;
use crate::resolve::PathResolver;
use crate::settings::Settings;
use crate::submit::{Directives, Submitter};
use crate::ui::Ui;

/// This struct actually runs the command-line app.
pub struct App {
    /// Interpreted command line settings
    settings: Settings,
    /// Filesystem interface
    fs: Fs,
    /// User interface
    ui: Ui,
}

impl App {
    /// Create a new `App`.
    pub fn new(settings: Settings) -> Self {
        let fs = Fs::new(&settings.outdir, &settings.outscripts);
        let ui = Ui::new(settings.verbose > 0);
        Self { settings, fs, ui }
    }

    /// Run the app: find the items, then resolve, render and submit each one.
    pub fn run(self) -> Result<BatchResult> {
        let pipeline = self
            .settings
            .preset
            .spec()
            .context("while building the pipeline definition")?;

        self.ui
            .verbose_msg(&format!("Using output directory {:?}", self.settings.outdir));
        self.fs.ensure_dirs_exist(self.ui.verbose)?;

        let items = discover(&self.fs, &self.settings.inputs, pipeline.input_suffix)
            .context("while collecting input files")?;
        if items.is_empty() {
            log::warn!("no input files ending in \"{}\" found", pipeline.input_suffix);
        }

        let resolver = PathResolver::new(&self.settings.conventions, &pipeline, &self.fs);
        let submitter = Submitter::new(&self.fs, &self.settings.scheduler, self.settings.mode);
        let directives = Directives::for_pipeline(
            &pipeline,
            self.settings.queue.as_deref(),
            self.settings.wall_time.as_deref(),
        );
        let orchestrator = BatchOrchestrator::new(
            &pipeline,
            resolver,
            submitter,
            directives,
            &self.settings.flags,
            &self.fs,
            &self.ui,
        );

        let result = orchestrator
            .run(items)
            .with_context(|| format!("while running the {} pipeline", pipeline.name))?;

        self.ui.summary(&result, self.settings.mode);
        Ok(result)
    }
}
