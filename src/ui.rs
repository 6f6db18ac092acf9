use std::time::Instant;

use colored::Colorize;

use crate::batch::BatchResult;
use crate::submit::{Mode, STATUS_HINT};

/// All interactions with the text UI should go through this struct.
pub struct Ui {
    /// -v setting, displays extra text info to user
    pub verbose: bool,
    /// started when the batch starts
    start: Instant,
}

impl Ui {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            start: Instant::now(),
        }
    }

    pub fn verbose_msg(&self, msg: &str) {
        if self.verbose {
            eprintln!("{}", msg);
        }
    }

    /// `*** [i/N] name ***`
    pub fn progress(&self, i: usize, total: usize, name: &str) {
        println!("{}", format!("*** [{i}/{total}] {name} ***").magenta());
    }

    pub fn dry_run(&self, command: &str) {
        println!("{} {}", "dry run:".cyan(), command);
    }

    pub fn submitted(&self, command: &str, job_id: &str) {
        if self.verbose {
            println!("{}", command);
        }
        println!("{} job {}", "submitted".green(), job_id.bold());
    }

    pub fn skipped(&self, name: &str, reason: &str) {
        println!("{} {}: {}", "skipping".yellow(), name, reason);
    }

    pub fn failed(&self, name: &str, message: &str) {
        eprintln!("{} {}: {}", "failed".red(), name, message);
    }

    pub fn summary(&self, result: &BatchResult, mode: Mode) {
        println!();
        let counts = match mode {
            Mode::DryRun => format!("{} written (dry run)", result.dry_run),
            Mode::Submit => format!("{} submitted", result.submitted),
        };
        println!(
            "{} items: {}, {} skipped, {} failed",
            result.total(),
            counts,
            result.skipped,
            result.failed
        );

        if result.has_failures() {
            eprintln!("{}", "Failed items:".red().bold());
            for failure in &result.failures {
                eprintln!(
                    "  {} [{}] {}: {}",
                    failure.item, failure.phase, failure.kind, failure.message
                );
            }
        }

        if mode == Mode::Submit {
            println!("Submitted {} jobs", result.submitted);
            println!("{}", STATUS_HINT);
        }

        if self.verbose {
            eprintln!("Batch took {:?}", self.start.elapsed());
        }
    }
}
