use std::path::PathBuf;

use pipeline::PipelineSpec;

use crate::discover::Item;
use crate::fs::Fs;

use super::JobScriptBuilder;

/// Resource and queue requests for every job in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    pub queue: String,
    /// HH:MM
    pub wall_time: String,
    pub slots: u32,
}

impl Directives {
    /// The pipeline's defaults, with any command-line overrides applied.
    pub fn for_pipeline(pipeline: &PipelineSpec, queue: Option<&str>, wall_time: Option<&str>) -> Self {
        Self {
            queue: queue.unwrap_or(pipeline.queue).to_owned(),
            wall_time: wall_time.unwrap_or(pipeline.wall_time).to_owned(),
            slots: pipeline.slots,
        }
    }
}

/// Everything needed to submit one item: directives, log targets and script text.
/// Written to `script_path` before submission, so it can be inspected or resubmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub name: String,
    pub directives: Directives,
    pub stdout: PathBuf,
    pub stderr: PathBuf,
    pub script_path: PathBuf,
    pub script: String,
}

impl JobDescriptor {
    pub fn new(item: &Item, body: &str, directives: &Directives, fs: &Fs) -> Self {
        let stdout = fs.job_stdout(&item.basename);
        let stderr = fs.job_stderr(&item.basename);

        let mut script = String::with_capacity(body.len() + 256);
        let mut builder = JobScriptBuilder::new(&mut script);
        builder.write_prefix();
        builder.write_directive("-J", &item.basename);
        builder.write_directive("-o", &stdout.display().to_string());
        builder.write_directive("-e", &stderr.display().to_string());
        builder.write_directive("-q", &directives.queue);
        builder.write_directive("-W", &directives.wall_time);
        builder.write_directive("-n", &directives.slots.to_string());
        builder.write_body(body);

        Self {
            name: item.basename.clone(),
            directives: directives.clone(),
            stdout,
            stderr,
            script_path: fs.job_script(&item.basename),
            script,
        }
    }

    /// Arguments to the scheduler's submission command; the script goes on stdin.
    pub fn submission_args(&self) -> Vec<String> {
        vec![
            "-q".to_owned(),
            self.directives.queue.clone(),
            "-o".to_owned(),
            self.stdout.display().to_string(),
            "-e".to_owned(),
            self.stderr.display().to_string(),
            "-W".to_owned(),
            self.directives.wall_time.clone(),
            "-n".to_owned(),
            self.directives.slots.to_string(),
        ]
    }

    /// Shell command equivalent to submitting this job.
    pub fn submission_command(&self, scheduler: &str) -> String {
        format!(
            "{scheduler} {} < {}",
            self.submission_args().join(" "),
            self.script_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn job() -> JobDescriptor {
        let fs = Fs::new(Path::new("/out"), Path::new("/scripts"));
        let item = Item::new(PathBuf::from("/in/strip01.all")).unwrap();
        let directives = Directives {
            queue: "lotus".to_owned(),
            wall_time: "01:00".to_owned(),
            slots: 1,
        };
        JobDescriptor::new(
            &item,
            "# Convert\nconvert_pre2009_lidar.py -i /in/strip01.all -o /out/strip01.las\n\n",
            &directives,
            &fs,
        )
    }

    #[test]
    fn test_job_script() {
        assert_eq!(
            job().script,
            "#!/bin/bash\n\
             #BSUB -J strip01\n\
             #BSUB -o /scripts/strip01_%J.o\n\
             #BSUB -e /scripts/strip01_%J.e\n\
             #BSUB -q lotus\n\
             #BSUB -W 01:00\n\
             #BSUB -n 1\n\
             \n\
             # Convert\n\
             convert_pre2009_lidar.py -i /in/strip01.all -o /out/strip01.las\n\
             \n"
        );
        assert_eq!(job().script_path, PathBuf::from("/scripts/strip01_process.bsub"));
    }

    #[test]
    fn test_submission_command() {
        assert_eq!(
            job().submission_command("bsub"),
            "bsub -q lotus -o /scripts/strip01_%J.o -e /scripts/strip01_%J.e -W 01:00 -n 1 \
             < /scripts/strip01_process.bsub"
        );
    }

    #[test]
    fn test_directive_overrides() {
        let pipeline = pipeline::presets::jp2_to_tiff().unwrap();
        let d = Directives::for_pipeline(&pipeline, None, Some("00:30"));
        assert_eq!(d.queue, "short-serial");
        assert_eq!(d.wall_time, "00:30");
        assert_eq!(d.slots, 1);
    }
}
