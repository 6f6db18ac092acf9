use hashbrown::HashSet;
use template::Template;

use crate::{ConfigurationError, Flag, Role, Source, Stage};

const DEFAULT_QUEUE: &str = "lotus";
const DEFAULT_WALL_TIME: &str = "01:00";

/// An ordered, fixed sequence of external-tool stages plus the roles they need.
/// Shared read-only by every item in a run.
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    pub name: &'static str,
    /// file name suffix that selects items in an input directory
    pub input_suffix: &'static str,
    /// environment modules loaded before the first stage
    pub modules: Vec<&'static str>,
    /// resolved in this order
    pub roles: Vec<Role>,
    /// rendered in this order
    pub stages: Vec<Stage>,
    /// default scheduler queue
    pub queue: &'static str,
    /// default wall-time limit, HH:MM
    pub wall_time: &'static str,
    pub slots: u32,
}

impl PipelineSpec {
    pub fn builder(name: &'static str) -> PipelineBuilder {
        PipelineBuilder {
            spec: Self {
                name,
                input_suffix: "",
                modules: Vec::new(),
                roles: Vec::with_capacity(16),
                stages: Vec::with_capacity(8),
                queue: DEFAULT_QUEUE,
                wall_time: DEFAULT_WALL_TIME,
                slots: 1,
            },
            error: None,
        }
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Check that roles are declared once, before anything that depends on them,
    /// and that every stage only references declared roles.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut declared: HashSet<&str> = HashSet::with_capacity(self.roles.len());
        for role in &self.roles {
            for dependency in role.source.dependencies() {
                if !declared.contains(dependency) {
                    return Err(ConfigurationError::ForwardReference {
                        role: role.name.to_owned(),
                        dependency: dependency.to_owned(),
                    });
                }
            }
            if !declared.insert(role.name) {
                return Err(ConfigurationError::DuplicateRole(role.name.to_owned()));
            }
        }

        for stage in &self.stages {
            log::trace!("checking stage \"{}\": {}", stage.description, stage.command);
            for name in stage.command.roles() {
                let role = self
                    .role(name)
                    .ok_or_else(|| ConfigurationError::UndeclaredRole {
                        stage: stage.description.to_owned(),
                        role: name.to_owned(),
                    })?;
                // trailing stages work on products the fixed stages already name:
                if stage.is_conditional() && !role.source.is_output() {
                    return Err(ConfigurationError::ConditionalNonOutput {
                        stage: stage.description.to_owned(),
                        role: name.to_owned(),
                    });
                }
            }
        }

        log::debug!(
            "pipeline {} has {} roles and {} stages",
            self.name,
            self.roles.len(),
            self.stages.len()
        );
        Ok(())
    }
}

/// Builds a `PipelineSpec`, keeping the first template or validation error
/// until `build()` is called.
#[derive(Debug)]
pub struct PipelineBuilder {
    spec: PipelineSpec,
    error: Option<ConfigurationError>,
}

impl PipelineBuilder {
    pub fn input_suffix(mut self, suffix: &'static str) -> Self {
        self.spec.input_suffix = suffix;
        self
    }

    pub fn module(mut self, module: &'static str) -> Self {
        self.spec.modules.push(module);
        self
    }

    pub fn queue(mut self, queue: &'static str, wall_time: &'static str) -> Self {
        self.spec.queue = queue;
        self.spec.wall_time = wall_time;
        self
    }

    pub fn slots(mut self, slots: u32) -> Self {
        self.spec.slots = slots;
        self
    }

    pub fn role(mut self, name: &'static str, source: Source) -> Self {
        self.spec.roles.push(Role { name, source });
        self
    }

    /// A product written to the output directory, named by `name_template`.
    pub fn output(self, name: &'static str, name_template: &str, terminal: bool) -> Self {
        match Template::parse(name_template) {
            Ok(name_template) => self.role(
                name,
                Source::Output {
                    name: name_template,
                    terminal,
                },
            ),
            Err(source) => self.fail(ConfigurationError::Template {
                context: format!("output role \"{name}\""),
                source,
            }),
        }
    }

    pub fn stage(self, description: &'static str, command: &str) -> Self {
        self.push_stage(description, command, None)
    }

    /// A stage appended only when `flag` is requested for the run.
    pub fn conditional_stage(self, description: &'static str, flag: Flag, command: &str) -> Self {
        self.push_stage(description, command, Some(flag))
    }

    pub fn build(self) -> Result<PipelineSpec, ConfigurationError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.spec.validate()?;
        Ok(self.spec)
    }

    fn push_stage(mut self, description: &'static str, command: &str, when: Option<Flag>) -> Self {
        match Template::parse(command) {
            Ok(command) => {
                self.spec.stages.push(Stage {
                    description,
                    command,
                    when,
                });
                self
            }
            Err(source) => self.fail(ConfigurationError::Template {
                context: format!("stage \"{description}\""),
                source,
            }),
        }
    }

    fn fail(mut self, e: ConfigurationError) -> Self {
        if self.error.is_none() {
            self.error = Some(e);
        }
        self
    }
}
