use template::MissingRole;

use crate::{ConfigurationError, Flag, PipelineSpec, ResolvedPaths};

impl PipelineSpec {
    /// Render the job body for one item: module loads, then each enabled stage
    /// in declaration order, with every role substituted from `resolved`.
    ///
    /// Pure text composition; identical inputs give byte-identical output.
    pub fn render(&self, resolved: &ResolvedPaths, flags: &[Flag]) -> Result<String, ConfigurationError> {
        let mut body = String::with_capacity(1024);

        if !self.modules.is_empty() {
            body.push_str("# Load environment modules\nmodule load ");
            body.push_str(&self.modules.join(" "));
            body.push_str("\n\n");
        }

        for stage in self.stages.iter().filter(|s| s.is_enabled(flags)) {
            body.push_str("# ");
            body.push_str(stage.description);
            body.push('\n');
            stage
                .command
                .render_into(&mut body, |role| resolved.get(role))
                .map_err(|MissingRole(role)| ConfigurationError::UnresolvedRole(role))?;
            body.push_str("\n\n");
        }

        Ok(body)
    }
}
