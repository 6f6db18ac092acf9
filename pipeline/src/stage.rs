use template::Template;

/// Run options that switch conditional stages on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// zip the mapped product and its header
    Zip,
}

/// One external-tool invocation.
#[derive(Debug, Clone)]
pub struct Stage {
    /// written as a comment above the command
    pub description: &'static str,
    pub command: Template,
    /// only rendered when this flag is requested
    pub when: Option<Flag>,
}

impl Stage {
    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }

    pub fn is_enabled(&self, flags: &[Flag]) -> bool {
        match self.when {
            Some(flag) => flags.contains(&flag),
            None => true,
        }
    }
}
