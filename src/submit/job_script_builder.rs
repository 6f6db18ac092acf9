/// Utility for building the contents of a job script file.
/// Note that it modifies a String reference held internally;
/// read that String to get the script's contents.
#[derive(Debug)]
pub struct JobScriptBuilder<'a> {
    strbuf: &'a mut String,
}

impl<'a> JobScriptBuilder<'a> {
    pub fn new(strbuf: &'a mut String) -> Self {
        Self { strbuf }
    }
}

impl JobScriptBuilder<'_> {
    /// shebang line
    pub fn write_prefix(&mut self) {
        self.strbuf.clear();
        self.strbuf.push_str("#!/bin/bash\n");
    }

    /// a single scheduler directive
    pub fn write_directive(&mut self, flag: &str, value: &str) {
        self.strbuf.push_str("#BSUB ");
        self.strbuf.push_str(flag);
        self.strbuf.push(' ');
        self.strbuf.push_str(value);
        self.strbuf.push('\n');
    }

    /// blank line, then the rendered pipeline stages
    pub fn write_body(&mut self, body: &str) {
        self.strbuf.push('\n');
        self.strbuf.push_str(body);
    }
}
