//! Plain text buffer used by the declaration emitter.

const NEW_LINE: &str = "\n";

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
}

impl SourceWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        SourceWriter {
            output: String::with_capacity(capacity),
        }
    }

    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn write_line(&mut self) {
        // Indentation written onto an otherwise empty line is dropped.
        let trimmed = self.output.trim_end_matches(' ').len();
        self.output.truncate(trimmed);
        self.output.push_str(NEW_LINE);
    }

    pub fn into_output(self) -> String {
        self.output
    }
}
