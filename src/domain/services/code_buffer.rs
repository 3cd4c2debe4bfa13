#[cfg(test)]
#[path = "code_buffer_test.rs"]
mod tests;

/// Source text of the active session. Templates only replace text the user
/// has not touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    text: String,
    last_auto_template: Option<String>,
}

impl CodeBuffer {
    pub fn text(&self) -> &str {
        return &self.text;
    }

    pub fn last_auto_template(&self) -> Option<&str> {
        return self.last_auto_template.as_deref();
    }

    pub fn edit(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn is_pristine(&self) -> bool {
        if self.text.is_empty() {
            return true;
        }

        return self.last_auto_template.as_deref() == Some(self.text.as_str());
    }

    /// Seeds the buffer with a template. Returns false and leaves the text alone
    /// when the user has edited it since the last seed.
    pub fn reseed(&mut self, template: String) -> bool {
        if !self.is_pristine() {
            return false;
        }

        self.text = template.clone();
        self.last_auto_template = Some(template);
        return true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.last_auto_template = None;
    }
}
