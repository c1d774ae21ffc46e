/// Decides which changed files take part in method identity.
///
/// A path qualifies when it ends in the tracked extension and is not a test
/// file, i.e. does not end in `<test_marker><extension>` (`FooTest.java`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    extension: String,
    test_suffix: String,
}

impl SourceFilter {
    pub fn new(extension: &str, test_marker: &str) -> Self {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        let test_suffix = format!("{}{}", test_marker, extension);
        Self { extension, test_suffix }
    }

    /// The tracked extension with its leading dot, e.g. ".java"
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn has_extension(&self, path: &str) -> bool {
        path.ends_with(&self.extension)
    }

    pub fn is_test_file(&self, path: &str) -> bool {
        !self.test_suffix.is_empty() && path.ends_with(&self.test_suffix)
    }

    pub fn admits(&self, path: &str) -> bool {
        self.has_extension(path) && !self.is_test_file(path)
    }
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self::new(".java", "Test")
    }
}
