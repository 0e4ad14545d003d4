/// Archive subtree holding the embedded transformer toolchain.
pub const EXTRACTION_PREFIX: &str = "META-INF/node_modules/";

#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub prefix: String,
    pub preserve_executable: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            prefix: EXTRACTION_PREFIX.to_string(),
            preserve_executable: true,
        }
    }
}

impl ExtractOptions {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn preserve_executable(mut self, preserve: bool) -> Self {
        self.preserve_executable = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_node_modules() {
        let options = ExtractOptions::default();
        assert_eq!(options.prefix, "META-INF/node_modules/");
        assert!(options.preserve_executable);
    }

    #[test]
    fn builder_overrides() {
        let options = ExtractOptions::default()
            .prefix("vendor/")
            .preserve_executable(false);
        assert_eq!(options.prefix, "vendor/");
        assert!(!options.preserve_executable);
    }
}
