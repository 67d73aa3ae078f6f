//! Parsing options and configuration.

/// Options for parsing markdown documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse GFM tables
    pub tables: bool,

    /// Parse `~~strikethrough~~`
    pub strikethrough: bool,

    /// Turn bare URLs into links
    pub autolink: bool,

    /// Skip a leading `---` front matter block
    pub front_matter: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain CommonMark without GFM extensions.
    pub fn commonmark() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            autolink: false,
            front_matter: false,
        }
    }

    /// Enable or disable GFM tables.
    pub fn with_tables(mut self, enabled: bool) -> Self {
        self.tables = enabled;
        self
    }

    /// Enable or disable strikethrough.
    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.strikethrough = enabled;
        self
    }

    /// Enable or disable bare URL autolinks.
    pub fn with_autolink(mut self, enabled: bool) -> Self {
        self.autolink = enabled;
        self
    }

    /// Enable or disable front matter skipping.
    pub fn with_front_matter(mut self, enabled: bool) -> Self {
        self.front_matter = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            front_matter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_gfm() {
        let options = ParseOptions::default();
        assert!(options.tables);
        assert!(options.strikethrough);
        assert!(options.autolink);
    }

    #[test]
    fn test_commonmark_builder() {
        let options = ParseOptions::commonmark().with_tables(true);
        assert!(options.tables);
        assert!(!options.autolink);
    }
}
