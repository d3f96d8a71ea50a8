use tracing::Level;

/// How listings and summaries are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable status lines
    #[default]
    Text,
    /// Pretty-printed JSON documents
    Json,
}

/// Settings for the console driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Rendering of listings and summaries
    pub format: OutputFormat,
    /// Most verbose level the log output shows
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self { format: OutputFormat::Text, log_level: Level::INFO }
    }
}
