// ============================================================================
// mp4fps-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for RewriteConfig
//
// Every field has a default, so a builder with no calls produces the same
// value as `RewriteConfig::default()`.

use std::path::PathBuf;

use super::RewriteConfig;
use crate::patcher::VersionPolicy;

/// Builder for creating RewriteConfig instances.
#[derive(Debug, Clone, Default)]
pub struct RewriteConfigBuilder {
    config: RewriteConfig,
}

impl RewriteConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ffprobe binary.
    pub fn ffprobe_path(mut self, ffprobe_path: PathBuf) -> Self {
        self.config.ffprobe_path = ffprobe_path;
        self
    }

    /// Sets the directory rewritten files are written to.
    pub fn results_dir(mut self, results_dir: PathBuf) -> Self {
        self.config.results_dir = results_dir;
        self
    }

    /// Sets the output file name prefix.
    pub fn output_prefix(mut self, prefix: &str) -> Self {
        self.config.output_prefix = prefix.to_string();
        self
    }

    /// Sets the input size limit in bytes.
    pub fn max_input_bytes(mut self, limit: u64) -> Self {
        self.config.max_input_bytes = limit;
        self
    }

    /// Sets whether the input file is deleted after a successful rewrite.
    pub fn remove_input(mut self, remove: bool) -> Self {
        self.config.remove_input = remove;
        self
    }

    /// Sets the version-1 header policy.
    pub fn version_policy(mut self, policy: VersionPolicy) -> Self {
        self.config.version_policy = policy;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RewriteConfig {
        self.config
    }
}
