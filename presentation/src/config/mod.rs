//! Presentation-level configuration
//!
//! Output settings after CLI flags have been merged over the config file.

use crate::cli::commands::{GlobalArgs, OutputFormat};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators on stderr
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply CLI flags: `-o` beats the configured format, `-q` hides
    /// progress, and JSON output never shows progress bars.
    pub fn with_cli(mut self, args: &GlobalArgs) -> Self {
        if let Some(format) = args.output {
            self.format = format;
        }
        if args.quiet || self.format == OutputFormat::Json {
            self.show_progress = false;
        }
        self
    }

    /// Switch terminal colors off process-wide when disabled.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_settings() {
        let file = OutputConfig {
            format: OutputFormat::Json,
            color: false,
            show_progress: true,
        };
        let args = GlobalArgs {
            output: Some(OutputFormat::Text),
            ..Default::default()
        };
        let resolved = file.with_cli(&args);
        assert_eq!(resolved.format, OutputFormat::Text);
        assert!(!resolved.color);
        assert!(resolved.show_progress);
    }

    #[test]
    fn test_quiet_and_json_hide_progress() {
        let quiet = GlobalArgs {
            quiet: true,
            ..Default::default()
        };
        assert!(!OutputConfig::default().with_cli(&quiet).show_progress);

        let json = GlobalArgs {
            output: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert!(!OutputConfig::default().with_cli(&json).show_progress);
    }
}
