//! Runner configuration.
//!
//! Configuration is resolved once at startup, from the environment (after `.env` has been
//! loaded) and command-line overrides, and then passed to the command handlers. Nothing reads
//! environment variables while a form is being evaluated.

use nephro_core::{CoreResult, OutputFormat};

/// Environment variable holding the default output format for `assess`.
pub const OUTPUT_FORMAT_ENV: &str = "NEPHRO_OUTPUT_FORMAT";

/// Runner configuration resolved at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    output_format: OutputFormat,
}

impl RunConfig {
    pub fn new(output_format: OutputFormat) -> Self {
        Self { output_format }
    }

    /// Resolve configuration from the environment value and an optional command-line override.
    ///
    /// The command-line value wins when both are set. Either being invalid is an error, even
    /// when the other would have been usable.
    pub fn resolve(env_value: Option<String>, cli_value: Option<String>) -> CoreResult<Self> {
        let from_env = output_format_from_value(env_value)?;
        let from_cli = output_format_from_value(cli_value)?;

        Ok(Self::new(from_cli.or(from_env).unwrap_or_default()))
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

/// Parse an output format from an optional string value.
///
/// `None` and empty/whitespace values mean "not configured".
pub fn output_format_from_value(value: Option<String>) -> CoreResult<Option<OutputFormat>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<OutputFormat>())
        .transpose()
}
