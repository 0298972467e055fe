//! Output renderings of an [`Assessment`].

use std::fmt;
use std::str::FromStr;

use crate::{Assessment, CoreError, CoreResult};

/// How an assessment is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable sections, the same layout the summary uses.
    #[default]
    Text,
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }

    /// Render `assessment` in this format. Text and JSON output end with a newline.
    pub fn render(self, assessment: &Assessment) -> CoreResult<String> {
        match self {
            OutputFormat::Text => Ok(assessment.to_string()),
            OutputFormat::Yaml => {
                serde_yaml::to_string(assessment).map_err(CoreError::YamlSerialization)
            }
            OutputFormat::Json => serde_json::to_string_pretty(assessment)
                .map(|mut json| {
                    json.push('\n');
                    json
                })
                .map_err(CoreError::JsonSerialization),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(CoreError::InvalidInput(format!(
                "unknown output format '{other}' (expected text, yaml or json)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assessment {
        Assessment {
            diagnosis: "CKD Stage 3b".into(),
            recommendations: vec!["Avoid nephrotoxins".into()],
            medications: vec!["Avoid NSAIDs".into()],
            warnings: vec![],
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>().expect("json"), OutputFormat::Json);
        assert_eq!(" yml ".parse::<OutputFormat>().expect("yaml"), OutputFormat::Yaml);
        assert_eq!("text".parse::<OutputFormat>().expect("text"), OutputFormat::Text);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "xml".parse::<OutputFormat>().expect_err("should reject xml");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("xml")));
    }

    #[test]
    fn json_round_trips() {
        let json = OutputFormat::Json.render(&sample()).expect("render json");
        assert!(json.ends_with('\n'));
        let back: Assessment = serde_json::from_str(&json).expect("parse json");
        assert_eq!(back, sample());
    }

    #[test]
    fn yaml_uses_field_names() {
        let yaml = OutputFormat::Yaml.render(&sample()).expect("render yaml");
        assert!(yaml.contains("diagnosis: CKD Stage 3b"));
        assert!(yaml.contains("- Avoid NSAIDs"));
        assert!(yaml.contains("warnings: []"));
    }

    #[test]
    fn text_matches_display() {
        let text = OutputFormat::Text.render(&sample()).expect("render text");
        assert_eq!(text, sample().to_string());
    }
}
