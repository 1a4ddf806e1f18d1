//! Report format value object

use serde::{Deserialize, Serialize};

/// How the end-of-run report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// Single JSON object
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_text() {
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ReportFormat::Json).unwrap(), "\"json\"");
        let format: ReportFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(format, ReportFormat::Text);
    }
}
