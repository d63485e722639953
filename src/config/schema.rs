use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::GradingConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Grade breakpoints and grade values (defaults when omitted)
    #[serde(default)]
    pub grading: GradingConfig,

    /// Default input files, so the CLI can run without path flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Wide score table, one row per legislator
    pub scores: Option<PathBuf>,
    /// Column metadata table
    pub metadata: Option<PathBuf>,
    /// GeoJSON district boundaries for label placement
    pub districts: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.grading.bands.len(), 12);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
grading:
  floor_grade: Fail
  bands:
    - { grade: Pass, min: 60 }
data:
  scores: /tmp/scores.csv
  metadata: /tmp/columns.csv
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.grading.floor_grade, "Fail");
        let data = config.data.unwrap();
        assert_eq!(data.scores, Some(PathBuf::from("/tmp/scores.csv")));
        assert_eq!(data.districts, None);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }
}
