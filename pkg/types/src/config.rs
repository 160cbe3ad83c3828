use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How `fedquota-check` prints its report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format '{}' (expected text or json)", other),
        }
    }
}

/// `fedquota-check` configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// output: json
/// log-filter: pkg_validation=debug
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfigFile {
    #[serde(default)]
    pub output: Option<OutputFormat>,
    #[serde(default, alias = "log-filter")]
    pub log_filter: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_default() {
        let cfg: CheckConfigFile = load_config_file("/nonexistent/fedquota/config.yaml").unwrap();
        assert!(cfg.output.is_none());
        assert!(cfg.log_filter.is_none());
    }

    #[test]
    fn test_parse_config_file() {
        let file_name = format!("fedquota-config-{}.yaml", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, "output: json\nlog-filter: debug\n").unwrap();
        let cfg: CheckConfigFile = load_config_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.output, Some(OutputFormat::Json));
        assert_eq!(cfg.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
