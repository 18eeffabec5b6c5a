//! Endpoint file loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EndpointConfig, EndpointFile};
use crate::config::validation::{validate_endpoints, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the endpoint list.
///
/// Files ending in `.toml` hold an `[[endpoints]]` array; anything else is
/// read as a YAML sequence of endpoint records.
pub fn load_endpoints(path: &Path) -> Result<Vec<EndpointConfig>, ConfigError> {
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), data = %content, "Endpoint file read");

    let endpoints = parse_endpoints(&content, is_toml(path))?;
    validate_endpoints(&endpoints).map_err(ConfigError::Validation)?;

    tracing::debug!(?endpoints, "Endpoint file parsed");
    Ok(endpoints)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_endpoints(content: &str, toml: bool) -> Result<Vec<EndpointConfig>, ConfigError> {
    if toml {
        let file: EndpointFile = toml::from_str(content)?;
        Ok(file.endpoints)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
- name: index page
  url: https://fetch.com/
  method: GET
  headers:
    user-agent: fetch-synthetic-monitor
- name: careers
  url: https://fetch.com/careers
- name: some post endpoint
  url: https://www.fetchrewards.com/some/post/endpoint
  method: POST
  headers:
    content-type: application/json
  body: '{"foo":"bar"}'
"#;

    const TOML: &str = r#"
[[endpoints]]
name = "index page"
url = "https://fetch.com/"

[[endpoints]]
name = "post"
url = "https://fetch.com/submit"
method = "POST"
body = "{}"
headers = { content-type = "application/json" }
"#;

    #[test]
    fn test_parse_yaml() {
        let endpoints = parse_endpoints(YAML, false).unwrap();
        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].headers["user-agent"], "fetch-synthetic-monitor");
        assert_eq!(endpoints[1].method, "GET");
        assert_eq!(endpoints[2].method, "POST");
        assert_eq!(endpoints[2].body, r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_parse_toml() {
        let endpoints = parse_endpoints(TOML, true).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].method, "GET");
        assert_eq!(endpoints[1].headers["content-type"], "application/json");
    }

    #[test]
    fn test_missing_url_is_parse_error() {
        let err = parse_endpoints("- name: nameless\n", false).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_extension_detection() {
        assert!(is_toml(Path::new("endpoints.toml")));
        assert!(is_toml(Path::new("ENDPOINTS.TOML")));
        assert!(!is_toml(Path::new("endpoints.yaml")));
        assert!(!is_toml(Path::new("endpoints")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_endpoints(Path::new("/nonexistent/endpoints.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
