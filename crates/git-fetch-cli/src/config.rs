use std::path::Path;

use anyhow::{Context, Result};
use git_fetch::ConnectionConfig;
use serde::Deserialize;

/// TOML job files cannot have a top-level array, so connections live
/// under `[[connections]]`.
#[derive(Debug, Deserialize)]
struct TomlJobConfig {
    #[serde(default)]
    connections: Vec<ConnectionConfig>,
}

/// Load the job configuration: a JSON array of connections, or a TOML
/// file with `[[connections]]` tables when the extension is `.toml`.
pub fn load_job_config(path: &Path) -> Result<Vec<ConnectionConfig>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read job config: {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let configs = if is_toml {
        parse_toml(&contents)
    } else {
        parse_json(&contents)
    };

    configs.with_context(|| format!("failed to parse job config: {}", path.display()))
}

fn parse_json(contents: &str) -> Result<Vec<ConnectionConfig>> {
    Ok(serde_json::from_str(contents)?)
}

fn parse_toml(contents: &str) -> Result<Vec<ConnectionConfig>> {
    Ok(toml::from_str::<TomlJobConfig>(contents)?.connections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_array() {
        let json = r#"[
            {"source": "github", "username": null, "token": "T"},
            {
                "source": "gitlab",
                "username": "u",
                "token": "T2",
                "base_url": "https://git.example.com/api/v4"
            }
        ]"#;
        let configs = parse_json(json).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].source, "github");
        assert_eq!(configs[0].username, None);
        assert_eq!(configs[1].username.as_deref(), Some("u"));
        assert_eq!(
            configs[1].base_url.as_deref(),
            Some("https://git.example.com/api/v4")
        );
    }

    #[test]
    fn parse_toml_connections() {
        let toml_str = r#"
[[connections]]
source = "github"
token = "T"

[[connections]]
source = "gitlab"
username = "u"
token = "T2"
"#;
        let configs = parse_toml(toml_str).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].username, None);
        assert_eq!(configs[1].source, "gitlab");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_json("[{\"source\": ").is_err());
    }

    #[test]
    fn non_array_json_is_an_error() {
        assert!(parse_json(r#"{"source": "github"}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_job_config(Path::new("/nonexistent/git-fetch/job_config.json"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("failed to read job config"));
    }
}
