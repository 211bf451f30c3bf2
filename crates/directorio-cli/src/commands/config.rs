//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use directorio_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "source": config.source,
                    "fetch_timeout_secs": config.fetch_timeout_secs,
                    "default_sort": config.default_sort.to_string(),
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.source.as_deref().unwrap_or(""));
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!(
                "  source:             {}",
                match config.source.as_deref() {
                    None | Some("") => "(disabled)",
                    Some(source) => source,
                }
            );
            println!(
                "  fetch_timeout_secs: {}",
                config
                    .fetch_timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(none)".to_string())
            );
            println!("  default_sort:       {}", config.default_sort);
            println!(
                "  log_file:           {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one `key = value` assignment to a configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let unset = value.is_empty() || value == "none";
    match key {
        "source" => {
            // Empty, not None: a missing key reloads as the default
            config.source = Some(if unset { String::new() } else { value.to_string() });
        }
        "fetch_timeout_secs" => {
            config.fetch_timeout_secs = if unset {
                None
            } else {
                Some(
                    value
                        .parse()
                        .context("Invalid value for fetch_timeout_secs. Use a number of seconds.")?,
                )
            };
        }
        "default_sort" => {
            config.default_sort = value.parse()?;
        }
        "log_file" => {
            config.log_file = if unset { None } else { Some(value.into()) };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: source, fetch_timeout_secs, default_sort, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use directorio_core::SortKey;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "source", "https://example.com").unwrap();
        assert_eq!(config.source.as_deref(), Some("https://example.com"));

        apply(&mut config, "fetch_timeout_secs", "30").unwrap();
        assert_eq!(config.fetch_timeout_secs, Some(30));

        apply(&mut config, "default_sort", "cargo").unwrap();
        assert_eq!(config.default_sort, SortKey::Position);

        apply(&mut config, "log_file", "/tmp/directorio.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/directorio.log")));
    }

    #[test]
    fn test_apply_unset() {
        let mut config = Config {
            source: Some("https://example.com".to_string()),
            fetch_timeout_secs: Some(5),
            ..Config::default()
        };
        apply(&mut config, "source", "none").unwrap();
        apply(&mut config, "fetch_timeout_secs", "").unwrap();
        assert_eq!(config.source.as_deref(), Some(""));
        assert!(config.source_location().is_none());
        assert!(config.fetch_timeout_secs.is_none());
    }

    #[test]
    fn test_disabled_source_survives_save() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set("source".to_string(), "none".to_string(), Some(&path), &output).unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert!(saved.source_location().is_none());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply(&mut config, "colour", "blue").is_err());
        assert!(apply(&mut config, "fetch_timeout_secs", "soon").is_err());
        assert!(apply(&mut config, "default_sort", "salary").is_err());
    }

    #[test]
    fn test_set_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "default_sort".to_string(),
            "name".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("default_sort = \"name\""));
    }
}
