//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::OutputFormat;
use crate::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "itemkeeper", version, about = "Keep a list of timestamped items")]
pub struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the config file)
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "in_memory")]
    pub db: Option<PathBuf>,

    /// Keep items in memory only; nothing is saved
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Print items as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List items, oldest first (default)
    List,
    /// Add an item stamped with the current time
    Add,
    /// Delete items by list index
    Delete {
        #[arg(required = true, value_name = "INDEX")]
        indices: Vec<usize>,
    },
    /// Show a single item
    Show {
        #[arg(value_name = "INDEX")]
        index: usize,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Load the config file (explicit or default) and apply flag overrides.
    ///
    /// Validation runs after the overrides, so a flag can replace an invalid
    /// file value.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::parse_from(path)?,
            None => Config::parse()?,
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db) = &self.db {
            config.storage.database_path = Some(db.clone());
            config.storage.in_memory = false;
        }
        if self.in_memory {
            config.storage.in_memory = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["itemkeeper"]).unwrap();
        assert_eq!(cli.command(), Command::List);
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn delete_collects_indices() {
        let cli = Cli::try_parse_from(["itemkeeper", "delete", "2", "0"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Delete {
                indices: vec![2, 0]
            }
        );
    }

    #[test]
    fn delete_requires_an_index() {
        assert!(Cli::try_parse_from(["itemkeeper", "delete"]).is_err());
    }

    #[test]
    fn db_and_in_memory_conflict() {
        assert!(Cli::try_parse_from(["itemkeeper", "--db", "x.sqlite3", "--in-memory"]).is_err());
    }

    #[test]
    fn db_flag_overrides_config() {
        let cli =
            Cli::try_parse_from(["itemkeeper", "list", "--db", "/tmp/items.sqlite3"]).unwrap();
        let mut config = Config::default();
        config.storage.in_memory = true;
        cli.apply_overrides(&mut config);
        assert!(!config.storage.in_memory);
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/tmp/items.sqlite3"))
        );
    }

    #[test]
    fn in_memory_flag_overrides_config() {
        let cli = Cli::try_parse_from(["itemkeeper", "--in-memory", "add"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(config.storage.in_memory);
        assert_eq!(cli.command(), Command::Add);
    }

    fn config_with_directory_database() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("[storage]\ndatabase_path = {:?}\n", temp_dir.path().to_str().unwrap()),
        )
        .unwrap();
        (temp_dir, config_path)
    }

    #[test]
    fn invalid_file_database_path_is_rejected_without_overrides() {
        let (_dir, config_path) = config_with_directory_database();
        let config_arg = config_path.to_str().unwrap();
        let cli = Cli::try_parse_from(["itemkeeper", "--config", config_arg]).unwrap();
        assert!(matches!(
            cli.load_config(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn db_flag_replaces_invalid_file_database_path() {
        let (dir, config_path) = config_with_directory_database();
        let db = dir.path().join("ok.sqlite3");
        let cli = Cli::try_parse_from([
            "itemkeeper",
            "--config",
            config_path.to_str().unwrap(),
            "--db",
            db.to_str().unwrap(),
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.storage.database_path, Some(db));
    }

    #[test]
    fn in_memory_flag_rescues_invalid_file_database_path() {
        let (_dir, config_path) = config_with_directory_database();
        let cli = Cli::try_parse_from([
            "itemkeeper",
            "--config",
            config_path.to_str().unwrap(),
            "--in-memory",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert!(config.storage.in_memory);
    }
}
