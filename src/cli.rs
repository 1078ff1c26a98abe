//! Startup configuration surface
//!
//! The server takes its whole configuration from the command line: a
//! default working directory and zero or more allowed directories. No
//! allowed directories means execution is unrestricted.

use std::path::PathBuf;

use clap::Parser;

use crate::types::Config;

#[derive(Debug, Parser)]
#[command(name = "exec-dir-mcp")]
#[command(about = "MCP server for shell command execution scoped to whitelisted directories")]
pub struct Cli {
    /// Default working directory (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub dir: Option<String>,

    /// Directory in which execution is permitted; repeatable. When
    /// omitted, every directory is allowed.
    #[arg(long = "allowed", value_name = "PATH")]
    pub allowed: Vec<String>,
}

impl Cli {
    /// Build the immutable server configuration
    pub fn into_config(self) -> anyhow::Result<Config> {
        let default_dir = match self.dir {
            Some(dir) => expand_tilde(&dir),
            None => std::env::current_dir()?,
        };
        let allowed_dirs = self.allowed.iter().map(|d| expand_tilde(d)).collect();

        Ok(Config {
            default_dir,
            allowed_dirs,
        })
    }
}

/// Resolve ~ to the home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_resolution() {
        let resolved = expand_tilde("~/projects");
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("/projects"));
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(expand_tilde("/tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn missing_dir_defaults_to_cwd() {
        let cli = Cli {
            dir: None,
            allowed: vec![],
        };
        let config = cli.into_config().unwrap();
        assert_eq!(config.default_dir, std::env::current_dir().unwrap());
        assert!(config.unrestricted());
    }

    #[test]
    fn allowed_entries_are_collected_in_order() {
        let cli = Cli {
            dir: Some("/tmp".to_string()),
            allowed: vec!["/tmp".to_string(), "/var/tmp".to_string()],
        };
        let config = cli.into_config().unwrap();
        assert_eq!(
            config.allowed_dirs,
            vec![PathBuf::from("/tmp"), PathBuf::from("/var/tmp")]
        );
    }
}
