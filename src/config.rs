//! Configuration resolution.
//!
//! Values come from an ordered list of sources; for each key the first
//! source with a non-empty value wins, and the built-in default fills
//! whatever is left:
//!
//! 1. `SLOP_*` environment variables (`SLOP_API_URL`)
//! 2. `~/.config/slop/config.yaml` (or `config.yml`)
//! 3. [`DEFAULT_API_URL`]
//!
//! A broken source is reported as a warning and skipped; it never stops the
//! upload.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::output::Output;

pub const DEFAULT_API_URL: &str = "https://api.slop.sh";

pub const ENV_PREFIX: &str = "SLOP_";

const FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

/// One layer of settings. Every key is optional so layers can be stacked.
#[derive(Debug, Default, Deserialize)]
struct Layer {
    api_url: Option<String>,
}

impl Layer {
    /// Fill keys still unset from a lower-priority layer.
    fn or(mut self, lower: Layer) -> Layer {
        self.api_url = non_empty(self.api_url).or_else(|| non_empty(lower.api_url));
        self
    }

    fn finish(self) -> Config {
        Config {
            api_url: non_empty(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.into()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Where a layer of settings is read from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Environment variables sharing a prefix, e.g. `SLOP_API_URL`.
    Env { prefix: String },
    /// A directory that may contain `config.yaml`.
    File { dir: PathBuf },
}

impl Source {
    /// Read this source. `Ok(None)` means "nothing here", which is normal.
    fn load(&self) -> Result<Option<Layer>, String> {
        match self {
            Source::Env { prefix } => envy::prefixed(prefix.as_str())
                .from_env::<Layer>()
                .map(Some)
                .map_err(|e| format!("Ignoring {prefix}* environment: {e}")),
            Source::File { dir } => load_file(dir),
        }
    }
}

fn load_file(dir: &Path) -> Result<Option<Layer>, String> {
    for name in FILE_NAMES {
        let path = dir.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(format!("Config file {}: {e}", path.display())),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        return serde_yaml::from_str::<Layer>(&contents)
            .map(Some)
            .map_err(|e| format!("Config file {}: {e}", path.display()));
    }
    Ok(None)
}

/// `~/.config/slop`, regardless of platform conventions.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("slop")
}

/// The sources consulted by the binary, highest priority first.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::Env {
            prefix: ENV_PREFIX.into(),
        },
        Source::File { dir: config_dir() },
    ]
}

impl Config {
    /// Resolve from the environment and the user's config file.
    pub fn load(out: &mut dyn Output) -> Config {
        Self::resolve(&default_sources(), out)
    }

    /// Resolve from an explicit list of sources, highest priority first.
    pub fn resolve(sources: &[Source], out: &mut dyn Output) -> Config {
        let mut merged = Layer::default();
        for source in sources {
            match source.load() {
                Ok(Some(layer)) => merged = merged.or(layer),
                Ok(None) => {}
                Err(warning) => out.warn_err(&warning),
            }
        }
        let config = merged.finish();
        tracing::debug!(api_url = %config.api_url, "resolved configuration");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Buffer, Target};
    use tempfile::TempDir;

    // Each test uses its own prefix so parallel tests never see each other's
    // variables.
    fn env_source(prefix: &str) -> Source {
        Source::Env {
            prefix: prefix.into(),
        }
    }

    fn config_dir_with(file: &str, contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(file), contents).unwrap();
        dir
    }

    #[test]
    fn env_wins_over_file_and_default() {
        std::env::set_var("SLOP_TEST_PRECEDENCE_API_URL", "https://env.example");
        let dir = config_dir_with("config.yaml", "api_url: https://file.example\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[
                env_source("SLOP_TEST_PRECEDENCE_"),
                Source::File {
                    dir: dir.path().into(),
                },
            ],
            &mut out,
        );

        assert_eq!(config.api_url, "https://env.example");
        assert!(out.lines.is_empty());
    }

    #[test]
    fn file_wins_when_env_is_absent() {
        let dir = config_dir_with("config.yaml", "api_url: https://file.example\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[
                env_source("SLOP_TEST_NO_ENV_"),
                Source::File {
                    dir: dir.path().into(),
                },
            ],
            &mut out,
        );

        assert_eq!(config.api_url, "https://file.example");
    }

    #[test]
    fn default_when_nothing_is_set() {
        let dir = TempDir::new().unwrap();
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[
                env_source("SLOP_TEST_NOTHING_"),
                Source::File {
                    dir: dir.path().into(),
                },
            ],
            &mut out,
        );

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(out.lines.is_empty(), "a missing file is not a warning");
    }

    #[test]
    fn empty_env_value_falls_through() {
        std::env::set_var("SLOP_TEST_EMPTY_API_URL", "");
        let dir = config_dir_with("config.yaml", "api_url: https://file.example\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[
                env_source("SLOP_TEST_EMPTY_"),
                Source::File {
                    dir: dir.path().into(),
                },
            ],
            &mut out,
        );

        assert_eq!(config.api_url, "https://file.example");
    }

    #[test]
    fn yml_extension_is_accepted() {
        let dir = config_dir_with("config.yml", "api_url: http://localhost:8080\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[Source::File {
                dir: dir.path().into(),
            }],
            &mut out,
        );

        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = config_dir_with(
            "config.yaml",
            "api_url: https://file.example\ntheme: dark\n",
        );
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[Source::File {
                dir: dir.path().into(),
            }],
            &mut out,
        );

        assert_eq!(config.api_url, "https://file.example");
        assert!(out.lines.is_empty());
    }

    #[test]
    fn malformed_file_warns_on_stderr_and_uses_default() {
        let dir = config_dir_with("config.yaml", "api_url: [unterminated\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[Source::File {
                dir: dir.path().into(),
            }],
            &mut out,
        );

        assert_eq!(config.api_url, DEFAULT_API_URL);
        let warnings = out.lines_on(Target::Stderr);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config.yaml"));
    }

    #[test]
    fn unreadable_file_warns_and_env_still_applies() {
        std::env::set_var("SLOP_TEST_UNREADABLE_API_URL", "https://env.example");
        // A directory where the file should be makes the read fail with
        // something other than NotFound.
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config.yaml")).unwrap();
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[
                env_source("SLOP_TEST_UNREADABLE_"),
                Source::File {
                    dir: dir.path().into(),
                },
            ],
            &mut out,
        );

        assert_eq!(config.api_url, "https://env.example");
        assert_eq!(out.lines_on(Target::Stderr).len(), 1);
    }

    #[test]
    fn empty_file_is_not_an_error() {
        let dir = config_dir_with("config.yaml", "\n");
        let mut out = Buffer::default();

        let config = Config::resolve(
            &[Source::File {
                dir: dir.path().into(),
            }],
            &mut out,
        );

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(out.lines.is_empty());
    }

    #[test]
    fn config_dir_ends_in_dot_config_slop() {
        assert!(config_dir().ends_with(".config/slop"));
    }
}
