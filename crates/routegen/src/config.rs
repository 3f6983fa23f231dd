// File: src/config.rs
// Purpose: Configuration parsing from routegen.toml

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::{sort, Error, Generator, Result, RouteRecord};

/// Conventional config file name
pub const CONFIG_FILE: &str = "routegen.toml";

/// Generator configuration
///
/// A plain value: nothing here reads the environment or the working
/// directory. Relative paths are resolved by whoever runs the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory the scan starts from (default: "app")
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Directory the artifacts are written to (default: "src/generated/routes")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Glob patterns for directories to skip, subtree included
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub sort: SortOrder,

    #[serde(default)]
    pub watch: WatchConfig,
}

/// Route order before rendering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Directory traversal order, unsorted
    #[default]
    Filesystem,
    Alphabetical,
    /// See [`sort::specificity`]
    Specificity,
}

impl SortOrder {
    pub fn comparator(self) -> Option<fn(&RouteRecord, &RouteRecord) -> Ordering> {
        match self {
            SortOrder::Filesystem => None,
            SortOrder::Alphabetical => Some(sort::alphabetical),
            SortOrder::Specificity => Some(sort::specificity),
        }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchConfig {
    /// Quiet period that collapses a burst of events into one run
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

// Default values
fn default_root_dir() -> PathBuf {
    PathBuf::from("app")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/generated/routes")
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            output_dir: default_output_dir(),
            exclude: Vec::new(),
            sort: SortOrder::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or blank file yields the default configuration.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Self::from_toml(&content).map_err(|err| match err {
            Error::Config { message, .. } => Error::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    ///
    /// `exclude` globs are compiled here as well, so a config that parses is
    /// one [`Config::generator`] accepts.
    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(content).map_err(|err| Error::Config {
            path: PathBuf::new(),
            message: err.message().to_string(),
        })?;

        config.exclude_patterns().map_err(|err| Error::Config {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;

        Ok(config)
    }

    /// Applies command-line overrides on top of file values (functional builder)
    pub fn with_overrides(mut self, root_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(root_dir) = root_dir {
            self.root_dir = root_dir;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    /// Compiles `exclude` into a scanner predicate
    ///
    /// Each glob is tried against the cumulative relative path
    /// (`user/[id]/@modal`) and against the directory's own name (`@modal`).
    /// `*` does not cross `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use routegen::Config;
    ///
    /// let config = Config {
    ///     exclude: vec!["@*".into(), "(*)".into()],
    ///     ..Config::default()
    /// };
    /// let exclude = config.exclude_predicate().unwrap();
    ///
    /// assert!(exclude(Path::new("dashboard/@modal")));
    /// assert!(exclude(Path::new("(marketing)")));
    /// assert!(!exclude(Path::new("dashboard")));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGlob`] for the first glob that does not compile.
    pub fn exclude_predicate(&self) -> Result<impl Fn(&Path) -> bool + Send + Sync + 'static> {
        let patterns = self.exclude_patterns()?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        Ok(move |path: &Path| {
            let relative = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            patterns
                .iter()
                .any(|p| p.matches_with(&relative, options) || p.matches_with(&name, options))
        })
    }

    fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.exclude
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|err| Error::InvalidGlob {
                    glob: glob.clone(),
                    message: err.msg.to_string(),
                })
            })
            .collect()
    }

    /// Builds a generator from this configuration
    pub fn generator(&self) -> Result<Generator> {
        let mut generator = Generator::new(&self.root_dir, &self.output_dir);

        if !self.exclude.is_empty() {
            generator = generator.with_exclude(self.exclude_predicate()?);
        }
        if let Some(comparator) = self.sort.comparator() {
            generator = generator.with_sort(comparator);
        }

        Ok(generator)
    }
}
