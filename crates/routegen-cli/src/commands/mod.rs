pub mod generate;
pub mod init;
pub mod watch;

use colored::Colorize;
use routegen::Config;
use tracing::warn;

use crate::PathArgs;

/// Config file merged with command-line overrides
///
/// A malformed config file is reported and replaced by defaults; it never
/// stops the command.
pub fn resolve_config(paths: &PathArgs) -> Config {
    let config = Config::load(&paths.config).unwrap_or_else(|err| {
        warn!(error = %err, "falling back to default configuration");
        println!("  {} {} (using defaults)", "⚠".yellow(), err);
        Config::default()
    });

    config.with_overrides(paths.root.clone(), paths.out.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_bad_exclude_glob_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("routegen.toml");
        fs::write(&config_path, "exclude = [\"[\"]\nsort = \"alphabetical\"\n").unwrap();

        let paths = PathArgs {
            root: Some(dir.path().join("app")),
            out: None,
            config: config_path,
        };
        let config = resolve_config(&paths);

        assert!(config.exclude.is_empty());
        assert_eq!(config.root_dir, dir.path().join("app"));
        assert_eq!(config.output_dir, PathBuf::from("src/generated/routes"));

        let generator = config.generator().unwrap();
        assert!(generator.scan().unwrap().is_empty());
    }
}
