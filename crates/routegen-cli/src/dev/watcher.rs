use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use routegen::Config;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::commands::generate;
use crate::dev::gate::GenerationGate;

/// Watch the route tree and regenerate on change
pub struct RouteWatcher {
    config: Config,
    gate: GenerationGate,
}

impl RouteWatcher {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gate: GenerationGate::new(),
        }
    }

    /// Watch until Ctrl-C
    pub async fn watch(&self) -> Result<()> {
        let root = absolute(&self.config.root_dir);
        let output_dir = absolute(&self.config.output_dir);

        // A root that does not exist yet is watched through its nearest
        // existing ancestor until it appears
        let target = nearest_existing(&root)
            .with_context(|| format!("No existing directory above {}", root.display()))?
            .to_path_buf();
        if target != root {
            warn!(root = %root.display(), watching = %target.display(), "route directory does not exist yet");
            println!(
                "  {} {} does not exist yet; watching {} until it appears",
                "⚠".yellow(),
                root.display(),
                target.display()
            );
        }
        let debounce = Duration::from_millis(self.config.watch.debounce_ms);

        // Create file watcher
        let (tx, mut rx) = tokio::sync::mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Only process create, modify and remove events
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    for path in event.paths {
                        let _ = tx.blocking_send(path);
                    }
                }
            }
        })?;

        watcher
            .watch(&target, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", target.display()))?;
        println!("  {} Watching: {}", "👀".cyan(), root.display());
        println!("  Press Ctrl-C to stop");
        println!();

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                changed = rx.recv() => {
                    let Some(path) = changed else { break };
                    if is_ignored(&path, &root, &output_dir) {
                        continue;
                    }

                    println!("{} Changed: {}", "🔄".yellow(), path.display());

                    // Collapse a burst of events into one regeneration
                    tokio::time::sleep(debounce).await;
                    while rx.try_recv().is_ok() {}

                    self.regenerate();
                }
                _ = &mut shutdown => {
                    println!();
                    println!("{}", "Stopped watching".green());
                    break;
                }
            }
        }

        drop(watcher);
        Ok(())
    }

    fn regenerate(&self) {
        let Some(permit) = self.gate.try_begin() else {
            debug!("generation already in flight; dropping trigger");
            return;
        };

        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;

            println!("{} Regenerating routes...", "⚙".cyan());
            match generate::run(&config) {
                Ok(summary) => generate::report(&summary),
                Err(err) => eprintln!("{} Failed to regenerate: {:#}", "❌".red(), err),
            }
        });
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(path)))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn nearest_existing(path: &Path) -> Option<&Path> {
    path.ancestors().find(|ancestor| ancestor.is_dir())
}

/// Only visible paths inside the route tree, outside the output
/// directory, trigger a regeneration
fn is_ignored(path: &Path, root: &Path, output_dir: &Path) -> bool {
    if path.starts_with(output_dir) {
        return true;
    }

    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.')),
        // Siblings seen while an ancestor is watched in place of the root
        Err(_) => true,
    }
}
