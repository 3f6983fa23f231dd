use anyhow::Result;
use routegen::Config;

#[cfg(feature = "watch")]
pub fn execute(config: Config) -> Result<()> {
    use crate::commands::generate;
    use crate::dev::watcher::RouteWatcher;

    // Initial generation so the artifacts exist before the first change
    generate::execute(&config)?;
    println!();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { RouteWatcher::new(config).watch().await })
}

#[cfg(not(feature = "watch"))]
pub fn execute(_config: Config) -> Result<()> {
    use colored::Colorize;

    println!("{}", "⚠ Watch mode not available".yellow());
    println!();
    println!("Watch mode requires the 'watch' feature.");
    println!("Rebuild with: cargo build --features watch");
    Ok(())
}
