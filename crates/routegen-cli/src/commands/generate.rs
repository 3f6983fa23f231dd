use anyhow::{Context, Result};
use colored::Colorize;
use routegen::{Config, GenerationSummary, WriteStatus};

pub fn execute(config: &Config) -> Result<()> {
    println!("{}", "Generating route helpers...".green().bold());
    println!();

    let summary = run(config)?;
    report(&summary);

    Ok(())
}

/// One generation pass, no terminal output
pub fn run(config: &Config) -> Result<GenerationSummary> {
    let generator = config.generator().context("Invalid configuration")?;

    generator.run().with_context(|| {
        format!(
            "Failed to generate routes from {}",
            generator.root_dir().display()
        )
    })
}

pub fn report(summary: &GenerationSummary) {
    println!(
        "  {} Found {} routes ({} static, {} dynamic)",
        "✓".green(),
        summary.total.to_string().bold(),
        summary.static_count,
        summary.dynamic_count
    );

    for file in &summary.files {
        match file.status {
            WriteStatus::Written => println!("  {} {}", "→".green(), file.path.display()),
            WriteStatus::Unchanged => println!(
                "  {} {} {}",
                "→".dimmed(),
                file.path.display(),
                "(unchanged)".dimmed()
            ),
        }
    }
}
