use anyhow::{Context, Result};
use colored::Colorize;

use crate::commands::{generate, resolve_config};
use crate::project::scaffold::{self, Seeded};
use crate::PathArgs;

pub fn execute(paths: &PathArgs) -> Result<()> {
    println!("{}", "Initializing routegen...".green().bold());
    println!();

    let seeded = scaffold::create_config(&paths.config).context("Failed to create config file")?;
    print_seeded(&seeded);

    // Read back whatever config is now on disk, existing or fresh
    let config = resolve_config(paths);

    for seeded in scaffold::create_helpers(&config.output_dir)
        .context("Failed to create helper files")?
    {
        print_seeded(&seeded);
    }

    println!();
    generate::execute(&config)?;

    println!();
    println!("{}", "Routes initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  Call defineRoute() or createRoute() in each page file");
    println!("  routegen watch");

    Ok(())
}

fn print_seeded(seeded: &Seeded) {
    match seeded {
        Seeded::Created(path) => println!("  {} Created {}", "✓".green(), path.display()),
        Seeded::Kept(path) => println!(
            "  {} Kept existing {}",
            "ℹ".cyan(),
            path.display()
        ),
    }
}
