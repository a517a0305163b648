//! create-worktop CLI - Project scaffolding for worktop applications

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use create_worktop::{init_logger, run, Args, WorktopConfig};
use scaffolder_core::{ProductConfig, SetupSummary};

#[tokio::main]
async fn main() -> Result<()> {
    // A cancelled run keeps whatever was already written
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("{}", "Cancelled.".yellow());
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logger(args.verbose);

    match run(&args).await {
        Ok(summary) => {
            print_summary(&WorktopConfig, &summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn print_summary<C: ProductConfig>(config: &C, summary: &SetupSummary) {
    println!(
        "{} {} files in {}",
        "Created".green().bold(),
        summary.files_written(),
        summary.target.display()
    );
    println!(
        "  {} {} ({}, {})",
        "->".blue(),
        summary.entry,
        summary.combination.env().display_name(),
        summary.combination.format().display_name()
    );
    println!("  {} build: {}", "->".blue(), summary.build_script.dimmed());
    if let Some(deploy) = &summary.deploy_config {
        println!("  {} {}", "->".blue(), deploy.display());
    }

    let steps = config.next_steps(&summary.target, summary);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", config.docs_url().cyan());
}
