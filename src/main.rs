use clap::Parser;
use colored::Colorize;

mod cli;
mod downloader;
mod error;
mod file_manager;
mod html_parser;
mod naming;
mod urls;

use cli::ArchiveCommand;
use downloader::PageArchiver;
use error::ArchiveError;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = ArchiveCommand::parse();

    if let Err(error) = run(&args).await {
        eprintln!(
            "{} {:#}",
            "❌ Page archiving failed:".red(),
            anyhow::Error::new(error)
        );
        std::process::exit(1);
    }
}

async fn run(args: &ArchiveCommand) -> Result<(), ArchiveError> {
    let archiver = PageArchiver::new(&args.url, &args.output)?;

    println!("🚀 Archiving page: {}", args.url.blue());
    archiver.archive().await?;

    println!(
        "✅ Page saved to {}",
        archiver.page_file_path().display().to_string().blue()
    );
    Ok(())
}
