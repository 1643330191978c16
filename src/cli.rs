use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "page-archiver",
    about = "A CLI utility that downloads a web page and saves it with its static assets",
    version,
    long_about = "Downloads a single web page, saves local copies of its same-origin stylesheets, scripts and images into a sibling directory, and rewrites the page so the saved copy renders from disk."
)]
pub struct ArchiveCommand {
    /// The URL of the page to archive
    #[arg(required = true)]
    pub url: String,

    /// Output directory for the archived page and its resources
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}
