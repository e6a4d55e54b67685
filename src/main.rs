use anyhow::{Context, Result};
use cli::Cli;
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use sinks::Render;
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod extraction;
mod file_ordering;
mod sinks;
mod source;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );
    progress.set_message(message);
    progress
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Render(args) => {
            println!("Loading configuration...");
            let Configuration { source, epub, pdf } = Configuration::load(&args.config)?;

            if epub.is_none() && pdf.is_none() {
                println!("No EPUB or PDF output configured.");
                return Ok(());
            }

            let progress = progress_bar(0, "Reading books...");
            let books = sinks::load_books(&source, &progress)?;
            progress.finish_and_clear();

            let skipped: usize = books.iter().map(|b| b.text.stats.skipped).sum();
            let verses: usize = books.iter().map(|b| b.text.stats.verses).sum();
            println!(
                "Read {} books ({} verses) from {}",
                books.len(),
                verses,
                source.directory.display()
            );
            if skipped > 0 {
                println!(
                    "{}: {} malformed line(s) skipped, run with RUST_LOG=debug for details",
                    console::style("Warning").yellow(),
                    skipped
                );
            }

            if let Some(epub) = epub {
                let progress = progress_bar(books.len() as u64, "Rendering EPUB...");
                let stats = epub
                    .render(&source, &books, &progress)
                    .with_context(|| "Failed to render EPUB")?;

                println!();
                println!(
                    "  EPUB: {} ({} documents)",
                    epub.outfile.display(),
                    stats.document_count
                );
            }

            if let Some(pdf) = pdf {
                let progress = progress_bar(books.len() as u64, "Rendering PDF...");
                let stats = pdf
                    .render(&source, &books, &progress)
                    .with_context(|| "Failed to render PDF")?;

                println!();
                println!(
                    "  PDF:  {} ({} books, {} pages)",
                    pdf.outfile.display(),
                    stats.book_count,
                    stats.page_count
                );
                if stats.unencodable_chars > 0 {
                    println!(
                        "{}: {} character(s) aren't covered by the PDF font encoding and print as '?'",
                        console::style("Warning").yellow(),
                        stats.unencodable_chars
                    );
                }
            }

            Ok(())
        }
    }
}
