//! lexo - print the text of an EPUB to the terminal

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use lexo::{Document, Theme};

#[derive(Parser)]
#[command(name = "lexo")]
#[command(version, about = "Print the readable text of an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    lexo book.epub            Print the book with the default colours
    lexo --plain book.epub    Print without colours
    lexo -i book.epub         Show book metadata")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Show book metadata instead of the text
    #[arg(short, long)]
    info: bool,

    /// Disable colours and text attributes
    #[arg(short, long)]
    plain: bool,

    /// Log pipeline progress and skipped sections
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let book = match lexo::extract(&cli.input) {
        Ok(book) => book,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.info {
        show_info(&cli.input, &book);
    } else {
        let theme = if cli.plain {
            colored::control::set_override(false);
            Theme::plain()
        } else {
            Theme::default()
        };
        if book.is_empty() {
            eprintln!("{}: no readable content", cli.input);
        }
        print!("{}", book.text(&theme));
    }

    ExitCode::SUCCESS
}

fn show_info(path: &str, book: &Document) {
    let meta = &book.metadata;
    println!("File: {path}");
    println!("Title: {}", meta.title);
    if !meta.authors.is_empty() {
        println!("Authors: {}", meta.authors.join(", "));
    }
    if !meta.language.is_empty() {
        println!("Language: {}", meta.language);
    }
    let desc = meta.description.trim();
    if !desc.is_empty() {
        if desc.chars().count() > 200 {
            let head: String = desc.chars().take(200).collect();
            println!("Description: {head}...");
        } else {
            println!("Description: {desc}");
        }
    }
    println!("Sections: {}", book.sections.len());
}
