//! pdf-scrub - extract and clean text from PDF documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_scrub::{
    ProcessingOutcome, ScrubConfig, analyze_extraction_quality, analyze_structure_with_ratio,
    check_pdf_text_extractable, extract_text_from_pdf, extract_with_layout, find_ocr_errors,
    process_pdf_with_config,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pdf-scrub")]
#[command(about = "Extract, classify and clean text from PDF documents", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline and write <name>_processed.txt files
    Process {
        /// PDF files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (default from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Check whether a PDF carries extractable text
    Check {
        file: PathBuf,

        /// Characters required on the first page
        #[arg(long)]
        min_chars: Option<usize>,
    },
    /// Show text spans and font statistics of one page
    Layout {
        file: PathBuf,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Report extraction quality and likely OCR errors (PDF or plain text)
    Quality { file: PathBuf },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default output directory
    SetOutputDir { path: PathBuf },
    /// Set the first-page character threshold
    SetMinChars { value: usize },
    /// Set the header size ratio
    SetHeaderRatio {
        /// Multiple of the average font size (e.g. 1.2)
        value: f32,
    },
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Config { action } => handle_config_command(action),
        Commands::Process { files, output_dir } => run_process(files, output_dir.as_deref(), args.json),
        Commands::Check { file, min_chars } => run_check(file, *min_chars),
        Commands::Layout { file, page } => run_layout(file, *page, args.json),
        Commands::Quality { file } => run_quality(file, args.json),
    }
}

fn run_process(files: &[PathBuf], output_dir: Option<&Path>, json: bool) -> Result<()> {
    let mut config = ScrubConfig::load()?;
    if let Some(dir) = output_dir {
        config.output_dir = dir.to_path_buf();
    }

    let mut failures = 0;
    for file in files {
        let outcome = process_pdf_with_config(file, &config);
        if json {
            print_json(&outcome)?;
        }
        match outcome {
            ProcessingOutcome::Processed(doc) => {
                if !json {
                    println!(
                        "{}: {} ({} pages, {} fixes, {} potential errors remain) -> {}",
                        file.display(),
                        doc.document_type,
                        doc.pages_processed,
                        doc.fixes.iter().map(|f| f.count).sum::<usize>(),
                        doc.comparison.remaining_errors,
                        doc.output_file.display()
                    );
                }
            }
            ProcessingOutcome::Failed { error } => {
                failures += 1;
                if !json {
                    println!("{}: failed: {}", file.display(), error);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} documents failed", failures, files.len());
    }
    Ok(())
}

fn run_check(file: &Path, min_chars: Option<usize>) -> Result<()> {
    let config = ScrubConfig::load()?;
    let threshold = min_chars.unwrap_or(config.min_extractable_chars);
    if check_pdf_text_extractable(file, threshold) {
        println!("{}: extractable text", file.display());
        Ok(())
    } else {
        anyhow::bail!("{}: little or no extractable text", file.display())
    }
}

fn run_layout(file: &Path, page: usize, json: bool) -> Result<()> {
    let config = ScrubConfig::load()?;
    let index = page.checked_sub(1).context("Pages are numbered from 1")?;
    let spans = extract_with_layout(file, index)
        .with_context(|| format!("Could not read page {} of {}", page, file.display()))?;
    let summary = analyze_structure_with_ratio(&spans, config.header_size_ratio);

    if json {
        return print_json(&(&spans, &summary));
    }

    for span in &spans {
        println!(
            "{:>7.1} {:>7.1}  {:<24} {:>5.1} {:>3}  {}",
            span.bbox[0], span.bbox[1], span.font, span.size, span.flags, span.text
        );
    }

    let Some(summary) = summary else {
        println!("No text on page {}", page);
        return Ok(());
    };

    println!("\nFont size distribution:");
    for entry in &summary.size_distribution {
        println!("  Size {:.1}: {} spans", entry.size, entry.count);
    }
    println!("Average size: {:.1}", summary.average_size);
    println!("Likely headers ({}):", summary.headers.len());
    for header in summary.headers.iter().take(5) {
        let preview: String = header.text.chars().take(50).collect();
        println!("  '{}' (size {:.1})", preview, header.size);
    }
    println!("Fonts ({}): {}", summary.fonts.len(), summary.fonts.join(", "));
    Ok(())
}

fn read_document_text(file: &Path) -> Result<String> {
    let is_pdf = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()));
    }

    let pages = extract_text_from_pdf(file).with_context(|| format!("Could not open {}", file.display()))?;
    Ok(pages.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("\n"))
}

fn run_quality(file: &Path, json: bool) -> Result<()> {
    let text = read_document_text(file)?;
    let name = file.display().to_string();
    let report = analyze_extraction_quality(&text, &name).context("Document has no text")?;
    let findings = find_ocr_errors(&text);

    if json {
        return print_json(&(&report, &findings));
    }

    let counts = report.counts();
    println!("{} extraction analysis:", name);
    println!("  Empty lines: {}", counts.empty_lines);
    println!("  Short lines: {}", counts.short_lines);
    println!("  Uppercase lines: {}", counts.uppercase_lines);
    println!("  Number-heavy lines: {}", counts.number_heavy_lines);
    println!("  Mixed characters: {}", counts.mixed_chars);
    println!("  Very long lines: {}", counts.very_long_lines);

    let ocr = findings.counts();
    println!("Potential OCR issues:");
    println!("  Character substitutions: {}", ocr.character_substitutions);
    println!("  Broken words: {}", ocr.broken_words);
    println!("  Numbers in words: {}", ocr.numbers_in_words);
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ScrubConfig::load()?;
            println!("Configuration file: {}", ScrubConfig::config_path()?.display());
            println!();
            println!("output_dir = {}", config.output_dir.display());
            println!("min_extractable_chars = {}", config.min_extractable_chars);
            println!("header_size_ratio = {}", config.header_size_ratio);
        }
        ConfigAction::SetOutputDir { path } => {
            let mut config = ScrubConfig::load()?;
            config.output_dir = path.clone();
            config.save()?;
            println!("Output directory set to: {}", path.display());
        }
        ConfigAction::SetMinChars { value } => {
            let mut config = ScrubConfig::load()?;
            config.min_extractable_chars = *value;
            config.save()?;
            println!("Minimum extractable characters set to: {}", value);
        }
        ConfigAction::SetHeaderRatio { value } => {
            if *value <= 0.0 {
                anyhow::bail!("Header ratio must be positive");
            }
            let mut config = ScrubConfig::load()?;
            config.header_size_ratio = *value;
            config.save()?;
            println!("Header size ratio set to: {}", value);
        }
    }
    Ok(())
}
