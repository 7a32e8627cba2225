//! bookstats - quote, dialogue, chapter and sampling statistics for plain-text books

mod report;
mod source;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use corpus_text::{
    CorpusConfig, analyze_corpus, compare_sample_lengths, get_chapter_data, get_chapters,
    get_dialogue_exchanges, get_longest_dialogue, get_random_sample_chapter_data,
    get_systematic_sample_chapter_data,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "bookstats")]
#[command(about = "Quote, dialogue, chapter and sampling statistics for plain-text books", long_about = None)]
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

/// Where the book comes from
#[derive(ClapArgs, Debug)]
struct SourceArgs {
    /// URL (http/https) or path of a plain-text book
    source: String,

    /// Keep the Project Gutenberg header and footer
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sentence, quote and token counts
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Detect chapters and report their lengths
    Chapters {
        #[command(flatten)]
        source: SourceArgs,

        /// Accept all-caps lines without prose after them
        #[arg(long)]
        lenient: bool,

        /// Only list detected titles
        #[arg(long)]
        titles_only: bool,
    },
    /// Find the longest dialogue exchange
    Dialogue {
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum character gap between quotes of one exchange
        #[arg(long)]
        gap: Option<usize>,

        /// List every exchange instead of only the longest
        #[arg(long)]
        all: bool,
    },
    /// Compare a random and a systematic chapter sample
    Sample {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of chapters in the random sample
        #[arg(long)]
        size: Option<usize>,

        /// Step of the systematic sample (default: chapters / 10)
        #[arg(long)]
        step: Option<usize>,

        /// Seed for a reproducible random sample
        #[arg(long)]
        seed: Option<u64>,
    },
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
    /// Set the default dialogue gap
    SetGap {
        /// Characters
        value: usize,
    },
    /// Set the default random sample size
    SetSampleSize { value: usize },
    /// Set the minimum chapter body length
    SetMinChapterChars { value: usize },
    /// Require prose after chapter titles (true/false)
    SetStrict {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Line after which chapter search starts (empty to clear)
    SetStartMarker { value: String },
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Config { action } => handle_config_command(action),
        Commands::Stats { source } => run_stats(source, args.json).await,
        Commands::Chapters {
            source,
            lenient,
            titles_only,
        } => run_chapters(source, *lenient, *titles_only, args.json).await,
        Commands::Dialogue { source, gap, all } => run_dialogue(source, *gap, *all, args.json).await,
        Commands::Sample {
            source,
            size,
            step,
            seed,
        } => run_sample(source, *size, *step, *seed, args.json).await,
    }
}

async fn run_stats(source: &SourceArgs, json: bool) -> Result<()> {
    let text = source::load_text(&source.source, source.raw).await?;
    let summary = analyze_corpus(&text).summary();
    if json {
        report::print_json(&summary)?;
    } else {
        report::print_summary(&summary);
    }
    Ok(())
}

async fn run_chapters(source: &SourceArgs, lenient: bool, titles_only: bool, json: bool) -> Result<()> {
    let config = CorpusConfig::load()?;
    let text = source::load_text(&source.source, source.raw).await?;
    let mut rules = config.chapter_rules();
    if lenient {
        rules.strict = false;
    }
    let titles = get_chapters(&text, &rules);

    if titles_only {
        if json {
            report::print_json(&titles)?;
        } else {
            titles.iter().for_each(|t| println!("{}", t));
        }
        return Ok(());
    }

    let chapters = get_chapter_data(&titles, &text, &rules);
    if json {
        report::print_json(&chapters)?;
    } else {
        report::print_chapters(&chapters);
    }
    Ok(())
}

async fn run_dialogue(source: &SourceArgs, gap: Option<usize>, all: bool, json: bool) -> Result<()> {
    let config = CorpusConfig::load()?;
    let text = source::load_text(&source.source, source.raw).await?;
    let gap = gap.unwrap_or(config.dialogue_gap);

    if all {
        let exchanges = get_dialogue_exchanges(&text, gap);
        if json {
            report::print_json(&exchanges)?;
        } else {
            exchanges.iter().for_each(report::print_exchange);
        }
        return Ok(());
    }

    match get_longest_dialogue(&text, gap) {
        Some(exchange) if json => report::print_json(&exchange)?,
        Some(exchange) => report::print_exchange(&exchange),
        None => println!("No quotes found"),
    }
    Ok(())
}

async fn run_sample(
    source: &SourceArgs,
    size: Option<usize>,
    step: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let config = CorpusConfig::load()?;
    let text = source::load_text(&source.source, source.raw).await?;
    let rules = config.chapter_rules();
    let titles = get_chapters(&text, &rules);
    let chapters = get_chapter_data(&titles, &text, &rules);

    if chapters.is_empty() {
        anyhow::bail!("No chapters found in {}", source.source);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let size = size.unwrap_or(config.sample_size);
    let random = get_random_sample_chapter_data(&titles, &chapters, size, &mut rng);
    let systematic = get_systematic_sample_chapter_data(&titles, &chapters, step);
    let comparison = compare_sample_lengths(&random, &systematic);

    if json {
        report::print_json(&comparison)?;
    } else {
        println!(
            "Chapters: {}, random sample: {}, systematic sample: {}\n",
            chapters.len(),
            random.len(),
            systematic.len()
        );
        report::print_comparison(&comparison);
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = CorpusConfig::load()?;
            println!("Configuration file: {}", CorpusConfig::config_path()?.display());
            println!();
            println!("dialogue_gap = {}", config.dialogue_gap);
            println!("sample_size = {}", config.sample_size);
            println!("min_chapter_chars = {}", config.min_chapter_chars);
            println!("reserved_headers = {:?}", config.reserved_headers);
            println!("strict_titles = {}", config.strict_titles);
            println!("lookahead_lines = {}", config.lookahead_lines);
            println!("min_body_line_chars = {}", config.min_body_line_chars);
            match &config.start_marker {
                Some(marker) => println!("start_marker = \"{}\"", marker),
                None => println!("start_marker = (none)"),
            }
        }
        ConfigAction::SetGap { value } => {
            let mut config = CorpusConfig::load()?;
            config.dialogue_gap = *value;
            config.save()?;
            println!("Default dialogue gap set to: {}", value);
        }
        ConfigAction::SetSampleSize { value } => {
            let mut config = CorpusConfig::load()?;
            config.sample_size = (*value).max(1);
            config.save()?;
            println!("Default sample size set to: {}", config.sample_size);
        }
        ConfigAction::SetMinChapterChars { value } => {
            let mut config = CorpusConfig::load()?;
            config.min_chapter_chars = *value;
            config.save()?;
            println!("Minimum chapter length set to: {}", value);
        }
        ConfigAction::SetStrict { value } => {
            let mut config = CorpusConfig::load()?;
            config.strict_titles = *value;
            config.save()?;
            println!("Strict title detection: {}", value);
        }
        ConfigAction::SetStartMarker { value } => {
            let mut config = CorpusConfig::load()?;
            let marker = value.trim();
            config.start_marker = (!marker.is_empty()).then(|| marker.to_string());
            config.save()?;
            match &config.start_marker {
                Some(marker) => println!("Start marker set to: {}", marker),
                None => println!("Start marker cleared"),
            }
        }
    }
    Ok(())
}
