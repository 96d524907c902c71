//! Document Outline CLI
//!
//! Rebuilds the section tree of a paginated text document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_outline::{
    config::Config,
    document::{Document, FORM_FEED},
    fallback::FallbackMode,
    llm::LlmClient,
    outliner::{Outline, Outliner},
    persistence::{DEFAULT_OUTLINE_PATH, load_tree, save_tree, tree_exists, tree_size},
    repair::LlmTocRepair,
    table::transform_tables,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Document Outline - rebuild section structure from table-of-contents text
#[derive(Parser)]
#[command(name = "doc-outline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the outline of a document
    Outline {
        /// Path to the document text (pages separated by form feeds)
        document: PathBuf,

        /// Output path for the outline file (.json or .bin)
        #[arg(short, long, default_value = DEFAULT_OUTLINE_PATH)]
        output: PathBuf,

        /// Page delimiter, if not a form feed
        #[arg(long)]
        delimiter: Option<String>,

        /// Maximum ToC depth to keep
        #[arg(long)]
        max_depth: Option<usize>,

        /// Scan up to N early pages for a table of contents
        #[arg(long)]
        toc_pages: Option<usize>,

        /// Split used when no ToC is found
        #[arg(long)]
        fallback: Option<FallbackMode>,

        /// Prefix for generated slugs
        #[arg(long)]
        slug_prefix: Option<String>,

        /// Skip ToC detection and always use the fallback split
        #[arg(long)]
        no_toc: bool,

        /// Clean up located ToC lines with the configured LLM
        #[arg(long)]
        repair: bool,
    },

    /// Display the tree structure of an outline
    Show {
        /// Path to the outline file
        #[arg(default_value = DEFAULT_OUTLINE_PATH)]
        index: PathBuf,

        /// Output as JSON instead of formatted tree
        #[arg(long)]
        json: bool,
    },

    /// Show information about an outline
    Info {
        /// Path to the outline file
        #[arg(default_value = DEFAULT_OUTLINE_PATH)]
        index: PathBuf,
    },

    /// Print document pages with aligned tables rewritten as Markdown
    Tables {
        /// Path to the document text
        document: PathBuf,

        /// Page delimiter, if not a form feed
        #[arg(long)]
        delimiter: Option<String>,
    },

    /// Test LLM connection
    Test,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Outline {
            document,
            output,
            delimiter,
            max_depth,
            toc_pages,
            fallback,
            slug_prefix,
            no_toc,
            repair,
        } => {
            let mut config = Config::load().context("Failed to load configuration")?;
            let outline = &mut config.outline;
            if let Some(depth) = max_depth {
                outline.max_depth = depth;
            }
            if let Some(pages) = toc_pages {
                outline.toc_page_scan_budget = pages;
            }
            if let Some(mode) = fallback {
                outline.fallback_mode = mode;
            }
            if slug_prefix.is_some() {
                outline.slug_prefix = slug_prefix;
            }
            outline.use_toc &= !no_toc;
            outline.repair_toc |= repair;

            cmd_outline(config, &document, delimiter.as_deref(), &output).await
        }
        Commands::Show { index, json } => cmd_show(&index, json),
        Commands::Info { index } => cmd_info(&index),
        Commands::Tables {
            document,
            delimiter,
        } => cmd_tables(&document, delimiter.as_deref()),
        Commands::Test => cmd_test().await,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_document(path: &Path, delimiter: Option<&str>) -> Result<Document> {
    Document::from_text_file_with_delimiter(path, delimiter.unwrap_or(FORM_FEED))
        .with_context(|| format!("Failed to load document: {}", path.display()))
}

async fn cmd_outline(
    config: Config,
    document_path: &Path,
    delimiter: Option<&str>,
    output: &Path,
) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let document = load_document(document_path, delimiter)?;
    info!(
        document = %document.name,
        pages = document.page_count(),
        "loaded document"
    );

    let start = Instant::now();
    let outline: Outline = if config.outline.repair_toc {
        let client = LlmClient::new(config.llm).context("Failed to create LLM client")?;
        info!(model = client.model(), "toc repair enabled");
        let repair = LlmTocRepair::new(client);
        Outliner::with_repair(repair, config.outline).outline(&document).await
    } else {
        Outliner::new(config.outline).outline(&document).await
    };
    let duration = start.elapsed();

    println!("Outline Built:");
    println!("  Sections:    {}", outline.tree.node_count());
    println!("  Top level:   {}", outline.top_level().len());
    println!("  Max depth:   {}", outline.tree.max_depth());
    println!("  From ToC:    {}", outline.from_toc());
    println!("  Build time:  {:.2?}", duration);

    save_tree(&outline.tree, output).context("Failed to save outline")?;

    let size = tree_size(output)?;
    println!("\nOutline saved to: {}", output.display());
    println!("  File size: {:.1} KB", size as f64 / 1024.0);

    Ok(())
}

fn ensure_outline(index_path: &Path) -> Result<()> {
    if !tree_exists(index_path) {
        anyhow::bail!(
            "Outline not found at '{}'. Run 'outline' command first.",
            index_path.display()
        );
    }
    Ok(())
}

fn cmd_show(index_path: &Path, json: bool) -> Result<()> {
    ensure_outline(index_path)?;
    let tree = load_tree(index_path).context("Failed to load outline")?;

    if json {
        let json_str = tree.to_json().context("Failed to serialize outline")?;
        println!("{}", json_str);
    } else {
        print!("{}", tree.format());
    }

    Ok(())
}

fn cmd_info(index_path: &Path) -> Result<()> {
    ensure_outline(index_path)?;
    let tree = load_tree(index_path).context("Failed to load outline")?;
    let size = tree_size(index_path)?;

    println!("Outline Information");
    println!("{}", "─".repeat(40));
    println!("  Document:     {}", tree.name);
    println!("  Total pages:  {}", tree.total_pages);
    println!("  Sections:     {}", tree.node_count());
    println!("  Root count:   {}", tree.sections.len());
    println!("  Max depth:    {}", tree.max_depth());
    println!("  File size:    {:.1} KB", size as f64 / 1024.0);
    println!("  Outline path: {}", index_path.display());

    Ok(())
}

fn cmd_tables(document_path: &Path, delimiter: Option<&str>) -> Result<()> {
    let document = load_document(document_path, delimiter)?;

    for page in &document.pages {
        println!("--- page {} ---", page.number);
        println!("{}", transform_tables(page.content.trim()));
    }

    Ok(())
}

async fn cmd_test() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate_llm().context("Invalid LLM configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Timeout:   {}s", config.llm.timeout_secs);

    let client = LlmClient::new(config.llm).context("Failed to create LLM client")?;
    println!("  Model:     {}", client.model());

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => println!("Connection successful!"),
        Err(e) => println!("Connection failed: {}", e),
    }

    Ok(())
}
