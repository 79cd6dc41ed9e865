use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::filter::CategoryFilter;
use folio::{Catalog, ExportConfig, Gallery};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio gallery listing and PDF export")]
struct Cli {
    /// JSON catalog to use instead of the built-in portfolio
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the gallery as seen through a category filter
    List {
        /// All, Fashion, Beauty, Commercial or Editorial
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
    },
    /// Export the portfolio as a PDF
    Export {
        /// Directory the document is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Give up on an image after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Number of leading catalog entries to include
        #[arg(long, default_value_t = 6)]
        max_items: usize,
        /// Print the export report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::load(p).with_context(|| format!("reading catalog {}", p.display())),
        None => Ok(Catalog::default()),
    }
}

#[cfg(feature = "http")]
async fn export(gallery: &Gallery, config: ExportConfig, out: PathBuf, json: bool) -> Result<()> {
    let loader = folio::export::HttpImageLoader::new(&config)?;
    let doc = gallery.export_pdf(&loader, &config).await?;
    let path = doc
        .save(&out)
        .await
        .with_context(|| format!("saving into {}", out.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.report)?);
    } else {
        println!(
            "{}: {} images placed, {} skipped, {} pages",
            path.display(),
            doc.report.placements.len(),
            doc.report.skipped.len(),
            doc.report.pages
        );
        for s in &doc.report.skipped {
            println!("  skipped #{} {}: {}", s.id, s.url, s.reason);
        }
    }
    Ok(())
}

#[cfg(not(feature = "http"))]
async fn export(_gallery: &Gallery, _config: ExportConfig, _out: PathBuf, _json: bool) -> Result<()> {
    anyhow::bail!("folio was built without the `http` feature; no image loader available")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut gallery = Gallery::new(load_catalog(cli.catalog.as_ref())?);

    match cli.command {
        Command::List { category } => {
            gallery.select_category(category);
            let view = gallery.filtered_view();
            for rec in &view {
                println!("{:>3}  {:<11} {}", rec.id, rec.category, rec.title);
            }
            println!("{} of {} images ({})", view.len(), gallery.catalog().len(), gallery.filter());
        }
        Command::Export {
            out,
            timeout_ms,
            max_items,
            json,
        } => {
            let config = ExportConfig {
                fetch_timeout_ms: timeout_ms,
                max_items,
                ..Default::default()
            };
            export(&gallery, config, out, json).await?;
        }
    }
    Ok(())
}
