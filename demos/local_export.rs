//! Exports a portfolio whose images live on disk instead of a CDN.
//! Run with: cargo run --example local_export -- <catalog.json> [out_dir]
//!
//! Record URLs are read as file paths relative to the catalog file.

use folio::export::{decode_image, export_pdf, ImageLoader, LoadedImage};
use folio::{Catalog, ExportConfig};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;

struct DirLoader {
    root: PathBuf,
}

impl ImageLoader for DirLoader {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, folio::Result<LoadedImage>> {
        async move {
            let bytes = tokio::fs::read(self.root.join(url)).await?;
            decode_image(&bytes)
        }
        .boxed()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let catalog_path = PathBuf::from(args.next().ok_or("usage: local_export <catalog.json> [out_dir]")?);
    let out = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let catalog = Catalog::load(&catalog_path)?;
    let loader = DirLoader {
        root: catalog_path.parent().map(PathBuf::from).unwrap_or_default(),
    };

    let config = ExportConfig::default();
    let doc = export_pdf(&catalog, &loader, &config).await?;
    let path = doc.save(&out).await?;

    println!("wrote {} ({} pages)", path.display(), doc.report.pages);
    for skipped in &doc.report.skipped {
        println!("  skipped #{} {}: {}", skipped.id, skipped.url, skipped.reason);
    }
    Ok(())
}
