//! Walks the built-in portfolio the way a visitor would: filter, open the
//! lightbox, page through it, and scroll the sections into view.
//! Run with: cargo run --example gallery_walkthrough

use folio::lightbox::OverlayTarget;
use folio::visibility::IntersectionEntry;
use folio::{Category, Gallery};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut gallery = Gallery::default();

    gallery.select_category(Category::Commercial.into());
    println!("{} view:", gallery.filter());
    for record in gallery.filtered_view() {
        println!("  #{} {}", record.id, record.title);
    }

    gallery.open(0)?;
    for _ in 0..3 {
        if let Some(view) = gallery.lightbox_view() {
            println!("lightbox {} -> {}", view.position, view.record.title);
        }
        gallery.click(OverlayTarget::NextButton);
    }
    gallery.click(OverlayTarget::Backdrop);
    println!("scroll locked after close: {}", gallery.is_scroll_locked());

    if let Some(cover) = gallery.catalog().get(4) {
        println!("record 4 is '{}' ({})", cover.title, cover.category);
    }

    let observation = gallery.observe_sections();
    let threshold = gallery.visibility().threshold();
    for (section, ratio) in [("home", 1.0), ("portfolio", threshold), ("about", threshold / 2.0)] {
        let newly = observation.notify(&[IntersectionEntry::new(section, ratio)]);
        println!("{:<9} at {:.2}: revealed {:?}", section, ratio, newly);
    }
    observation.disconnect();
    println!(
        "observation connected: {}, revealed: {:?}",
        observation.is_connected(),
        gallery.visibility().revealed()
    );

    Ok(())
}
