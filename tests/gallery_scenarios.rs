//! Gallery behaviour as seen by the presentational layer

use folio::filter::{filter, CategoryFilter};
use folio::lightbox::{LightboxState, OverlayTarget};
use folio::visibility::IntersectionEntry;
use folio::{Catalog, Category, Gallery, ImageRecord};

#[test]
fn filter_matches_category_in_catalog_order() {
    let catalog = Catalog::default();
    for choice in CategoryFilter::choices() {
        let view = filter(&catalog, choice);
        match choice {
            CategoryFilter::All => assert_eq!(view.len(), catalog.len()),
            CategoryFilter::Only(c) => {
                assert!(view.iter().all(|r| r.category == c));
                let ids: Vec<u32> = view.iter().map(|r| r.id).collect();
                let mut sorted = ids.clone();
                sorted.sort_unstable();
                assert_eq!(ids, sorted);
            }
        }
    }
}

#[test]
fn next_and_previous_cycle_through_view() {
    let mut gallery = Gallery::default();
    let n = gallery.filtered_view().len();
    gallery.open(2).unwrap();

    for _ in 0..n {
        gallery.next();
    }
    assert_eq!(gallery.lightbox_view().unwrap().record.id, 3);

    for _ in 0..n {
        gallery.previous();
    }
    assert_eq!(gallery.lightbox_view().unwrap().record.id, 3);
}

#[test]
fn open_reports_record_and_position() {
    let mut gallery = Gallery::default();
    gallery.select_category(Category::Fashion.into());
    gallery.open(1).unwrap();

    let view = gallery.lightbox_view().unwrap();
    assert_eq!(view.record.title, "Runway Collection");
    assert_eq!(view.position, "2 / 2");
}

#[test]
fn three_record_scenario_wraps_to_first() {
    let catalog = Catalog::new(vec![
        ImageRecord::new(1, "https://img.example/a.jpg", Category::Editorial, "record0"),
        ImageRecord::new(2, "https://img.example/b.jpg", Category::Beauty, "record1"),
        ImageRecord::new(3, "https://img.example/c.jpg", Category::Editorial, "record2"),
    ])
    .unwrap();
    let mut gallery = Gallery::new(catalog);
    gallery.select_category(CategoryFilter::Only(Category::Editorial));

    let titles: Vec<&str> = gallery.filtered_view().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["record0", "record2"]);

    gallery.open(1).unwrap();
    gallery.click(OverlayTarget::NextButton);
    assert_eq!(gallery.lightbox_view().unwrap().record.title, "record0");
}

#[test]
fn overlay_regions_and_scroll_lock() {
    let mut gallery = Gallery::default();
    assert!(!gallery.is_scroll_locked());

    gallery.open(0).unwrap();
    assert!(gallery.is_scroll_locked());
    gallery.click(OverlayTarget::Image);
    gallery.click(OverlayTarget::Caption);
    assert!(matches!(gallery.lightbox_state(), LightboxState::Open { .. }));

    gallery.click(OverlayTarget::Backdrop);
    assert_eq!(gallery.lightbox_state(), LightboxState::Closed);
    assert!(!gallery.is_scroll_locked());

    // Reopening starts from the clicked item again
    gallery.open(5).unwrap();
    assert_eq!(gallery.lightbox_view().unwrap().position, "6 / 6");
    gallery.close();
}

#[test]
fn section_stays_revealed_after_leaving_viewport() {
    let gallery = Gallery::default();
    let observation = gallery.observe_sections();
    observation.notify(&[IntersectionEntry::new("about", 0.6)]);
    observation.notify(&[IntersectionEntry::new("about", 0.0)]);
    assert!(gallery.visibility().is_revealed("about"));

    drop(observation);
    assert!(gallery.visibility().is_revealed("about"));
}
