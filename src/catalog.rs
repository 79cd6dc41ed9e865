//! The image catalog: a fixed, ordered list of portfolio images.
//!
//! Insertion order is display order. Records are immutable once the catalog
//! is built; the catalog can come from the built-in portfolio or from a JSON
//! file of the same shape.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Closed set of portfolio categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fashion,
    Beauty,
    Commercial,
    Editorial,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Fashion,
        Category::Beauty,
        Category::Commercial,
        Category::Editorial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Fashion => "Fashion",
            Category::Beauty => "Beauty",
            Category::Commercial => "Commercial",
            Category::Editorial => "Editorial",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::CatalogError(format!("unknown category '{}'", s)))
    }
}

/// A single portfolio image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique positive identifier
    pub id: u32,
    /// Remote resource locator
    pub url: String,
    pub category: Category,
    /// Display title
    pub title: String,
}

impl ImageRecord {
    pub fn new(id: u32, url: impl Into<String>, category: Category, title: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            category,
            title: title.into(),
        }
    }
}

/// Ordered, validated sequence of image records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ImageRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting zero or duplicate ids.
    ///
    /// URLs are kept as given; an unusable one only fails when its image is
    /// fetched.
    pub fn new(records: Vec<ImageRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for rec in &records {
            if rec.id == 0 {
                return Err(Error::CatalogError(format!(
                    "record '{}' has id 0; ids must be positive",
                    rec.title
                )));
            }
            if !seen.insert(rec.id) {
                return Err(Error::CatalogError(format!("duplicate id {}", rec.id)));
            }
        }
        Ok(Self { records })
    }

    /// Parse a JSON array of `{id, url, category, title}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<ImageRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::debug!("Loaded {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ImageRecord;
    type IntoIter = std::slice::Iter<'a, ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

const CDN: &str = "https://cdn.poehali.dev/projects/8b2aab55-eb63-44c9-b11f-63060693552e/files";

/// The portfolio shipped with the site.
impl Default for Catalog {
    fn default() -> Self {
        let img = |name: &str| format!("{}/{}.jpg", CDN, name);
        let runway = img("335ab86e-f4ae-40b9-a955-94bf1a96380b");
        let beauty = img("7fff6723-a4f1-4732-9231-a66cff73da58");
        let lifestyle = img("51a43506-9a3a-4278-acdf-9d92a448b09c");

        Self {
            records: vec![
                ImageRecord::new(1, runway.clone(), Category::Fashion, "High Fashion Editorial"),
                ImageRecord::new(2, beauty.clone(), Category::Beauty, "Beauty Campaign"),
                ImageRecord::new(3, lifestyle.clone(), Category::Commercial, "Lifestyle Brand"),
                ImageRecord::new(4, runway, Category::Editorial, "Magazine Cover"),
                ImageRecord::new(5, beauty, Category::Fashion, "Runway Collection"),
                ImageRecord::new(6, lifestyle, Category::Commercial, "Brand Ambassador"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid_and_ordered() {
        let cat = Catalog::default();
        assert_eq!(cat.len(), 6);
        let ids: Vec<u32> = cat.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(Catalog::new(cat.records().to_vec()).is_ok());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("fashion".parse::<Category>().unwrap(), Category::Fashion);
        assert_eq!(" EDITORIAL ".parse::<Category>().unwrap(), Category::Editorial);
        assert!("Sports".parse::<Category>().is_err());
    }

    #[test]
    fn rejects_duplicate_and_zero_ids() {
        let a = ImageRecord::new(1, "https://a.example/1.jpg", Category::Beauty, "a");
        let dup = vec![a.clone(), a.clone()];
        assert!(matches!(Catalog::new(dup), Err(Error::CatalogError(_))));

        let zero = ImageRecord::new(0, "https://a.example/0.jpg", Category::Beauty, "z");
        assert!(Catalog::new(vec![zero]).is_err());
    }

    #[test]
    fn keeps_unusable_url_for_the_loader() {
        let json = r#"[
            {"id": 1, "url": "https://img.example/a.jpg", "category": "Fashion", "title": "ok"},
            {"id": 7, "url": "not a url", "category": "Fashion", "title": "bad"}
        ]"#;
        let cat = Catalog::from_json(json).expect("url is not validated here");
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.records()[1].url, "not a url");
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"[
            {"id": 10, "url": "https://img.example/a.jpg", "category": "Editorial", "title": "Cover"},
            {"id": 11, "url": "https://img.example/b.jpg", "category": "Beauty", "title": "Close-up"}
        ]"#;
        let cat = Catalog::from_json(json).expect("valid catalog");
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.get(11).map(|r| r.category), Some(Category::Beauty));
        assert!(Catalog::from_json(r#"[{"id": 1}]"#).is_err());
    }
}
