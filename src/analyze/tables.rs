//! Lookup tables: keywords, practice area and specialist per category.
//!
//! Built once (either `builtin()` or from TOML) and shared read-only behind an
//! `Arc`. Entry order matters: it is the tie-break order of the classifier.
//!
//! TOML shape:
//! ```toml
//! [[category]]
//! key = "contract"
//! keywords = ["contract", "agreement"]
//! practice_area = "Commercial Law"
//! specialist = "Attorney Johnson (Commercial Law)"
//! ```

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const GENERAL_PRACTICE: &str = "General Practice";
pub const GENERAL_SPECIALIST: &str = "Senior Counsel (General Practice)";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    /// snake_case key, e.g. `intellectual_property`.
    pub key: String,
    /// Lower-case phrases, substring-matched.
    pub keywords: Vec<String>,
    pub practice_area: String,
    pub specialist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTables {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct TablesFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

fn entry(key: &str, keywords: &[&str], practice_area: &str, specialist: &str) -> CategoryEntry {
    CategoryEntry {
        key: key.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        practice_area: practice_area.to_string(),
        specialist: specialist.to_string(),
    }
}

/// `Real Estate`, `real-estate` and `real_estate` all become `real_estate`.
fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split([' ', '-', '_'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl LookupTables {
    /// The seven reference categories, in reference order.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                entry(
                    "contract",
                    &["contract", "agreement", "breach", "terms", "obligation", "enforce"],
                    "Commercial Law",
                    "Attorney Johnson (Commercial Law)",
                ),
                entry(
                    "employment",
                    &["employee", "employer", "discrimination", "harassment", "wage", "termination"],
                    "Labor & Employment",
                    "Attorney Smith (Labor & Employment)",
                ),
                entry(
                    "intellectual_property",
                    &["trademark", "copyright", "patent", "intellectual property", "ip"],
                    "Intellectual Property Law",
                    "Attorney Davis (IP Law)",
                ),
                entry(
                    "litigation",
                    &["lawsuit", "sue", "court", "dispute", "claim", "settlement"],
                    "Civil Litigation",
                    "Attorney Brown (Civil Litigation)",
                ),
                entry(
                    "real_estate",
                    &["property", "lease", "landlord", "tenant", "mortgage", "zoning"],
                    "Real Estate Law",
                    "Attorney Wilson (Property Law)",
                ),
                entry(
                    "business_formation",
                    &["llc", "corporation", "incorporate", "business formation", "startup"],
                    "Business Law",
                    "Attorney Taylor (Business Law)",
                ),
                entry(
                    "compliance",
                    &["compliance", "regulation", "legal requirement", "audit", "government"],
                    "Regulatory Compliance",
                    "Attorney Martinez (Regulatory Law)",
                ),
            ],
        }
    }

    /// Build from explicit entries; same validation as the TOML loaders.
    pub fn new(categories: Vec<CategoryEntry>) -> anyhow::Result<Self> {
        if categories.is_empty() {
            bail!("lookup tables define no categories");
        }
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(categories.len());
        for mut c in categories {
            c.key = normalize_key(&c.key);
            if c.key.is_empty() {
                bail!("category with empty key");
            }
            if !seen.insert(c.key.clone()) {
                bail!("category `{}` is defined twice", c.key);
            }
            if c.practice_area.trim().is_empty() {
                bail!("category `{}` has no practice_area", c.key);
            }
            if c.specialist.trim().is_empty() {
                bail!("category `{}` has no specialist", c.key);
            }
            c.keywords = c
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if c.keywords.is_empty() {
                bail!("category `{}` has no keywords", c.key);
            }
            out.push(c);
        }
        Ok(Self { categories: out })
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: TablesFile = toml::from_str(toml_str)?;
        Self::new(file.category)
    }

    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lookup tables from {}", path.display()))?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow!("invalid lookup tables at {}: {e}", path.display()))
    }

    /// Categories in declaration (tie-break) order.
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    /// Find a category by `intellectual property`, `Intellectual_Property`, ...
    pub fn find(&self, category: &str) -> Option<&CategoryEntry> {
        let key = normalize_key(category);
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn practice_area(&self, category: &str) -> &str {
        self.find(category)
            .map(|c| c.practice_area.as_str())
            .unwrap_or(GENERAL_PRACTICE)
    }

    pub fn recommend_specialist(&self, category: &str) -> &str {
        self.find(category)
            .map(|c| c.specialist.as_str())
            .unwrap_or(GENERAL_SPECIALIST)
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_accept_spaces_and_snake_case() {
        let t = LookupTables::builtin();
        assert_eq!(t.practice_area("intellectual property"), "Intellectual Property Law");
        assert_eq!(t.practice_area("Intellectual_Property"), "Intellectual Property Law");
        assert_eq!(t.recommend_specialist("Real Estate"), "Attorney Wilson (Property Law)");
        assert_eq!(t.recommend_specialist("business formation"), "Attorney Taylor (Business Law)");
    }

    #[test]
    fn unknown_category_falls_back_to_general() {
        let t = LookupTables::builtin();
        assert_eq!(t.practice_area("General Legal Matter"), GENERAL_PRACTICE);
        assert_eq!(t.recommend_specialist("maritime"), GENERAL_SPECIALIST);
        assert_eq!(t.practice_area(""), GENERAL_PRACTICE);
    }

    #[test]
    fn builtin_order_is_reference_order() {
        let keys: Vec<_> = LookupTables::builtin()
            .categories()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        assert_eq!(
            keys,
            [
                "contract",
                "employment",
                "intellectual_property",
                "litigation",
                "real_estate",
                "business_formation",
                "compliance"
            ]
        );
    }

    #[test]
    fn toml_keywords_are_normalized() {
        let t = LookupTables::from_toml_str(
            r#"
            [[category]]
            key = " Tax "
            keywords = ["  IRS ", "", "Audit"]
            practice_area = "Tax Law"
            specialist = "Attorney Lee (Tax)"
            "#,
        )
        .expect("valid toml");
        let c = &t.categories()[0];
        assert_eq!(c.key, "tax");
        assert_eq!(c.keywords, ["irs", "audit"]);
    }

    #[test]
    fn spaced_and_hyphenated_keys_are_stored_snake_case() {
        let t = LookupTables::from_toml_str(
            r#"
            [[category]]
            key = "Real  Estate"
            keywords = ["lease"]
            practice_area = "Property Law"
            specialist = "Attorney Wilson"

            [[category]]
            key = "white-collar crime"
            keywords = ["fraud"]
            practice_area = "Criminal Defense"
            specialist = "Attorney Ruiz"
            "#,
        )
        .expect("valid toml");
        assert_eq!(t.categories()[0].key, "real_estate");
        assert_eq!(t.categories()[1].key, "white_collar_crime");
        assert_eq!(t.practice_area("Real Estate"), "Property Law");
        assert_eq!(t.recommend_specialist("White Collar Crime"), "Attorney Ruiz");
    }

    #[test]
    fn toml_rejects_incomplete_categories() {
        let missing_specialist = r#"
            [[category]]
            key = "tax"
            keywords = ["irs"]
            practice_area = "Tax Law"
            specialist = " "
        "#;
        let err = LookupTables::from_toml_str(missing_specialist).unwrap_err();
        assert!(err.to_string().contains("tax"), "{err}");

        let duplicate = r#"
            [[category]]
            key = "tax"
            keywords = ["irs"]
            practice_area = "Tax Law"
            specialist = "A"

            [[category]]
            key = "TAX"
            keywords = ["audit"]
            practice_area = "Tax Law"
            specialist = "B"
        "#;
        assert!(LookupTables::from_toml_str(duplicate).is_err());
        assert!(LookupTables::from_toml_str("").is_err());
    }
}
