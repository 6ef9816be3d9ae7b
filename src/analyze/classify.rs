//! Category scoring: keyword presence per category, highest score wins.
//!
//! Matching is plain lower-case substring search (no word boundaries), so short
//! keywords such as `ip` also hit inside longer words. Issue and risk banks use
//! whole-word regexes instead.

use super::tables::{CategoryEntry, LookupTables};

/// Returned when no category keyword occurs and nothing was declared.
pub const GENERAL_LEGAL_MATTER: &str = "General Legal Matter";

/// Declared value that defers to keyword scoring.
pub const OTHER_CATEGORY: &str = "Other";

/// Number of distinct keywords of `entry` present in `description_lower`.
pub fn category_score(entry: &CategoryEntry, description_lower: &str) -> usize {
    entry
        .keywords
        .iter()
        .filter(|k| description_lower.contains(k.as_str()))
        .count()
}

/// Best keyword match, ignoring any declared category.
/// Ties go to the category declared first; `None` when everything scores 0.
pub fn infer_category<'t>(
    tables: &'t LookupTables,
    description_lower: &str,
) -> Option<&'t CategoryEntry> {
    let mut best: Option<(&CategoryEntry, usize)> = None;
    for entry in tables.categories() {
        let score = category_score(entry, description_lower);
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((entry, score)),
        }
    }
    best.map(|(entry, _)| entry)
}

/// Classification label for a matter. A declared category other than "Other"
/// is returned verbatim.
pub fn classify(
    tables: &LookupTables,
    description_lower: &str,
    declared_category: Option<&str>,
) -> String {
    if let Some(declared) = declared_category {
        if !declared.trim().is_empty() && declared != OTHER_CATEGORY {
            return declared.to_string();
        }
    }
    inferred_label(tables, description_lower)
}

/// Title-cased label of the inferred category, or the general sentinel.
pub fn inferred_label(tables: &LookupTables, description_lower: &str) -> String {
    infer_category(tables, description_lower)
        .map(|c| title_case(&c.key))
        .unwrap_or_else(|| GENERAL_LEGAL_MATTER.to_string())
}

/// `intellectual_property` → `Intellectual Property`.
pub fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
