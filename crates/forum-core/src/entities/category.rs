//! Category entity - a fixed topic a post can be filed under

use serde::Serialize;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Categories created on first start, as `(name, slug)`
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("General", "general"),
    ("Help", "help"),
    ("Random", "random"),
    ("Announcements", "announcements"),
    ("Show and Tell", "show-and-tell"),
];
