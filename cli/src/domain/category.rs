//! Static grouping of well-known server names. Labels output only.

/// Category label → known server names, in display order.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Development",
        &["github", "gitlab", "git", "filesystem", "a2a-coder"],
    ),
    (
        "Data",
        &["postgres", "sqlite", "redis", "jupyter-notebook-mcp"],
    ),
    (
        "AI & Reasoning",
        &["sequential-thinking", "memory", "deepseek", "gpt4"],
    ),
    ("Web", &["fetch", "puppeteer", "playwright", "brave-search"]),
    ("Productivity", &["slack", "google-drive", "notion"]),
];

/// Group the given names by category.
///
/// Table names not in `names` are skipped, names not in the table are
/// omitted, and empty categories are dropped.
#[must_use]
pub fn categories_of(names: &[&str]) -> Vec<(&'static str, Vec<&'static str>)> {
    CATEGORIES
        .iter()
        .filter_map(|(label, members)| {
            let present: Vec<&'static str> = members
                .iter()
                .copied()
                .filter(|m| names.contains(m))
                .collect();
            (!present.is_empty()).then_some((*label, present))
        })
        .collect()
}

/// Category label of a single name, if any.
#[must_use]
pub fn category_of(name: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, members)| members.contains(&name))
        .map(|(label, _)| *label)
}
