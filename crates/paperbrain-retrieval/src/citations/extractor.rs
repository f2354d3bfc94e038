//! Inline citation extraction: `[Title, Page N]`, several per bracket
//! separated by `;`. A looser `[Title, N]` form is tried only when the
//! strict form finds nothing in the whole answer.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use paperbrain_core::models::{Citation, CitationStats};
use regex::Regex;

static BRACKET: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").ok());

static STRICT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(.+?),\s*page\s+(\d+)\s*$").ok());

static LOOSE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?),\s*(\d+)\s*$").ok());

/// Every citation occurrence in order, duplicates included.
pub fn extract_all(text: &str) -> Vec<Citation> {
    let strict = extract_with(text, &STRICT);
    if !strict.is_empty() {
        return strict;
    }
    extract_with(text, &LOOSE)
}

fn extract_with(text: &str, part: &LazyLock<Option<Regex>>) -> Vec<Citation> {
    let (Some(bracket), Some(part)) = (BRACKET.as_ref(), part.as_ref()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for group in bracket.captures_iter(text) {
        let Some(inner) = group.get(1) else { continue };
        for piece in inner.as_str().split(';') {
            let Some(caps) = part.captures(piece) else { continue };
            let (Some(title), Some(page)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Ok(page) = page.as_str().parse::<u32>() else { continue };
            let title = title.as_str().trim();
            if title.is_empty() {
                continue;
            }
            out.push(Citation {
                paper_title: title.to_string(),
                page,
                verified: false,
            });
        }
    }
    out
}

/// Keep the first occurrence of each (paper, page) pair.
pub fn dedup(citations: &[Citation]) -> Vec<Citation> {
    let mut seen = HashSet::new();
    citations
        .iter()
        .filter(|c| seen.insert((c.paper_title.as_str(), c.page)))
        .cloned()
        .collect()
}

/// Counts over all occurrences. `verified_citations` is filled in by the
/// validator.
pub fn stats(all: &[Citation]) -> CitationStats {
    let mut papers: Vec<String> = Vec::new();
    let mut per_paper: HashMap<&str, usize> = HashMap::new();
    let mut pages = HashSet::new();

    for c in all {
        let count = per_paper.entry(c.paper_title.as_str()).or_insert_with(|| {
            papers.push(c.paper_title.clone());
            0
        });
        *count += 1;
        pages.insert((c.paper_title.as_str(), c.page));
    }

    CitationStats {
        total_citations: all.len(),
        unique_papers: papers.len(),
        unique_pages: pages.len(),
        per_paper: papers
            .iter()
            .map(|p| (p.clone(), per_paper.get(p.as_str()).copied().unwrap_or_default()))
            .collect(),
        papers,
        verified_citations: 0,
    }
}
