// src/services/volume_count_rules.rs
//
// Volume-count rules
//
// Pure text rules used to infer volume counts from free-text catalog titles:
// - volume-number extraction (ordered pattern table, first match decides)
// - series-title normalization and relevance matching
// - volume-marker removal for ISBN hits
// - cover URL upgrade
//
// No I/O. Same input → same output.

use regex::Regex;
use std::collections::BTreeMap;

use crate::domain::{SeriesMatchCandidate, VolumeCoverEntry};
use crate::integrations::CatalogEntry;

/// Volume-number patterns in priority order.
///
/// Explicit markers come first; the positional "trailing number" patterns are
/// last because a year or page count at the end of an unrelated title would
/// otherwise win. Digits are ASCII only.
pub const VOLUME_NUMBER_PATTERNS: [(&str, &str); 6] = [
    ("vol", r"(?i)vol\.?\s*([0-9]+)"),
    ("volume", r"(?i)volume\s*([0-9]+)"),
    ("v_prefix", r"(?i)v([0-9]+)"),
    ("hash", r"#([0-9]+)"),
    ("trailing", r"\s([0-9]+)$"),
    ("comma_trailing", r",\s*([0-9]+)$"),
];

/// Series-title suffixes removed before searching, applied in order
const SERIES_SUFFIX_PATTERNS: [&str; 2] = [r"(?i)\s*\(manga\)\s*$", r"(?i)\s*manga\s*$"];

/// Volume markers removed from an ISBN hit to recover the series name,
/// applied in order, first occurrence only
const VOLUME_MARKER_PATTERNS: [&str; 3] = [
    r"(?i),?\s*vol\.?\s*[0-9]+",
    r"(?i),?\s*volume\s*[0-9]+",
    r"\s*[0-9]+$",
];

/// One named entry of the extraction table
pub struct VolumePattern {
    pub name: &'static str,
    regex: Regex,
}

/// Deterministic rules for mining volume information from catalog titles.
/// All rules are explicit and ordered.
pub struct VolumeCountRules {
    volume_number_patterns: Vec<VolumePattern>,
    series_suffix_patterns: Vec<Regex>,
    volume_marker_patterns: Vec<Regex>,
}

impl Default for VolumeCountRules {
    fn default() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("built-in pattern must compile");

        Self {
            volume_number_patterns: VOLUME_NUMBER_PATTERNS
                .iter()
                .map(|&(name, pattern)| VolumePattern {
                    name,
                    regex: compile(pattern),
                })
                .collect(),
            series_suffix_patterns: SERIES_SUFFIX_PATTERNS.iter().copied().map(compile).collect(),
            volume_marker_patterns: VOLUME_MARKER_PATTERNS.iter().copied().map(compile).collect(),
        }
    }
}

impl VolumeCountRules {
    // ========================================================================
    // EXTRACTION
    // ========================================================================

    /// Volume number denoted by a title, if any.
    ///
    /// Only the first matching pattern is consulted. A match of 0, or a digit
    /// run too large for u32, means "not found".
    pub fn extract_volume_number(&self, title: &str) -> Option<u32> {
        self.extract_with_pattern(title).map(|(number, _)| number)
    }

    /// Like `extract_volume_number`, also naming the pattern that decided
    pub fn extract_with_pattern(&self, title: &str) -> Option<(u32, &'static str)> {
        let (pattern, captures) = self
            .volume_number_patterns
            .iter()
            .find_map(|p| p.regex.captures(title).map(|c| (p, c)))?;

        captures
            .get(1)
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .filter(|number| *number > 0)
            .map(|number| (number, pattern.name))
    }

    // ========================================================================
    // TITLE MATCHING
    // ========================================================================

    /// Strip a trailing "(manga)" or "manga" suffix and surrounding whitespace
    pub fn clean_series_title(&self, title: &str) -> String {
        let mut cleaned = title.to_string();
        for pattern in &self.series_suffix_patterns {
            cleaned = pattern.replace(&cleaned, "").into_owned();
        }
        cleaned.trim().to_string()
    }

    /// Lower-cased, suffix-stripped form of a target series title
    pub fn normalize_target(&self, series_title: &str) -> String {
        self.clean_series_title(series_title).to_lowercase()
    }

    /// Does a catalog title plausibly belong to the target series?
    ///
    /// Accepted when the candidate contains the target, or the target contains
    /// the candidate's part before its first comma.
    pub fn title_matches(&self, series_title: &str, candidate_title: &str) -> bool {
        Self::matches_normalized(&self.normalize_target(series_title), candidate_title)
    }

    fn matches_normalized(normalized_target: &str, candidate_title: &str) -> bool {
        let candidate = candidate_title.to_lowercase();
        let series_part = candidate.split(',').next().unwrap_or_default().trim();

        candidate.contains(normalized_target) || normalized_target.contains(series_part)
    }

    /// Entries that pass the relevance filter and yield a volume number,
    /// in catalog order
    pub fn match_candidates<'a>(
        &self,
        series_title: &str,
        entries: &'a [CatalogEntry],
    ) -> Vec<(SeriesMatchCandidate, &'a CatalogEntry)> {
        let target = self.normalize_target(series_title);

        entries
            .iter()
            .filter(|entry| {
                let keep = Self::matches_normalized(&target, &entry.title);
                if !keep {
                    log::debug!("Dropping unrelated catalog entry \"{}\"", entry.title);
                }
                keep
            })
            .filter_map(|entry| {
                let (volume_number, pattern) = self.extract_with_pattern(&entry.title)?;
                log::trace!("\"{}\" → vol {} via {}", entry.title, volume_number, pattern);
                Some((
                    SeriesMatchCandidate {
                        title: entry.title.clone(),
                        volume_number,
                    },
                    entry,
                ))
            })
            .collect()
    }

    // ========================================================================
    // AGGREGATION
    // ========================================================================

    /// Highest volume number among the matching entries
    pub fn max_volume_number(&self, series_title: &str, entries: &[CatalogEntry]) -> Option<u32> {
        self.match_candidates(series_title, entries)
            .into_iter()
            .map(|(candidate, _)| candidate.volume_number)
            .max()
    }

    /// One cover entry per volume number in `1..=max_volumes`, ascending.
    /// The first entry seen for a number wins.
    pub fn cover_entries(
        &self,
        series_title: &str,
        entries: &[CatalogEntry],
        max_volumes: u32,
    ) -> Vec<VolumeCoverEntry> {
        let mut by_number: BTreeMap<u32, VolumeCoverEntry> = BTreeMap::new();

        for (candidate, entry) in self.match_candidates(series_title, entries) {
            if candidate.volume_number > max_volumes {
                continue;
            }
            by_number
                .entry(candidate.volume_number)
                .or_insert_with(|| VolumeCoverEntry {
                    volume_number: candidate.volume_number,
                    title: candidate.title,
                    cover_url: entry.thumbnail.as_deref().map(|t| self.upgrade_cover_url(t)),
                });
        }

        by_number.into_values().collect()
    }

    // ========================================================================
    // ISBN / COVERS
    // ========================================================================

    /// Remove the volume marker from a book title: "Dandadan, Vol. 7" → "Dandadan"
    pub fn strip_volume_marker(&self, title: &str) -> String {
        let mut stripped = title.to_string();
        for pattern in &self.volume_marker_patterns {
            stripped = pattern.replace(&stripped, "").into_owned();
        }
        stripped.trim().to_string()
    }

    /// Ask for the larger thumbnail and force https
    pub fn upgrade_cover_url(&self, thumbnail: &str) -> String {
        thumbnail
            .replacen("zoom=1", "zoom=2", 1)
            .replacen("http://", "https://", 1)
    }
}
