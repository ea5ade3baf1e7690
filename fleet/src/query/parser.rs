//! Natural-language search parser.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::{AssetStatus, EquipmentType};

/// Structured filters recognized in a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFilters {
    /// Equipment type keyword ("pumps" -> Pump)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<EquipmentType>,
    /// Lowercased location phrase ("in Plant A" -> "plant a")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// "maintenance due", "overdue", ...
    #[serde(default)]
    pub maintenance_due: bool,
    /// "critical", "high priority"
    #[serde(default)]
    pub critical: bool,
    /// Four-digit install year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_year: Option<i32>,
    /// Single status (no "or" in the query)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    /// Any-of status set (query contained "or")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_or: Option<BTreeSet<AssetStatus>>,
}

impl ParsedFilters {
    /// True when no filter field was recognized.
    pub fn is_empty(&self) -> bool {
        *self == ParsedFilters::default()
    }
}

/// Result of parsing a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSearch {
    /// The input exactly as given.
    pub original_term: String,
    /// What is left after recognized phrases are stripped, whitespace collapsed.
    pub cleaned_term: String,
    pub filters: ParsedFilters,
    /// At least one filter field was recognized.
    pub has_natural_language: bool,
}

impl ParsedSearch {
    /// Whitespace-separated tokens of the residual term.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.cleaned_term.split_whitespace()
    }
}

static EQUIPMENT_PATTERNS: OnceLock<Vec<(EquipmentType, Regex)>> = OnceLock::new();
static STATUS_PATTERNS: OnceLock<Vec<(AssetStatus, Regex)>> = OnceLock::new();
static LOCATION_REGEX: OnceLock<Regex> = OnceLock::new();
static MAINTENANCE_DUE_REGEX: OnceLock<Regex> = OnceLock::new();
static CRITICAL_REGEX: OnceLock<Regex> = OnceLock::new();
static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
static OR_REGEX: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("built-in search pattern must compile")
}

fn equipment_patterns() -> &'static [(EquipmentType, Regex)] {
    EQUIPMENT_PATTERNS.get_or_init(|| {
        EquipmentType::ALL
            .into_iter()
            .map(|kind| {
                let words = kind.as_str().to_lowercase().replace(' ', r"\s+");
                (kind, compile(&format!(r"\b{}s?\b", words)))
            })
            .collect()
    })
}

/// Status phrases in priority order; "not in use" must precede "in use".
fn status_patterns() -> &'static [(AssetStatus, Regex)] {
    STATUS_PATTERNS.get_or_init(|| {
        vec![
            (AssetStatus::NotInUse, compile(r"\b(?:not\s+in\s+use|unused|idle)\b")),
            (
                AssetStatus::OutOfService,
                compile(r"\b(?:out\s+of\s+service|offline|broken|down)\b"),
            ),
            (
                AssetStatus::UnderMaintenance,
                compile(r"\b(?:under\s+maintenance|in\s+maintenance|being\s+serviced)\b"),
            ),
            (AssetStatus::Standby, compile(r"\bstand\s*by\b")),
            (AssetStatus::Unknown, compile(r"\bunknown\b")),
            (
                AssetStatus::InUse,
                compile(r"\b(?:in\s+use|running|active|operational)\b"),
            ),
        ]
    })
}

fn location_regex() -> &'static Regex {
    LOCATION_REGEX.get_or_init(|| {
        compile(r"\b(?:in|at)\s+((?:plant|building|facility|site|area|zone)\s+[a-z0-9]+)\b")
    })
}

fn maintenance_due_regex() -> &'static Regex {
    MAINTENANCE_DUE_REGEX.get_or_init(|| {
        compile(
            r"\b(?:maintenance\s+due|due\s+for\s+maintenance|needs?\s+maintenance|needing\s+maintenance|overdue)\b",
        )
    })
}

fn critical_regex() -> &'static Regex {
    CRITICAL_REGEX.get_or_init(|| compile(r"\b(?:critical|high[\s-]+priority)\b"))
}

fn year_regex() -> &'static Regex {
    YEAR_REGEX.get_or_init(|| {
        compile(r"\b(?:(?:installed\s+in|installed|from)\s+)?((?:19|20)\d{2})\b")
    })
}

fn or_regex() -> &'static Regex {
    OR_REGEX.get_or_init(|| compile(r"\bor\b"))
}

/// Parse a free-text search into structured filters and a residual term.
///
/// Recognizers run in a fixed order (equipment type, location, maintenance
/// due, criticality, year, status). The first value a recognizer finds is
/// kept and every occurrence of its phrases is stripped from the residual.
/// Stripping can bring two words together into a new phrase, so the
/// non-status recognizers repeat until nothing more matches. The parser never
/// fails: text it does not understand is left in `cleaned_term`.
pub fn parse_search(input: &str) -> ParsedSearch {
    let mut residual = input.to_string();
    let mut filters = ParsedFilters::default();

    strip_recognized(&mut residual, &mut filters);

    if or_regex().is_match(&residual) {
        if let Some(statuses) = parse_status_or(&mut residual) {
            filters.status_or = Some(statuses);
        }
    } else {
        // At most one status; later status phrases stay in the residual
        for (status, re) in status_patterns() {
            if let Some(range) = re.find(&residual).map(|m| m.range()) {
                filters.status = Some(*status);
                blank(&mut residual, range);
                break;
            }
        }
    }

    strip_recognized(&mut residual, &mut filters);

    let cleaned_term = collapse_whitespace(&residual);
    let has_natural_language = !filters.is_empty();

    log::debug!(
        "parsed search {:?}: filters={:?} residual={:?}",
        input,
        filters,
        cleaned_term
    );

    ParsedSearch {
        original_term: input.to_string(),
        cleaned_term,
        filters,
        has_natural_language,
    }
}

/// Run the non-status recognizers until none of them matches.
fn strip_recognized(residual: &mut String, filters: &mut ParsedFilters) {
    loop {
        let mut matched = false;

        for (kind, re) in equipment_patterns() {
            while let Some(range) = re.find(residual.as_str()).map(|m| m.range()) {
                filters.equipment_type.get_or_insert(*kind);
                blank(residual, range);
                matched = true;
            }
        }

        while let Some((range, place)) = location_regex()
            .captures(residual.as_str())
            .and_then(|caps| {
                let whole = caps.get(0)?.range();
                Some((whole, collapse_whitespace(&caps[1]).to_lowercase()))
            })
        {
            filters.location.get_or_insert(place);
            blank(residual, range);
            matched = true;
        }

        while let Some(range) = maintenance_due_regex()
            .find(residual.as_str())
            .map(|m| m.range())
        {
            filters.maintenance_due = true;
            blank(residual, range);
            matched = true;
        }

        while let Some(range) = critical_regex().find(residual.as_str()).map(|m| m.range()) {
            filters.critical = true;
            blank(residual, range);
            matched = true;
        }

        while let Some((range, year)) = year_regex()
            .captures(residual.as_str())
            .and_then(|caps| Some((caps.get(0)?.range(), caps[1].parse::<i32>().ok()?)))
        {
            filters.install_year.get_or_insert(year);
            blank(residual, range);
            matched = true;
        }

        if !matched {
            break;
        }
    }
}

/// Collect every status phrase in each `or`-separated segment.
///
/// Within a segment the patterns run in priority order over text that is
/// blanked as it goes, so "not in use" never also counts as "in use". Every
/// `or` connector that touches a status-bearing segment is stripped too.
/// Returns `None`, leaving the residual alone, when no status was found.
fn parse_status_or(residual: &mut String) -> Option<BTreeSet<AssetStatus>> {
    let connectors: Vec<Range<usize>> = or_regex()
        .find_iter(residual.as_str())
        .map(|m| m.range())
        .collect();

    // Segment i spans from the end of connector i-1 to the start of connector i
    let mut bounds = Vec::with_capacity(connectors.len() + 1);
    let mut start = 0;
    for connector in &connectors {
        bounds.push(start..connector.start);
        start = connector.end;
    }
    bounds.push(start..residual.len());

    let mut statuses = BTreeSet::new();
    let mut stripped = residual.clone();
    let mut has_status = vec![false; bounds.len()];

    // Blanking keeps byte lengths, so segment offsets stay valid
    for (i, segment) in bounds.iter().enumerate() {
        for (status, re) in status_patterns() {
            while let Some(range) = re
                .find(&stripped[segment.clone()])
                .map(|m| segment.start + m.start()..segment.start + m.end())
            {
                statuses.insert(*status);
                blank(&mut stripped, range);
                has_status[i] = true;
            }
        }
    }

    if statuses.is_empty() {
        return None;
    }

    for (i, connector) in connectors.iter().enumerate() {
        if has_status[i] || has_status[i + 1] {
            blank(&mut stripped, connector.clone());
        }
    }

    *residual = stripped;
    Some(statuses)
}

/// Overwrite a matched range with spaces of the same byte length.
fn blank(text: &mut String, range: Range<usize>) {
    let width = range.len();
    text.replace_range(range, &" ".repeat(width));
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
