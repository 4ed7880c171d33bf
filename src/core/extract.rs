// snapsift - core/extract.rs
//
// Pattern-driven extraction of structured records from report text.
// Core layer: pure functions of (text) -> (records), no I/O.
//
// All three extractors scan the whole text with compiled regular
// expressions. Absence of matches yields an empty result, never an error:
// the caller decides how to present "nothing found".

use crate::core::model::{FruRecord, LabelRecord, MetadataRecord};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Compile a pattern without panicking at runtime.
/// Every pattern below is exercised by the unit tests, so a mistake shows
/// up as a failing test rather than a runtime panic.
fn re(pat: &str) -> Regex {
    Regex::new(pat).expect("extract: invalid regex")
}

// =============================================================================
// Label extraction
// =============================================================================

/// Extract error labels and their occurrence counts from an error report.
///
/// A label is the first run of non-whitespace characters after a `LABEL:`
/// marker anchored to line start (case-sensitive). The result is ordered
/// by count descending; ties keep the order in which each label was first
/// seen (stable sort over first-seen order).
pub fn extract_labels(text: &str) -> Vec<LabelRecord> {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    // Horizontal whitespace only: a marker with no value on its line must
    // not swallow the first token of the following line.
    let pattern = LABEL_RE.get_or_init(|| re(r"(?m)^LABEL:[ \t]+(\S+)"));

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<LabelRecord> = Vec::new();

    for caps in pattern.captures_iter(text) {
        let label = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&i) => records[i].count += 1,
            None => {
                index.insert(label, records.len());
                records.push(LabelRecord {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so equal counts keep first-seen order.
    records.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(labels = records.len(), "Label extraction complete");
    records
}

// =============================================================================
// FRU / location extraction
// =============================================================================

/// Extract field-replaceable-unit references and their locations.
///
/// A reference is a `FRU:` marker followed by exactly two
/// whitespace-delimited tokens (part identifier, location code), anywhere
/// on a line. Occurrences are grouped by the (part, location) pair and
/// counted. Ordering is count descending, ties broken by (fru, location)
/// lexical order so results are reproducible.
pub fn extract_fru_locations(text: &str) -> Vec<FruRecord> {
    static FRU_RE: OnceLock<Regex> = OnceLock::new();
    // Horizontal whitespace only, so both tokens must sit on the marker's
    // own line (a marker with fewer than two tokens produces no match).
    let pattern = FRU_RE.get_or_init(|| re(r"FRU:[ \t]+(\S+)[ \t]+(\S+)"));

    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    for caps in pattern.captures_iter(text) {
        let fru = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let location = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if fru.is_empty() || location.is_empty() {
            continue;
        }
        *counts
            .entry((fru.to_string(), location.to_string()))
            .or_insert(0) += 1;
    }

    let mut records: Vec<FruRecord> = counts
        .into_iter()
        .map(|((fru, location), count)| FruRecord {
            fru,
            location,
            count,
        })
        .collect();

    records.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.fru.cmp(&b.fru))
            .then_with(|| a.location.cmp(&b.location))
    });

    tracing::debug!(pairs = records.len(), "FRU extraction complete");
    records
}

// =============================================================================
// Snap metadata extraction
// =============================================================================

/// A named single-value pattern: one fact per document, first match wins.
struct FactPattern {
    category: &'static str,
    pattern: Regex,
}

/// Extract system metadata from a snap capture.
///
/// Two pattern families are applied separately:
///   - single-value facts (firmware version, model name, system id, raw
///     sys0 entry): each emits at most one record, taken from the first
///     match in the text;
///   - component enumeration (`<type><index>!<value>` lines): emits one
///     record per match, so hardware inventory is never silently
///     collapsed to a single entry.
pub fn extract_metadata(text: &str) -> Vec<MetadataRecord> {
    static FACTS: OnceLock<Vec<FactPattern>> = OnceLock::new();
    static COMPONENT_RE: OnceLock<Regex> = OnceLock::new();

    let facts = FACTS.get_or_init(|| {
        vec![
            FactPattern {
                category: "Firmware Version",
                pattern: re(r"(?m)^fwversion[ \t]+([\S,]+)\s"),
            },
            FactPattern {
                category: "Model Name",
                pattern: re(r"(?m)^modelname[ \t]+([\S,]+)\s"),
            },
            FactPattern {
                category: "System ID",
                pattern: re(r"(?m)^systemid[ \t]+([\S,]+)\s"),
            },
            FactPattern {
                category: "System Entry (sys0)",
                pattern: re(r"(?m)^sys0!system:(.+)$"),
            },
        ]
    });

    // Component types form a closed set defined by the snap format:
    // SAS adapters, fibre-channel adapters, ethernet adapters, physical
    // and logical disks.
    let component = COMPONENT_RE
        .get_or_init(|| re(r"(?m)^(sissas\d+|fcs\d+|ent\d+|pdisk\d+|hdisk\d+)!([\w\d.?\-]+)"));

    let mut records: Vec<MetadataRecord> = Vec::new();

    for fact in facts {
        if let Some(caps) = fact.pattern.captures(text) {
            if let Some(value) = caps.get(1) {
                records.push(MetadataRecord {
                    category: fact.category.to_string(),
                    value: value.as_str().trim().to_string(),
                });
            }
        }
    }

    for caps in component.captures_iter(text) {
        let (Some(kind), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        records.push(MetadataRecord {
            category: format!("Component ({})", kind.as_str()),
            value: value.as_str().to_string(),
        });
    }

    tracing::debug!(records = records.len(), "Snap metadata extraction complete");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Label extraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_labels_counted_and_sorted_by_count() {
        let text = "LABEL: AA\nfoo\nLABEL: BB\nLABEL: AA\n";
        let records = extract_labels(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "AA");
        assert_eq!(records[0].count, 2);
        assert_eq!(records[1].label, "BB");
        assert_eq!(records[1].count, 1);
    }

    #[test]
    fn test_labels_tie_break_preserves_first_seen_order() {
        let text = "LABEL: ZULU\nLABEL: ALPHA\nLABEL: ZULU\nLABEL: ALPHA\n";
        let records = extract_labels(text);
        // Equal counts: ZULU was seen first and must stay first.
        assert_eq!(records[0].label, "ZULU");
        assert_eq!(records[1].label, "ALPHA");
    }

    #[test]
    fn test_labels_marker_must_start_line() {
        let text = "  LABEL: INDENTED\nprefix LABEL: MIDLINE\n";
        assert!(extract_labels(text).is_empty());
    }

    #[test]
    fn test_labels_marker_is_case_sensitive() {
        let text = "label: lowercase\nLabel: Mixed\n";
        assert!(extract_labels(text).is_empty());
    }

    #[test]
    fn test_labels_empty_input_yields_empty_result() {
        assert!(extract_labels("").is_empty());
        assert!(extract_labels("no markers anywhere\n").is_empty());
    }

    #[test]
    fn test_labels_marker_without_value_yields_no_record() {
        // Marker followed by only whitespace captures nothing for that line.
        let text = "LABEL:   \nLABEL: REAL\n";
        let records = extract_labels(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "REAL");
    }

    #[test]
    fn test_labels_only_first_token_captured() {
        let text = "LABEL: DISK_ERR4 trailing words ignored\n";
        let records = extract_labels(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "DISK_ERR4");
    }

    #[test]
    fn test_labels_count_sum_matches_matching_lines() {
        let text = "LABEL: A\nLABEL: B\nLABEL: A\nLABEL: C\nLABEL: A\n";
        let total: u64 = extract_labels(text).iter().map(|r| r.count).sum();
        assert_eq!(total, 5);
    }

    // -------------------------------------------------------------------------
    // FRU extraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_fru_pairs_grouped_and_counted() {
        let text = "FRU: PART1 U1\nFRU: PART1 U1\nFRU: PART2 U2\n";
        let records = extract_fru_locations(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fru, "PART1");
        assert_eq!(records[0].location, "U1");
        assert_eq!(records[0].count, 2);
        assert_eq!(records[1].fru, "PART2");
        assert_eq!(records[1].count, 1);
    }

    #[test]
    fn test_fru_marker_matches_mid_line() {
        let text = "    FRU: 00E8612 U78C9.001.WZS0A8M-P1\n";
        let records = extract_fru_locations(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fru, "00E8612");
        assert_eq!(records[0].location, "U78C9.001.WZS0A8M-P1");
    }

    #[test]
    fn test_fru_marker_with_single_token_yields_no_match() {
        // Two tokens are required; a lone identifier does not match unless
        // another token follows on the same line.
        let text = "FRU: LONELY\n";
        assert!(extract_fru_locations(text).is_empty());
    }

    #[test]
    fn test_fru_ties_sorted_lexically() {
        let text = "FRU: B U2\nFRU: A U1\nFRU: C U3\n";
        let records = extract_fru_locations(text);
        let frus: Vec<&str> = records.iter().map(|r| r.fru.as_str()).collect();
        assert_eq!(frus, vec!["A", "B", "C"]);
    }

    // -------------------------------------------------------------------------
    // Snap metadata extraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_metadata_single_value_facts() {
        let text = "fwversion IBM,FW860.42 \n\
                    modelname 8286-41A \n\
                    systemid IBM,0212345AB \n";
        let records = extract_metadata(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, "Firmware Version");
        assert_eq!(records[0].value, "IBM,FW860.42");
        assert_eq!(records[1].category, "Model Name");
        assert_eq!(records[1].value, "8286-41A");
        assert_eq!(records[2].category, "System ID");
        assert_eq!(records[2].value, "IBM,0212345AB");
    }

    #[test]
    fn test_metadata_single_value_first_match_wins() {
        let text = "modelname 8286-41A \nmodelname 9009-22A \n";
        let records = extract_metadata(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "8286-41A");
    }

    #[test]
    fn test_metadata_sys0_entry_captures_rest_of_line() {
        let text = "sys0!system:8286-41A 10.0 (sf860_056)\n";
        let records = extract_metadata(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "System Entry (sys0)");
        assert_eq!(records[0].value, "8286-41A 10.0 (sf860_056)");
    }

    #[test]
    fn test_metadata_components_enumerate_all_matches() {
        let text = "hdisk0!IBM-ST9300605SS\n\
                    hdisk1!IBM-ST9300605SS\n\
                    ent0!e414571614102004\n\
                    fcs0!df1000f114108a03\n\
                    pdisk3!IBM-HUC101212CSS60\n\
                    sissas0!57D7001SISIOA\n";
        let records = extract_metadata(text);
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].category, "Component (hdisk0)");
        assert_eq!(records[0].value, "IBM-ST9300605SS");
        assert_eq!(records[2].category, "Component (ent0)");
        assert_eq!(records[5].category, "Component (sissas0)");
    }

    #[test]
    fn test_metadata_component_must_start_line() {
        let text = "  hdisk0!IBM-ST9300605SS\n";
        assert!(extract_metadata(text).is_empty());
    }

    #[test]
    fn test_metadata_unknown_component_type_ignored() {
        // cd0 is not in the component type set.
        let text = "cd0!VirtualDVD\n";
        assert!(extract_metadata(text).is_empty());
    }

    #[test]
    fn test_metadata_empty_input_yields_empty_result() {
        assert!(extract_metadata("").is_empty());
        assert!(extract_metadata("nothing relevant here\n").is_empty());
    }
}
