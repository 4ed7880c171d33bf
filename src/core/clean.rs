// snapsift - core/clean.rs
//
// Line-oriented hex-noise removal. Three small finite-state machines,
// one per dump format, each an explicit two-state enum with a per-line
// transition. Core layer: pure functions of (text) -> (text), no I/O.
//
// The generic and Power cleaners preserve surviving lines byte-exactly,
// original terminators included (iteration is over `split_inclusive`, so
// CRLF endings and a missing final newline survive untouched). The event
// log cleaner normalises its output instead; its contract includes blank
// line collapsing and a single trailing terminator.

use crate::util::constants;

// =============================================================================
// Generic errpt-style cleaner
// =============================================================================

/// States for the errpt-style noisy-block machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenericState {
    /// Emitting lines unchanged.
    Passing,

    /// Inside a detail/sense data block, dropping hex rows and blanks.
    Skipping,
}

/// Remove detail-data and sense-data hex blocks from an error report.
///
/// A block opens at a line whose trimmed content equals one of the known
/// block headers (case-insensitive); the header line is dropped. While
/// skipping, blank lines and lines made entirely of 4-hex-digit tokens
/// are dropped. The first line that is neither ends the block and is
/// processed normally, so a header immediately following a block starts
/// the next block rather than leaking into the output. One pass is
/// complete: no residual header or hex line survives, which is what makes
/// the function idempotent.
pub fn clean_generic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = GenericState::Passing;

    for raw in text.split_inclusive('\n') {
        if state == GenericState::Skipping {
            let trimmed = raw.trim();
            if trimmed.is_empty() || is_four_digit_hex_row(trimmed) {
                continue;
            }
            state = GenericState::Passing;
        }
        if is_generic_block_header(raw) {
            state = GenericState::Skipping;
            continue;
        }
        out.push_str(raw);
    }

    out
}

/// True when the trimmed line equals one of the generic block headers.
fn is_generic_block_header(line: &str) -> bool {
    let trimmed = line.trim();
    constants::GENERIC_BLOCK_HEADERS
        .iter()
        .any(|h| trimmed.eq_ignore_ascii_case(h))
}

/// True when every whitespace-delimited token on the (non-blank, trimmed)
/// line is a run of exactly 4 hexadecimal digits.
fn is_four_digit_hex_row(trimmed: &str) -> bool {
    trimmed
        .split_whitespace()
        .all(|tok| tok.len() == 4 && tok.bytes().all(|b| b.is_ascii_hexdigit()))
}

// =============================================================================
// Power-variant cleaner
// =============================================================================

/// States for the Power hex-block machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerState {
    Normal,
    InHexBlock,
}

/// Remove ADDITIONAL HEX DATA blocks from a Power platform dump.
///
/// The block opens at a whole-line, case-insensitive match of the header
/// (dropped). While inside, a line continues the block only when its
/// trimmed form is non-empty and every character is a hex digit or a
/// space. A line of only whitespace therefore ENDS the block here, even
/// though the generic cleaner treats blanks as block continuation; the
/// underlying dump formats genuinely differ on this and both behaviours
/// are load-bearing. The terminating line is emitted.
pub fn clean_power_variant(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = PowerState::Normal;

    for raw in text.split_inclusive('\n') {
        if state == PowerState::InHexBlock {
            let trimmed = raw.trim();
            if !trimmed.is_empty() && is_hex_and_spaces(trimmed) {
                continue;
            }
            state = PowerState::Normal;
        }
        if raw.trim().eq_ignore_ascii_case(constants::POWER_HEX_HEADER) {
            state = PowerState::InHexBlock;
            continue;
        }
        out.push_str(raw);
    }

    out
}

/// True when every character of the trimmed line is a hex digit or space.
fn is_hex_and_spaces(trimmed: &str) -> bool {
    trimmed
        .bytes()
        .all(|b| b.is_ascii_hexdigit() || b == b' ')
}

// =============================================================================
// Event-log cleaner
// =============================================================================

/// Remove Log Hex Dump sections from a hardware event log and collapse
/// runs of blank lines.
///
/// Once a line whose trimmed content starts with "Log Hex Dump" is seen
/// (the line itself is dropped), 8-hex-digit-prefixed dump rows are
/// dropped until the first blank line, which is consumed without being
/// emitted. Any other line ends the dump section and is handled by the
/// normal path. Outside dump sections, consecutive blank lines collapse
/// to one. Output is normalised to `\n` terminators and ends with exactly
/// one; input with no surviving content yields an empty string rather
/// than a manufactured terminator.
pub fn clean_event_log(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_dump = false;
    let mut last_blank = false;

    for line in text.lines() {
        if in_dump {
            if is_dump_row(line) {
                continue;
            }
            in_dump = false;
            if line.trim().is_empty() {
                // The terminating blank belongs to the dump section.
                continue;
            }
        }
        if line.trim_start().starts_with(constants::EVENT_HEX_DUMP_PREFIX) {
            in_dump = true;
            continue;
        }
        if line.trim().is_empty() {
            if last_blank {
                continue;
            }
            kept.push("");
            last_blank = true;
        } else {
            kept.push(line);
            last_blank = false;
        }
    }

    // A dangling collapsed blank at the end would produce a double
    // terminator below.
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }

    if kept.is_empty() {
        return String::new();
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}

/// True for dump rows: 8 hex digits followed by whitespace at line start.
fn is_dump_row(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > 8
        && bytes[..8].iter().all(u8::is_ascii_hexdigit)
        && bytes[8].is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Generic errpt-style cleaner
    // -------------------------------------------------------------------------

    #[test]
    fn test_generic_strips_detail_data_block() {
        let text = "Detail Data\n0000\nABCD\nreal line\n";
        assert_eq!(clean_generic(text), "real line\n");
    }

    #[test]
    fn test_generic_strips_sense_data_block() {
        let text = "header\nSENSE DATA\n0600 0000 0200\nfooter\n";
        // "0600 0000 0200" is all 4-digit hex tokens and is dropped.
        assert_eq!(clean_generic(text), "header\nfooter\n");
    }

    #[test]
    fn test_generic_header_match_is_case_insensitive_and_trimmed() {
        let text = "  detail data  \n0000\nafter\n";
        assert_eq!(clean_generic(text), "after\n");
    }

    #[test]
    fn test_generic_blank_lines_continue_the_block() {
        let text = "Detail Data\n0000\n\n1111\nresume\n";
        assert_eq!(clean_generic(text), "resume\n");
    }

    #[test]
    fn test_generic_non_hex_token_ends_block_and_is_emitted() {
        // "0000 wide" has a non-hex token, so it terminates the skip and
        // survives verbatim.
        let text = "Detail Data\n0000 wide\n";
        assert_eq!(clean_generic(text), "0000 wide\n");
    }

    #[test]
    fn test_generic_five_digit_token_is_not_a_hex_row() {
        let text = "Detail Data\n00000\n";
        assert_eq!(clean_generic(text), "00000\n");
    }

    #[test]
    fn test_generic_passes_unrelated_text_through_unchanged() {
        let text = "LABEL: DISK_ERR4\nDate/Time: Mon Jul  4\n\n0000 here is fine\n";
        assert_eq!(clean_generic(text), text);
    }

    #[test]
    fn test_generic_back_to_back_blocks() {
        // A header terminating a skip run opens the next block instead of
        // leaking into the output.
        let text = "Detail Data\n0000\nSense Data\n1111\nreal\n";
        assert_eq!(clean_generic(text), "real\n");
    }

    #[test]
    fn test_generic_idempotent() {
        let text = "start\nDetail Data\n0000 ffff\n\nmiddle\nSENSE DATA\nabcd\nend\n";
        let once = clean_generic(text);
        assert_eq!(clean_generic(&once), once);
    }

    #[test]
    fn test_generic_eof_while_skipping_is_not_an_error() {
        let text = "keep\nDetail Data\n0000\n1111";
        assert_eq!(clean_generic(text), "keep\n");
    }

    #[test]
    fn test_generic_preserves_crlf_and_missing_final_newline() {
        let text = "one\r\nDetail Data\r\n0000\r\ntwo";
        assert_eq!(clean_generic(text), "one\r\ntwo");
    }

    #[test]
    fn test_generic_every_output_line_is_verbatim_input() {
        let text = "a\nDetail Data\n0000\nb\nc\n";
        let cleaned = clean_generic(text);
        let input_lines: Vec<&str> = text.lines().collect();
        for line in cleaned.lines() {
            assert!(input_lines.contains(&line), "line {line:?} not in input");
        }
    }

    // -------------------------------------------------------------------------
    // Power-variant cleaner
    // -------------------------------------------------------------------------

    #[test]
    fn test_power_strips_hex_block() {
        let text = "ADDITIONAL HEX DATA\n0a0b 0c0d\nEnd\n";
        assert_eq!(clean_power_variant(text), "End\n");
    }

    #[test]
    fn test_power_header_case_insensitive() {
        let text = "Additional Hex Data\ndeadbeef cafe\nrest\n";
        assert_eq!(clean_power_variant(text), "rest\n");
    }

    #[test]
    fn test_power_eight_digit_groups_continue_block() {
        // Power rows use 8-digit grouping that the generic cleaner's
        // 4-digit token rule would emit.
        let text = "ADDITIONAL HEX DATA\n00000000 4b270000 12345678\nafter\n";
        assert_eq!(clean_power_variant(text), "after\n");
    }

    #[test]
    fn test_power_whitespace_only_line_ends_block() {
        // Asymmetry with the generic cleaner: a blank trimmed line is
        // excluded from the hex test and terminates the block.
        let text = "ADDITIONAL HEX DATA\nabcd ef01\n   \nabcd\n";
        assert_eq!(clean_power_variant(text), "   \nabcd\n");
    }

    #[test]
    fn test_power_non_hex_character_ends_block_and_line_is_emitted() {
        let text = "ADDITIONAL HEX DATA\n0a0b\nSRC: B7006970\n";
        assert_eq!(clean_power_variant(text), "SRC: B7006970\n");
    }

    #[test]
    fn test_power_header_must_be_whole_line() {
        let text = "ADDITIONAL HEX DATA FOLLOWS\n0a0b\n";
        assert_eq!(clean_power_variant(text), text);
    }

    #[test]
    fn test_power_passes_text_without_header_through() {
        let text = "just\nsome lines\n0a0b 0c0d\n";
        assert_eq!(clean_power_variant(text), text);
    }

    // -------------------------------------------------------------------------
    // Event-log cleaner
    // -------------------------------------------------------------------------

    #[test]
    fn test_event_strips_hex_dump_and_terminating_blank() {
        let text = "Log Hex Dump\n00000000 ff\n\nnext\n";
        assert_eq!(clean_event_log(text), "next\n");
    }

    #[test]
    fn test_event_dump_rows_require_8_hex_prefix() {
        // A row without the 8-hex-digit prefix ends the section and is
        // emitted through the normal path.
        let text = "Log Hex Dump\n00000000 ffeeddcc\nEvent ID: 42\n";
        assert_eq!(clean_event_log(text), "Event ID: 42\n");
    }

    #[test]
    fn test_event_trigger_line_is_dropped() {
        let text = "before\nLog Hex Dump follows below\nafter\n";
        assert_eq!(clean_event_log(text), "before\nafter\n");
    }

    #[test]
    fn test_event_collapses_consecutive_blank_lines() {
        let text = "a\n\n\n\nb\n";
        assert_eq!(clean_event_log(text), "a\n\nb\n");
    }

    #[test]
    fn test_event_single_blank_lines_survive() {
        let text = "a\n\nb\n";
        assert_eq!(clean_event_log(text), "a\n\nb\n");
    }

    #[test]
    fn test_event_output_ends_with_single_terminator() {
        assert_eq!(clean_event_log("a"), "a\n");
        assert_eq!(clean_event_log("a\n\n\n"), "a\n");
    }

    #[test]
    fn test_event_no_surviving_content_yields_empty_string() {
        assert_eq!(clean_event_log(""), "");
        assert_eq!(clean_event_log("\n\n\n"), "");
        assert_eq!(clean_event_log("Log Hex Dump\n00000000 aa\n\n"), "");
    }

    #[test]
    fn test_event_multiple_dump_sections() {
        let text = "one\nLog Hex Dump\n00000000 aa\n\ntwo\nLog Hex Dump\nffffffff bb\n\nthree\n";
        assert_eq!(clean_event_log(text), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_event_blank_collapse_resets_after_content() {
        let text = "a\n\nb\n\nc\n";
        assert_eq!(clean_event_log(text), "a\n\nb\n\nc\n");
    }
}
