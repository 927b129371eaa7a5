//! PGN record parser
//!
//! Turns the raw text of a repertoire file into [`ParsedSequence`]s: the
//! verbose moves reported by the rules engine, the raw annotated tokens of
//! the movetext, and the header tags.
//!
//! # Record Format
//!
//! ```text
//! [Event "Italian Game"]
//! [OpeningNote "Aim for an early d4 break."]
//! [TargetCompletions "3"]
//!
//! 1. e4 e5 2. Nf3 Nc6 3. Bc4!? *
//! ```
//!
//! Records are separated by a blank line followed by `[Event`. Only the
//! standard starting position is supported.
//!
//! # Two Tokenizations
//!
//! The moves are replayed from a tolerant tokenization (comments,
//! variations, NAGs and move-number prefixes such as `12.e4` are removed).
//! The annotated tokens come from a plain whitespace split that only drops
//! move numbers, single-token `{...}` comments and results. When a record
//! uses constructs the plain split cannot see through, the two counts differ
//! and the loader falls back to the engine notation for display.

use chess_rules::{PlayedMove, RulesEngine, ShakmatyRules};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

static HEADER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\[(\w+)\s+"(.*?)"\]\s*$"#).expect("header tag pattern is valid")
});

static MOVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.$").expect("move number pattern is valid"));

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// One game record of a repertoire file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSequence {
    /// Moves as applied by the rules engine, in order
    pub moves: Vec<PlayedMove>,
    /// Movetext tokens as written, including annotation glyphs
    pub annotated_tokens: Vec<String>,
    /// `[Key "value"]` header tags
    pub headers: BTreeMap<String, String>,
}

/// Parse every record in `text`
///
/// Records whose moves cannot be replayed yield an empty move list; the
/// loader decides whether anything usable remains.
pub fn parse(text: &str) -> Vec<ParsedSequence> {
    split_records(text)
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

/// Split a multi-record text on a blank line followed by `[Event`
pub fn split_records(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut records = Vec::new();
    let mut start = 0;
    for (index, _) in normalized.match_indices("\n\n[Event") {
        records.push(normalized[start..index].to_string());
        start = index + 2;
    }
    records.push(normalized[start..].to_string());

    records
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

/// Extract `[Key "value"]` tags
pub fn parse_headers(record: &str) -> BTreeMap<String, String> {
    record
        .lines()
        .filter_map(|line| HEADER_TAG.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Movetext of a record: everything that is not a header line
pub fn movetext(record: &str) -> String {
    record
        .lines()
        .filter(|line| !line.trim_start().starts_with('['))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whitespace tokens of the movetext, keeping annotation glyphs
pub fn annotated_tokens(movetext: &str) -> Vec<String> {
    movetext
        .split_whitespace()
        .filter(|token| !MOVE_NUMBER.is_match(token))
        .filter(|token| !(token.starts_with('{') && token.ends_with('}')))
        .filter(|token| !RESULT_TOKENS.contains(token))
        .map(str::to_string)
        .collect()
}

/// SAN tokens suitable for replay on the rules engine
fn san_tokens(movetext: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(movetext.len());
    let mut in_comment = false;
    let mut in_line_comment = false;
    let mut variation_depth = 0usize;

    for c in movetext.chars() {
        match c {
            '\n' if in_line_comment => {
                in_line_comment = false;
                cleaned.push(' ');
            }
            _ if in_line_comment => {}
            '}' if in_comment => {
                in_comment = false;
                cleaned.push(' ');
            }
            _ if in_comment => {}
            '{' => in_comment = true,
            ';' => in_line_comment = true,
            '(' => variation_depth += 1,
            ')' => {
                variation_depth = variation_depth.saturating_sub(1);
                cleaned.push(' ');
            }
            _ if variation_depth > 0 => {}
            _ => cleaned.push(c),
        }
    }

    let mut tokens = Vec::new();
    for token in cleaned.split_whitespace() {
        if RESULT_TOKENS.contains(&token) {
            break;
        }
        if token.starts_with('$') {
            continue;
        }
        let without_number = token.trim_start_matches(|c: char| c.is_ascii_digit());
        let san = if without_number.len() != token.len() && without_number.starts_with('.') {
            without_number.trim_start_matches('.')
        } else {
            token
        };
        let san = san.trim_end_matches(['!', '?']);
        if !san.is_empty() {
            tokens.push(san.to_string());
        }
    }
    tokens
}

fn parse_record(index: usize, record: String) -> ParsedSequence {
    let headers = parse_headers(&record);
    let text = movetext(&record);
    let annotated = annotated_tokens(&text);

    let mut rules = ShakmatyRules::new();
    let mut moves = Vec::new();
    for token in san_tokens(&text) {
        match rules.apply_san(&token) {
            Ok(played) => moves.push(played),
            Err(e) => {
                warn!("[PGN] Record {}: {}. Discarding its moves.", index, e);
                moves.clear();
                break;
            }
        }
    }

    debug!(
        "[PGN] Record {}: {} move(s), {} annotated token(s), {} header(s)",
        index,
        moves.len(),
        annotated.len(),
        headers.len()
    );

    ParsedSequence {
        moves,
        annotated_tokens: annotated,
        headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "[Event \"Open\"]\n[OpeningNote \"Central control\"]\n[TargetCompletions \"3\"]\n\n1. e4 e5 2. Nf3! Nc6 *\n\n[Event \"Closed\"]\n\n1. d4 d5 2. c4 *\n";

    #[test]
    fn test_split_records_on_event_boundary() {
        //! Two records separated by a blank line and `[Event` are split apart
        let records = split_records(TWO_RECORDS);
        assert_eq!(records.len(), 2);
        assert!(records[1].starts_with("[Event \"Closed\"]"));
    }

    #[test]
    fn test_parse_headers() {
        //! Header tags are read as key/value pairs
        let headers = parse_headers(&split_records(TWO_RECORDS)[0]);
        assert_eq!(headers.get("OpeningNote").map(String::as_str), Some("Central control"));
        assert_eq!(headers.get("TargetCompletions").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_parse_replays_moves_and_keeps_annotations() {
        //! Moves come from the engine, tokens keep their glyphs
        let parsed = parse(TWO_RECORDS);

        assert_eq!(parsed.len(), 2);
        let sans: Vec<_> = parsed[0].moves.iter().map(|m| m.san.as_str()).collect();
        assert_eq!(sans, vec!["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(parsed[0].annotated_tokens, vec!["e4", "e5", "Nf3!", "Nc6"]);
        assert_eq!(parsed[1].moves.len(), 3);
    }

    #[test]
    fn test_comments_and_attached_numbers() {
        //! Multi-word comments and `1.e4` style numbering still replay correctly
        let parsed = parse("[Event \"x\"]\n\n1.e4 {the king's pawn} e5 2.Nf3 $1 (2.f4 exf4) Nc6 *");
        let sans: Vec<_> = parsed[0].moves.iter().map(|m| m.san.as_str()).collect();

        assert_eq!(sans, vec!["e4", "e5", "Nf3", "Nc6"]);
        assert_ne!(
            parsed[0].annotated_tokens.len(),
            parsed[0].moves.len(),
            "Plain tokenization cannot see through the comment"
        );
    }

    #[test]
    fn test_unplayable_record_yields_no_moves() {
        //! An illegal move discards the whole record
        let parsed = parse("[Event \"bad\"]\n\n1. e4 e5 2. Ke3 *");
        assert!(parsed[0].moves.is_empty());
    }

    #[test]
    fn test_check_suffix_in_source_is_accepted() {
        //! Source notation with '+' replays and matches the engine's SAN
        let parsed = parse("[Event \"x\"]\n\n1. e4 f5 2. Qh5+ g6 *");
        assert_eq!(parsed[0].moves[2].san, "Qh5+");
        assert_eq!(parsed[0].annotated_tokens[2], "Qh5+");
    }
}
