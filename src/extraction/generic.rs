use super::{expand_escapes, BookText, ExtractionStats, Segment, VerseRecord};
use regex::Regex;
use std::sync::LazyLock;

static RE_VERSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s").expect("valid verse number regex"));
static RE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("valid quoted text regex"));

/// Parse a `<verse> '<text>'` line. Lines without quoted text yield `None`.
pub fn parse_line(line: &str) -> Option<VerseRecord> {
    let line = line.trim();

    let (verse, rest) = match RE_VERSE_NUMBER.captures(line) {
        Some(captures) => (captures[1].parse().ok(), &line[captures[0].len()..]),
        None => (None, line),
    };

    let text = RE_QUOTED.captures(rest)?.get(1)?.as_str();
    Some(VerseRecord {
        verse,
        chapter: None,
        text: expand_escapes(text),
    })
}

pub fn extract(contents: &str) -> BookText {
    let mut stats = ExtractionStats::default();
    let mut verses: Vec<String> = Vec::default();

    for (i, line) in contents.lines().enumerate() {
        stats.lines += 1;
        match parse_line(line) {
            Some(record) => {
                stats.verses += 1;
                verses.push(record.text);
            }
            None => {
                if !line.trim().is_empty() {
                    stats.skipped += 1;
                    log::debug!("line {}: no quoted verse text in `{}`", i + 1, line.trim());
                }
                // the empty verse still takes its place in the joined text
                verses.push(String::new());
            }
        }
    }

    let text = verses.join(" ");
    let segments = if text.trim().is_empty() {
        Vec::default()
    } else {
        vec![Segment::Text(text)]
    };

    BookText { segments, stats }
}
