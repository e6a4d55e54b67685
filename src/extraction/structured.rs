use super::{expand_escapes, BookText, ExtractionStats, Segment, VerseRecord};
use regex::Regex;
use std::sync::LazyLock;

static RE_TUPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((\d+),\s*(\d+),\s*(\d+),\s*'([^']+)'\)").expect("valid verse tuple regex")
});

/// Parse a `(<book>, <chapter>, <verse>, '<text>')` line.
pub fn parse_line(line: &str) -> Option<VerseRecord> {
    let captures = RE_TUPLE.captures(line.trim())?;
    Some(VerseRecord {
        chapter: Some(captures[2].parse().ok()?),
        verse: captures[3].parse().ok(),
        text: expand_escapes(&captures[4]),
    })
}

pub fn extract(contents: &str) -> BookText {
    let mut stats = ExtractionStats::default();
    let mut segments: Vec<Segment> = Vec::default();
    let mut run: Vec<String> = Vec::default();
    let mut current_chapter: Option<u32> = None;

    for (i, line) in contents.lines().enumerate() {
        stats.lines += 1;
        let Some(record) = parse_line(line) else {
            if !line.trim().is_empty() {
                stats.skipped += 1;
                log::debug!("line {}: not a verse tuple: `{}`", i + 1, line.trim());
            }
            continue;
        };
        stats.verses += 1;

        if let Some(chapter) = record.chapter {
            if current_chapter.is_some_and(|current| current != chapter) {
                flush(&mut run, &mut segments);
                segments.push(Segment::Chapter(chapter));
            }
            current_chapter = Some(chapter);
        }

        run.push(record.text);
    }
    flush(&mut run, &mut segments);

    BookText { segments, stats }
}

fn flush(run: &mut Vec<String>, segments: &mut Vec<Segment>) {
    if !run.is_empty() {
        segments.push(Segment::Text(run.join(" ")));
        run.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_tuple_line() {
        let record = parse_line("  (19, 23, 1, 'Jehová es mi pastor; nada me faltará.')")
            .expect("line parses");
        assert_eq!(record.chapter, Some(23));
        assert_eq!(record.verse, Some(1));
        assert_eq!(record.text, "Jehová es mi pastor; nada me faltará.");
    }

    #[test]
    fn tolerates_missing_spaces_and_trailing_text() {
        let record = parse_line("(19,2,3,'x'),").expect("line parses");
        assert_eq!(record.chapter, Some(2));
        assert_eq!(record.text, "x");
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_line("1 'generic'"), None);
        assert_eq!(parse_line("(19, 1, 'missing verse')"), None);
        assert_eq!(parse_line("(19, 1, 1, '')"), None);
        assert_eq!(parse_line("x (19, 1, 1, 'not at start')"), None);
    }

    #[test]
    fn emits_one_marker_per_chapter_change() {
        let text = extract("(19, 1, 1, 'a')\n(19, 1, 2, 'b')\n(19, 2, 1, 'c')\n");
        assert_eq!(
            text.segments,
            vec![
                Segment::Text("a b".to_string()),
                Segment::Chapter(2),
                Segment::Text("c".to_string()),
            ]
        );
    }

    #[test]
    fn first_chapter_gets_no_marker() {
        let text = extract("(19, 1, 1, 'a')\n");
        assert_eq!(text.segments, vec![Segment::Text("a".to_string())]);
        assert_eq!(text.chapters().count(), 0);

        // a corpus starting at chapter 0 behaves the same
        let text = extract("(19, 0, 1, 'a')\n(19, 1, 1, 'b')\n");
        assert_eq!(
            text.segments,
            vec![
                Segment::Text("a".to_string()),
                Segment::Chapter(1),
                Segment::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn returning_to_a_chapter_is_a_change() {
        let text = extract("(19, 1, 1, 'a')\n(19, 2, 1, 'b')\n(19, 1, 2, 'c')\n");
        assert_eq!(text.chapters().collect::<Vec<u32>>(), vec![2, 1]);
    }

    #[test]
    fn skips_and_counts_malformed_lines() {
        let text = extract("(19, 1, 1, 'a')\nnot a tuple\n\n(19, 2, 1, 'b')\n");
        assert_eq!(
            text.segments,
            vec![
                Segment::Text("a".to_string()),
                Segment::Chapter(2),
                Segment::Text("b".to_string()),
            ]
        );
        assert_eq!(text.stats.lines, 4);
        assert_eq!(text.stats.verses, 2);
        assert_eq!(text.stats.skipped, 1);
    }

    #[test]
    fn expands_escaped_newlines() {
        let text = extract(r"(19, 1, 1, 'one\ntwo')");
        assert_eq!(text.segments, vec![Segment::Text("one\ntwo".to_string())]);
    }

    #[test]
    fn no_verses_are_lost_for_well_formed_input() {
        let mut contents = String::new();
        for chapter in 1..=5 {
            for verse in 1..=10 {
                contents.push_str(&format!("(19, {chapter}, {verse}, 'c{chapter}v{verse}')\n"));
            }
        }
        let text = extract(&contents);
        assert_eq!(text.stats.verses, 50);
        assert_eq!(text.stats.skipped, 0);
        assert_eq!(text.chapters().collect::<Vec<u32>>(), vec![2, 3, 4, 5]);
        let plain = text.plain_text();
        for chapter in 1..=5 {
            for verse in 1..=10 {
                assert!(plain.contains(&format!("c{chapter}v{verse}")));
            }
        }
    }
}
