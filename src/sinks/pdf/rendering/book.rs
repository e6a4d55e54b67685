//! Book sections: a centred title followed by the verse text, one body paragraph per run
//! of text between chapter headings.

use crate::extraction::Segment;
use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::layout::{Align, Flowable, ParagraphStyle};
use crate::sinks::Book;

const TITLE_SPACE_AFTER: f32 = 30.0;
const TITLE_SPACER: f32 = 12.0;
const HEADING_SPACE_BEFORE: f32 = 10.0;
const HEADING_SPACE_AFTER: f32 = 6.0;
const BODY_SPACE_BEFORE: f32 = 6.0;
const BOOK_SPACER: f32 = 20.0;

pub fn title_style(config: &PDF) -> ParagraphStyle {
    ParagraphStyle {
        size: config.font_size_title_pt,
        leading: config.font_size_title_pt * 1.2,
        space_before: 0.0,
        space_after: TITLE_SPACE_AFTER,
        align: Align::Centre,
    }
}

fn heading_style(config: &PDF) -> ParagraphStyle {
    ParagraphStyle {
        size: config.font_size_heading_pt,
        leading: config.font_size_heading_pt * 1.2,
        space_before: HEADING_SPACE_BEFORE,
        space_after: HEADING_SPACE_AFTER,
        align: Align::Left,
    }
}

fn body_style(config: &PDF) -> ParagraphStyle {
    ParagraphStyle {
        size: config.font_size_body_pt,
        leading: config.leading_body_pt,
        space_before: BODY_SPACE_BEFORE,
        space_after: 0.0,
        align: Align::Left,
    }
}

/// The flowables of one book, ending with a page break.
pub fn flowables(config: &PDF, book: &Book) -> Vec<Flowable> {
    let mut flowables = vec![
        Flowable::Bookmark(book.title.clone()),
        Flowable::Paragraph {
            text: book.title.clone(),
            style: title_style(config),
        },
        Flowable::Spacer(TITLE_SPACER),
    ];

    for segment in book.text.segments.iter() {
        match segment {
            Segment::Chapter(n) => flowables.push(Flowable::Paragraph {
                text: n.to_string(),
                style: heading_style(config),
            }),
            Segment::Text(text) if !text.trim().is_empty() => {
                flowables.push(Flowable::Paragraph {
                    text: text.trim().to_string(),
                    style: body_style(config),
                })
            }
            Segment::Text(_) => {}
        }
    }

    flowables.push(Flowable::Spacer(BOOK_SPACER));
    flowables.push(Flowable::PageBreak);
    flowables
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extraction::{BookText, ExtractionStats};

    fn book(segments: Vec<Segment>) -> Book {
        Book {
            title: "Salmos".to_string(),
            text: BookText {
                segments,
                stats: ExtractionStats::default(),
            },
        }
    }

    #[test]
    fn book_starts_with_bookmark_and_title() {
        let config = PDF::default();
        let flowables = flowables(&config, &book(vec![]));
        assert_eq!(flowables[0], Flowable::Bookmark("Salmos".to_string()));
        match &flowables[1] {
            Flowable::Paragraph { text, style } => {
                assert_eq!(text, "Salmos");
                assert_eq!(style.size, 24.0);
                assert_eq!(style.align, Align::Centre);
                assert_eq!(style.space_after, 30.0);
            }
            other => panic!("expected title paragraph, got {other:?}"),
        }
        assert_eq!(flowables[2], Flowable::Spacer(12.0));
        assert_eq!(
            &flowables[flowables.len() - 2..],
            &[Flowable::Spacer(20.0), Flowable::PageBreak]
        );
    }

    #[test]
    fn chapters_become_headings_and_text_becomes_body() {
        let config = PDF::default();
        let flowables = flowables(
            &config,
            &book(vec![
                Segment::Text(" a b ".to_string()),
                Segment::Chapter(2),
                Segment::Text("c".to_string()),
            ]),
        );
        let body = &flowables[3..flowables.len() - 2];
        assert_eq!(
            body,
            &[
                Flowable::Paragraph {
                    text: "a b".to_string(),
                    style: body_style(&config),
                },
                Flowable::Paragraph {
                    text: "2".to_string(),
                    style: heading_style(&config),
                },
                Flowable::Paragraph {
                    text: "c".to_string(),
                    style: body_style(&config),
                },
            ]
        );
        assert_eq!(heading_style(&config).size, 14.0);
        assert_eq!(body_style(&config).leading, 16.0);
    }

    #[test]
    fn blank_text_is_skipped() {
        let config = PDF::default();
        let flowables = flowables(&config, &book(vec![Segment::Text("   ".to_string())]));
        assert_eq!(flowables.len(), 5);
    }
}
