//! Line breaking and pagination.
//!
//! A book is described as a flat list of [`Flowable`]s (paragraphs, vertical space, page
//! breaks, bookmarks) which [`layout`] pours into fixed-size pages, top to bottom. The
//! result is a list of positioned text spans per page, in PDF coordinates (origin at the
//! bottom left, y growing upwards).

/// Font measurements needed for layout.
pub trait Metrics {
    /// Width of `text` in points when set at `size` points.
    fn width_of_text(&self, text: &str, size: f32) -> f32;
    /// Distance from the top of a line to its baseline at `size` points.
    fn ascent(&self, size: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Centre,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { text: String, style: ParagraphStyle },
    Spacer(f32),
    PageBreak,
    /// Marks the page the next paragraph starts on
    Bookmark(String),
}

/// A run of text placed on a page; `(x, y)` is the start of its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub spans: Vec<Span>,
}

/// The printable area of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Frame {
    /// The frame left on a `(width, height)` page by equal margins on every side.
    pub fn with_margin(page_size: (f32, f32), margin: f32) -> Frame {
        Frame {
            x1: margin,
            y1: margin,
            x2: page_size.0 - margin,
            y2: page_size.1 - margin,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
    /// Bookmark titles with the index of the page they point at
    pub bookmarks: Vec<(String, usize)>,
}

impl DocumentLayout {
    /// Append the pages of `other`, shifting its bookmarks accordingly.
    pub fn append(&mut self, other: DocumentLayout) {
        let offset = self.pages.len();
        self.pages.extend(other.pages);
        self.bookmarks.extend(
            other
                .bookmarks
                .into_iter()
                .map(|(title, page)| (title, page + offset)),
        );
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Lines break at whitespace; `\n` always starts a new line. Words wider than a whole line
/// are broken between characters.
pub fn wrap_text<M: Metrics + ?Sized>(
    text: &str,
    size: f32,
    max_width: f32,
    metrics: &M,
) -> Vec<String> {
    let space = metrics.width_of_text(" ", size);
    let mut lines: Vec<String> = Vec::default();

    for hard_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in hard_line.split_whitespace() {
            let word_width = metrics.width_of_text(word, size);
            if !current.is_empty() && current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let mut buf = [0u8; 4];
                let c_width = metrics.width_of_text(c.encode_utf8(&mut buf), size);
                if !current.is_empty() && current_width + c_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

struct Layouter<'m, M: Metrics + ?Sized> {
    metrics: &'m M,
    page_size: (f32, f32),
    frame: Frame,
    pages: Vec<PageLayout>,
    bookmarks: Vec<(String, usize)>,
    pending_bookmarks: Vec<String>,
    page_open: bool,
    y: f32,
}

impl<M: Metrics + ?Sized> Layouter<'_, M> {
    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.page_open = true;
        self.y = self.frame.y2;
    }

    fn at_top(&self) -> bool {
        self.y >= self.frame.y2
    }

    fn paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        let lines = wrap_text(text, style.size, self.frame.width(), self.metrics);
        if lines.is_empty() {
            return;
        }

        if self.page_open && !self.at_top() {
            self.y -= style.space_before;
        }

        let ascent = self.metrics.ascent(style.size);
        for line in lines {
            if !self.page_open || self.y - style.leading < self.frame.y1 {
                self.new_page();
            }
            for title in self.pending_bookmarks.drain(..) {
                self.bookmarks.push((title, self.pages.len() - 1));
            }

            let x = match style.align {
                Align::Left => self.frame.x1,
                Align::Centre => {
                    let width = self.metrics.width_of_text(&line, style.size);
                    self.frame.x1 + (self.frame.width() - width).max(0.0) / 2.0
                }
            };
            let y = self.y - ascent;
            if let Some(page) = self.pages.last_mut() {
                page.spans.push(Span {
                    text: line,
                    x,
                    y,
                    size: style.size,
                });
            }
            self.y -= style.leading;
        }

        self.y -= style.space_after;
    }

    fn spacer(&mut self, height: f32) {
        if !self.page_open {
            return;
        }
        self.y -= height;
        if self.y < self.frame.y1 {
            self.page_open = false;
        }
    }

    fn finish(mut self) -> DocumentLayout {
        if self.pages.is_empty() {
            self.new_page();
        }
        let last = self.pages.len() - 1;
        for title in self.pending_bookmarks.drain(..) {
            self.bookmarks.push((title, last));
        }
        log::debug!(
            "laid out {} page(s) of {}x{}pt",
            self.pages.len(),
            self.page_size.0,
            self.page_size.1
        );
        DocumentLayout {
            pages: self.pages,
            bookmarks: self.bookmarks,
        }
    }
}

/// Pour `flowables` into pages of `page_size` points whose printable area is `frame`.
///
/// Space before a paragraph is dropped at the top of a page, and a page break on an empty
/// page does nothing, so no blank pages are produced. The result always has at least one
/// page.
pub fn layout<M: Metrics + ?Sized>(
    flowables: &[Flowable],
    page_size: (f32, f32),
    frame: Frame,
    metrics: &M,
) -> DocumentLayout {
    let mut layouter = Layouter {
        metrics,
        page_size,
        frame,
        pages: Vec::default(),
        bookmarks: Vec::default(),
        pending_bookmarks: Vec::default(),
        page_open: false,
        y: frame.y2,
    };

    for flowable in flowables {
        match flowable {
            Flowable::Paragraph { text, style } => layouter.paragraph(text, style),
            Flowable::Spacer(height) => layouter.spacer(*height),
            Flowable::PageBreak => layouter.page_open = false,
            Flowable::Bookmark(title) => layouter.pending_bookmarks.push(title.clone()),
        }
    }

    layouter.finish()
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Every character is `advance` ems wide.
    pub(crate) struct FixedMetrics {
        pub advance: f32,
    }

    impl Metrics for FixedMetrics {
        fn width_of_text(&self, text: &str, size: f32) -> f32 {
            text.chars().count() as f32 * self.advance * size
        }

        fn ascent(&self, size: f32) -> f32 {
            size * 0.75
        }
    }

    const METRICS: FixedMetrics = FixedMetrics { advance: 0.5 };

    fn style(size: f32, leading: f32) -> ParagraphStyle {
        ParagraphStyle {
            size,
            leading,
            space_before: 0.0,
            space_after: 0.0,
            align: Align::Left,
        }
    }

    fn paragraph(text: &str, style: ParagraphStyle) -> Flowable {
        Flowable::Paragraph {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn wraps_at_whitespace() {
        // 10pt text at 0.5em per char = 5pt per char; 30pt fits 6 chars
        let lines = wrap_text("aa bb cc dddd", 10.0, 30.0, &METRICS);
        assert_eq!(lines, vec!["aa bb", "cc", "dddd"]);
    }

    #[test]
    fn newlines_force_breaks() {
        let lines = wrap_text("Line one\nLine two", 10.0, 1000.0, &METRICS);
        assert_eq!(lines, vec!["Line one", "Line two"]);
    }

    #[test]
    fn long_words_break_between_characters() {
        let lines = wrap_text("abcdefghij", 10.0, 20.0, &METRICS);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("   \n  ", 10.0, 100.0, &METRICS).is_empty());
    }

    #[test]
    fn lines_flow_onto_new_pages() {
        // 100pt tall frame with 20pt leading holds 5 lines
        let frame = Frame {
            x1: 10.0,
            y1: 10.0,
            x2: 1000.0,
            y2: 110.0,
        };
        let text = (0..12).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        let doc = layout(
            &[paragraph(&text, style(10.0, 20.0))],
            (1010.0, 120.0),
            frame,
            &METRICS,
        );

        assert_eq!(doc.pages.len(), 3);
        assert_eq!(doc.pages[0].spans.len(), 5);
        assert_eq!(doc.pages[1].spans.len(), 5);
        assert_eq!(doc.pages[2].spans.len(), 2);
        assert_eq!(doc.pages[1].spans[0].text, "l5");
        assert_eq!(doc.pages[0].spans[0].y, 110.0 - 7.5);
        assert_eq!(doc.pages[0].spans[1].y, 90.0 - 7.5);
    }

    #[test]
    fn page_breaks_never_make_blank_pages() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let doc = layout(
            &[
                Flowable::PageBreak,
                paragraph("a", style(10.0, 12.0)),
                Flowable::PageBreak,
                Flowable::PageBreak,
                paragraph("b", style(10.0, 12.0)),
                Flowable::PageBreak,
            ],
            (200.0, 200.0),
            frame,
            &METRICS,
        );
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].spans[0].text, "b");
    }

    #[test]
    fn empty_document_has_one_page() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let doc = layout(&[], (200.0, 200.0), frame, &METRICS);
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].spans.is_empty());
    }

    #[test]
    fn space_before_is_dropped_at_the_top_of_a_page() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let spaced = ParagraphStyle {
            space_before: 50.0,
            ..style(10.0, 12.0)
        };
        let doc = layout(
            &[paragraph("a", spaced), paragraph("b", spaced)],
            (200.0, 200.0),
            frame,
            &METRICS,
        );
        let spans = &doc.pages[0].spans;
        assert_eq!(spans[0].y, 190.0 - 7.5);
        assert_eq!(spans[1].y, 190.0 - 12.0 - 50.0 - 7.5);
    }

    #[test]
    fn centred_paragraphs_are_centred() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let centred = ParagraphStyle {
            align: Align::Centre,
            ..style(10.0, 12.0)
        };
        let doc = layout(&[paragraph("abcd", centred)], (200.0, 200.0), frame, &METRICS);
        // frame is 180pt wide, text is 20pt wide
        assert_eq!(doc.pages[0].spans[0].x, 10.0 + 80.0);
    }

    #[test]
    fn bookmarks_point_at_the_page_of_the_next_paragraph() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let doc = layout(
            &[
                Flowable::Bookmark("Genesis".to_string()),
                paragraph("a", style(10.0, 12.0)),
                Flowable::PageBreak,
                Flowable::Bookmark("Exodo".to_string()),
                paragraph("b", style(10.0, 12.0)),
            ],
            (200.0, 200.0),
            frame,
            &METRICS,
        );
        assert_eq!(
            doc.bookmarks,
            vec![("Genesis".to_string(), 0), ("Exodo".to_string(), 1)]
        );
    }

    #[test]
    fn oversized_spacers_end_the_page() {
        let frame = Frame::with_margin((200.0, 200.0), 10.0);
        let doc = layout(
            &[
                paragraph("a", style(10.0, 12.0)),
                Flowable::Spacer(500.0),
                paragraph("b", style(10.0, 12.0)),
            ],
            (200.0, 200.0),
            frame,
            &METRICS,
        );
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].spans[0].y, 190.0 - 7.5);
    }

    #[test]
    fn can_append_layouts() {
        let mut front = DocumentLayout {
            pages: vec![PageLayout::default()],
            bookmarks: vec![],
        };
        let back = DocumentLayout {
            pages: vec![PageLayout::default(), PageLayout::default()],
            bookmarks: vec![("Juan".to_string(), 1)],
        };
        front.append(back);
        assert_eq!(front.pages.len(), 3);
        assert_eq!(front.bookmarks, vec![("Juan".to_string(), 2)]);
    }
}
