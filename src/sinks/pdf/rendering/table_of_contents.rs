//! Table of contents listing the first page of every book.
//!
//! Page numbers refer to the final document, which starts with the contents pages
//! themselves, so the listing is laid out repeatedly until its own page count settles.

use super::book::title_style;
use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::layout::{
    self, Align, DocumentLayout, Flowable, Frame, Metrics, ParagraphStyle,
};

pub const HEADING: &str = "Tabla de Contenido";

const ENTRY_SIZE: f32 = 14.0;
const ENTRY_LEADING: f32 = 20.0;

fn entry_style() -> ParagraphStyle {
    ParagraphStyle {
        size: ENTRY_SIZE,
        leading: ENTRY_LEADING,
        space_before: 0.0,
        space_after: 0.0,
        align: Align::Left,
    }
}

fn flowables(config: &PDF, books: &[(String, usize)], offset: usize) -> Vec<Flowable> {
    let mut flowables = vec![
        Flowable::Bookmark(HEADING.to_string()),
        Flowable::Paragraph {
            text: HEADING.to_string(),
            style: title_style(config),
        },
    ];
    flowables.extend(books.iter().map(|(title, page)| Flowable::Paragraph {
        text: format!("{title} - Página {}", page + offset + 1),
        style: entry_style(),
    }));
    flowables
}

/// Lay out the contents pages for `books`, given as titles with the index of their first
/// page in the body of the document.
pub fn render<M: Metrics + ?Sized>(
    config: &PDF,
    books: &[(String, usize)],
    frame: Frame,
    metrics: &M,
) -> DocumentLayout {
    let mut toc_pages = 1;
    loop {
        let toc = layout::layout(
            &flowables(config, books, toc_pages),
            config.page_size(),
            frame,
            metrics,
        );
        if toc.pages.len() == toc_pages {
            return toc;
        }
        log::debug!(
            "table of contents needs {} page(s), not {toc_pages}",
            toc.pages.len()
        );
        toc_pages = toc.pages.len();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::pdf::layout::test::FixedMetrics;

    const METRICS: FixedMetrics = FixedMetrics { advance: 0.5 };

    fn texts(toc: &DocumentLayout) -> Vec<String> {
        toc.pages
            .iter()
            .flat_map(|page| page.spans.iter().map(|span| span.text.clone()))
            .collect()
    }

    #[test]
    fn lists_books_with_final_page_numbers() {
        let config = PDF::default();
        let frame = Frame::with_margin(config.page_size(), config.margin());
        let books = vec![("Genesis".to_string(), 0), ("Exodo".to_string(), 3)];
        let toc = render(&config, &books, frame, &METRICS);

        assert_eq!(toc.pages.len(), 1);
        assert_eq!(
            texts(&toc),
            vec![
                "Tabla de Contenido".to_string(),
                "Genesis - Página 2".to_string(),
                "Exodo - Página 5".to_string(),
            ]
        );
        assert_eq!(toc.bookmarks, vec![(HEADING.to_string(), 0)]);
    }

    #[test]
    fn page_numbers_account_for_a_multi_page_listing() {
        let config = PDF::default();
        let frame = Frame::with_margin(config.page_size(), config.margin());
        // 29 entries fit under the heading on the first page
        let books: Vec<(String, usize)> = (0..40).map(|i| (format!("Libro {i}"), i)).collect();
        let toc = render(&config, &books, frame, &METRICS);

        assert_eq!(toc.pages.len(), 2);
        let texts = texts(&toc);
        assert_eq!(texts[1], "Libro 0 - Página 3");
        assert_eq!(texts[40], "Libro 39 - Página 42");
        assert_eq!(toc.pages[0].spans.len(), 30);
    }
}
