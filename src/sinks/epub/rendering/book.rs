//! Book document rendering for EPUB.

use crate::extraction::{BookText, Segment};
use crate::sinks::Book;
use std::collections::HashSet;

/// Render a book as a complete XHTML document.
pub fn render(book: &Book, language: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
<head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="stylesheet.css"/>
</head>
<body>
<h1>{title}</h1><p>{body}</p>
</body>
</html>"#,
        lang = html_escape::encode_double_quoted_attribute(language),
        title = html_escape::encode_text(&book.title),
        body = body_html(&book.text),
    )
}

/// The paragraph content of a book: escaped verse text, with `<br/>` and the chapter
/// number where each chapter starts.
pub fn body_html(text: &BookText) -> String {
    text.segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => html_escape::encode_text(text).replace('\n', "<br/>"),
            Segment::Chapter(n) => format!("<br/>{n}"),
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Pick the document file name for a book title, `1 Reyes` becoming `1_reyes.xhtml`.
///
/// Names already in `used` get a numeric suffix so no document replaces another.
pub fn document_name(title: &str, used: &mut HashSet<String>) -> String {
    let stem = title.to_lowercase().replace(' ', "_");
    let mut name = format!("{stem}.xhtml");
    let mut n = 2;
    while used.contains(&name) {
        name = format!("{stem}_{n}.xhtml");
        n += 1;
    }
    used.insert(name.clone());
    name
}
