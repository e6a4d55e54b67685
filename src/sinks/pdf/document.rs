//! Serialisation of laid-out pages with `pdf-writer`.
//!
//! The font is embedded once as a simple TrueType font using WinAnsiEncoding; every span
//! on every page refers to it as `/F1`. Nothing time-dependent is written, so the same
//! layout always produces the same bytes.

use super::encoding;
use super::fonts::LoadedFont;
use super::layout::DocumentLayout;
use owned_ttf_parser::AsFaceRef;
use pdf_writer::types::FontFlags;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const FONT_RESOURCE: Name<'static> = Name(b"F1");

/// Document information dictionary contents.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub title: String,
    pub author: String,
    pub creator: String,
}

/// Write `layout` as a PDF with pages of `page_size` points.
pub fn write(
    layout: &DocumentLayout,
    font: &LoadedFont,
    info: &Info,
    page_size: (f32, f32),
) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_id = alloc.bump();
    let descriptor_id = alloc.bump();
    let font_file_id = alloc.bump();

    let page_ids: Vec<Ref> = layout.pages.iter().map(|_| alloc.bump()).collect();
    let content_ids: Vec<Ref> = layout.pages.iter().map(|_| alloc.bump()).collect();

    let mut pdf = Pdf::new();

    let outline_id = if layout.bookmarks.is_empty() {
        None
    } else {
        Some(alloc.bump())
    };
    let mut catalog = pdf.catalog(catalog_id);
    catalog.pages(page_tree_id);
    if let Some(outline_id) = outline_id {
        catalog.outlines(outline_id);
    }
    catalog.finish();

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .author(TextStr(&info.author))
        .creator(TextStr(&info.creator));

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    write_font(&mut pdf, font, font_id, descriptor_id, font_file_id);

    let media_box = Rect::new(0.0, 0.0, page_size.0, page_size.1);
    for ((page, &page_id), &content_id) in
        layout.pages.iter().zip(page_ids.iter()).zip(content_ids.iter())
    {
        let mut content = Content::new();
        if !page.spans.is_empty() {
            content.begin_text();
            for span in page.spans.iter() {
                content.set_font(FONT_RESOURCE, span.size);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, span.x, span.y]);
                content.show(Str(&encoding::encode(&span.text)));
            }
            content.end_text();
        }
        let content = content.finish();
        pdf.stream(content_id, &content);

        let mut pdf_page = pdf.page(page_id);
        pdf_page
            .media_box(media_box)
            .parent(page_tree_id)
            .contents(content_id);
        pdf_page.resources().fonts().pair(FONT_RESOURCE, font_id);
        pdf_page.finish();
    }

    if let Some(outline_id) = outline_id {
        let item_ids: Vec<Ref> = layout.bookmarks.iter().map(|_| alloc.bump()).collect();
        pdf.outline(outline_id)
            .first(item_ids[0])
            .last(item_ids[item_ids.len() - 1])
            .count(item_ids.len() as i32);

        for (i, (title, page_index)) in layout.bookmarks.iter().enumerate() {
            let mut item = pdf.outline_item(item_ids[i]);
            item.title(TextStr(title)).parent(outline_id);
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if i + 1 < item_ids.len() {
                item.next(item_ids[i + 1]);
            }
            item.dest().page(page_ids[*page_index]).fit();
            item.finish();
        }
    }

    pdf.finish()
}

fn write_font(
    pdf: &mut Pdf,
    font: &LoadedFont,
    font_id: Ref,
    descriptor_id: Ref,
    font_file_id: Ref,
) {
    let base_font = font.base_font();
    let face = font.face.as_face_ref();

    {
        let mut dict = pdf.indirect(font_id).dict();
        dict.pair(Name(b"Type"), Name(b"Font"));
        dict.pair(Name(b"Subtype"), Name(b"TrueType"));
        dict.pair(Name(b"BaseFont"), Name(base_font.as_bytes()));
        dict.pair(Name(b"FirstChar"), encoding::FIRST_CHAR as i32);
        dict.pair(Name(b"LastChar"), encoding::LAST_CHAR as i32);
        dict.insert(Name(b"Widths"))
            .array()
            .items(font.code_widths());
        dict.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
        dict.pair(Name(b"FontDescriptor"), descriptor_id);
    }

    let bbox = face.global_bounding_box();
    let ascent = font.to_glyph_space(face.ascender() as f32);
    let descent = font.to_glyph_space(face.descender() as f32);
    let cap_height = face
        .capital_height()
        .map(|h| font.to_glyph_space(h as f32))
        .unwrap_or(ascent);

    pdf.font_descriptor(descriptor_id)
        .name(Name(base_font.as_bytes()))
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(
            font.to_glyph_space(bbox.x_min as f32),
            font.to_glyph_space(bbox.y_min as f32),
            font.to_glyph_space(bbox.x_max as f32),
            font.to_glyph_space(bbox.y_max as f32),
        ))
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(font_file_id);

    pdf.stream(font_file_id, &font.data)
        .pair(Name(b"Length1"), font.data.len() as i32);
}
