use super::layout::{
    text_width_mm, BriefLayout, LayoutLine, LineStyle, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
    PT_TO_MM,
};
use crate::types::{Result, WatchError};
use printpdf::{
    Actions, BorderArray, BuiltinFont, Color, ColorArray, HighlightingMode, IndirectFontRef,
    LinkAnnotation, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use tracing::{debug, warn};

const LAYER_NAME: &str = "Layer 1";

/// Drawn in place of characters the built-in fonts cannot encode.
pub const REPLACEMENT_CHAR: char = '?';

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_error(e: printpdf::Error) -> WatchError {
    WatchError::Pdf(e.to_string())
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn link_blue() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.2, 0.8, None))
}

/// Renders a laid-out brief into PDF bytes.
pub fn render(layout: &BriefLayout, title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
    };

    let mut replaced = 0;
    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            replaced += draw_line(&layer, line, &fonts);
        }
    }

    if replaced > 0 {
        warn!(
            "{} characters cannot be drawn with the built-in fonts and were replaced with '{}'",
            replaced, REPLACEMENT_CHAR
        );
    }
    debug!("Rendered brief with {} pages", layout.pages.len());
    doc.save_to_bytes().map_err(pdf_error)
}

/// Rewrites `text` into the WinAnsi repertoire of the built-in Helvetica
/// faces, which silently drop anything else. Typographic punctuation becomes
/// its ASCII form; other unsupported characters become `REPLACEMENT_CHAR`.
/// Returns the drawable text and the number of replaced characters.
pub fn to_winansi(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0;

    for c in text.chars() {
        match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => out.push(c),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' => out.push('*'),
            '\t' => out.push(' '),
            _ => {
                out.push(REPLACEMENT_CHAR);
                replaced += 1;
            }
        }
    }

    (out, replaced)
}

fn draw_line(layer: &PdfLayerReference, line: &LayoutLine, fonts: &Fonts) -> usize {
    let font = if line.style.is_bold() {
        &fonts.bold
    } else {
        &fonts.regular
    };
    let size = line.style.font_size();
    let (text, replaced) = to_winansi(&line.text);
    let width = text_width_mm(&text, &line.style);

    let x = match line.style {
        LineStyle::Header => ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM),
        _ => MARGIN_MM,
    };

    match &line.style {
        LineStyle::Link { url } => {
            layer.set_fill_color(link_blue());
            layer.use_text(text.as_str(), size, Mm(x), Mm(line.y_mm), font);
            layer.add_link_annotation(LinkAnnotation::new(
                Rect::new(Mm(x), Mm(line.y_mm - 1.0), Mm(x + width), Mm(line.y_mm + size * PT_TO_MM)),
                Some(BorderArray::default()),
                Some(ColorArray::default()),
                Actions::uri(url.clone()),
                Some(HighlightingMode::Invert),
            ));
            layer.set_fill_color(black());
        }
        _ => {
            layer.use_text(text.as_str(), size, Mm(x), Mm(line.y_mm), font);
        }
    }

    replaced
}
