use crate::types::Article;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

pub const HEADER: &str = "Great Experiment Watch - Intelligence Brief";

pub const PT_TO_MM: f32 = 0.3528;
// Helvetica averages roughly half an em per glyph.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;
const BLOCK_GAP_MM: f32 = 6.0;
const FIT_TOLERANCE_MM: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Meta,
    Title,
    Body,
    Link { url: String },
}

impl LineStyle {
    pub fn font_size(&self) -> f32 {
        match self {
            LineStyle::Header => 16.0,
            LineStyle::Title => 12.0,
            LineStyle::Body => 11.0,
            LineStyle::Link { .. } => 10.0,
            LineStyle::Meta => 9.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, LineStyle::Header | LineStyle::Title)
    }

    fn line_height_mm(&self) -> f32 {
        self.font_size() * PT_TO_MM * LINE_SPACING
    }

    fn chars_per_line(&self) -> usize {
        (CONTENT_WIDTH_MM / (self.font_size() * PT_TO_MM * AVG_GLYPH_EM)) as usize
    }
}

/// Approximate rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, style: &LineStyle) -> f32 {
    text.chars().count() as f32 * style.font_size() * PT_TO_MM * AVG_GLYPH_EM
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub style: LineStyle,
    /// Baseline, measured from the bottom of the page.
    pub y_mm: f32,
    /// Index of the article this line belongs to, `None` for page furniture.
    pub article: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub lines: Vec<LayoutLine>,
}

/// The brief laid out into pages, independent of any PDF library.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefLayout {
    pub pages: Vec<LayoutPage>,
}

struct Cursor {
    pages: Vec<LayoutPage>,
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![LayoutPage::default()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LayoutPage::default());
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn remaining_mm(&self) -> f32 {
        self.y_mm - MARGIN_MM
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |page| page.lines.is_empty())
    }

    fn place(&mut self, text: String, style: LineStyle, article: Option<usize>) {
        let height = style.line_height_mm();
        if self.remaining_mm() + FIT_TOLERANCE_MM < height && !self.page_is_empty() {
            self.new_page();
        }
        self.y_mm -= height;

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(LayoutLine {
                text,
                style,
                y_mm: self.y_mm,
                article,
            });
        }
    }
}

impl BriefLayout {
    pub fn build(articles: &[Article], generated_at: &str) -> Self {
        let mut cursor = Cursor::new();

        cursor.place(HEADER.to_string(), LineStyle::Header, None);
        cursor.place(format!("Generated {}", generated_at), LineStyle::Meta, None);
        cursor.y_mm -= BLOCK_GAP_MM;

        for (index, article) in articles.iter().enumerate() {
            let block = article_block(article);

            // Keep a block on one page unless it is taller than a page.
            let block_height: f32 = block.iter().map(|(_, style)| style.line_height_mm()).sum();
            let fits = block_height <= cursor.remaining_mm();
            if !fits && !cursor.page_is_empty() && block_height < PAGE_HEIGHT_MM - 2.0 * MARGIN_MM {
                cursor.new_page();
            }

            for (text, style) in block {
                cursor.place(text, style, Some(index));
            }
            cursor.y_mm -= BLOCK_GAP_MM;
        }

        Self { pages: cursor.pages }
    }

    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }

    /// Text of the lines of article `index` whose style satisfies `kind`,
    /// joined with single spaces.
    pub fn article_text(&self, index: usize, kind: fn(&LineStyle) -> bool) -> String {
        self.lines()
            .filter(|line| line.article == Some(index) && kind(&line.style))
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn article_block(article: &Article) -> Vec<(String, LineStyle)> {
    let mut block = Vec::new();

    for line in wrap_text(&article.title, LineStyle::Title.chars_per_line()) {
        block.push((line, LineStyle::Title));
    }

    let meta = format!("{} | {}", article.source, article.published);
    for line in wrap_text(&meta, LineStyle::Meta.chars_per_line()) {
        block.push((line, LineStyle::Meta));
    }

    for line in wrap_text(&article.summary, LineStyle::Body.chars_per_line()) {
        block.push((line, LineStyle::Body));
    }

    if !article.link.is_empty() {
        let style = LineStyle::Link {
            url: article.link.clone(),
        };
        for chunk in split_chars(&article.link, style.chars_per_line()) {
            block.push((chunk, style.clone()));
        }
    }

    block
}

/// Greedy word wrap. Words longer than `width` are split. Each input line
/// break starts a new output line and a blank input line stays a blank
/// output line. Runs of spaces and tabs inside a line collapse to one space.
/// Empty input yields one empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            for piece in split_chars(word, width) {
                let needed = if current.is_empty() {
                    piece.chars().count()
                } else {
                    current.chars().count() + 1 + piece.chars().count()
                };

                if needed > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&piece);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
