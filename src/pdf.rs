/*!
 * PDF layout for the merged document
 *
 * Re-parses the merged text line by line, classifies each line by its
 * text pattern (banner, metadata, blank, body) and lays the document
 * out across paginated A4 pages with per-kind styling rules. Layout is
 * computed first as placed text runs, then rendered through printpdf.
 */

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, Rgb, TextItem,
};

use crate::error::Result;

/// A4 portrait page width in millimeters
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 portrait page height in millimeters
pub const PAGE_HEIGHT: f32 = 297.0;
/// Margin on all four sides
pub const MARGIN: f32 = 20.0;
/// Vertical advance of a body line
pub const LINE_HEIGHT: f32 = 6.0;
/// Usable text width between the margins
pub const MAX_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 16.0;
const GENERATED_SIZE: f32 = 10.0;
const BANNER_SIZE: f32 = 12.0;
const METADATA_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 10.0;

/// Millimeters per PostScript point
const MM_PER_PT: f32 = 0.352_778;
/// Courier glyph advance as a fraction of the font size
const COURIER_GLYPH_RATIO: f32 = 0.6;

/// Classification of one merged-text line, derived from its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Banner header line produced by the filename option
    Banner,
    /// Metadata line produced by the header option
    Metadata,
    /// Blank line, advances without rendering
    Blank,
    /// Regular body content, word-wrapped before rendering
    Body,
}

/// Classify a line by the same patterns the formatter emits
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with("===") && line[3..].contains("===") {
        LineKind::Banner
    } else if line.starts_with("File:")
        || line.starts_with("Path:")
        || line.starts_with("Size:")
        || line.starts_with("Type:")
    {
        LineKind::Metadata
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Body
    }
}

/// Word-wrap a body line to the given width in millimeters.
///
/// Width is estimated from the fixed-pitch body font; words longer
/// than a full line are hard-broken.
pub fn wrap_line(line: &str, width: f32) -> Vec<String> {
    let glyph_width = BODY_SIZE * COURIER_GLYPH_RATIO * MM_PER_PT;
    let max_chars = ((width / glyph_width).floor() as usize).max(1);

    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let mut word = word;
        // Hard-break words that cannot fit on a line of their own
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            wrapped.push(word[..split_at].to_string());
            word = &word[split_at..];
        }

        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > max_chars && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }

    wrapped
}

/// Styling applied to a placed text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Document title on the first page
    Title,
    /// Generation timestamp below the title
    Generated,
    /// Banner header, bold with accent color
    Banner,
    /// Metadata line, small and gray, extra indent
    Metadata,
    /// Body content, fixed-pitch
    Body,
}

impl TextStyle {
    fn font(self) -> BuiltinFont {
        match self {
            Self::Title | Self::Banner => BuiltinFont::HelveticaBold,
            Self::Generated | Self::Metadata => BuiltinFont::Helvetica,
            Self::Body => BuiltinFont::Courier,
        }
    }

    fn size(self) -> f32 {
        match self {
            Self::Title => TITLE_SIZE,
            Self::Generated => GENERATED_SIZE,
            Self::Banner => BANNER_SIZE,
            Self::Metadata => METADATA_SIZE,
            Self::Body => BODY_SIZE,
        }
    }

    fn color(self) -> (f32, f32, f32) {
        match self {
            Self::Title | Self::Body => (0.0, 0.0, 0.0),
            Self::Generated => (100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0),
            Self::Banner => (0.0, 100.0 / 255.0, 200.0 / 255.0),
            Self::Metadata => (80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0),
        }
    }
}

/// One text run placed at an absolute page position (top-left origin)
#[derive(Debug, Clone)]
pub struct PlacedText {
    /// Horizontal offset from the left edge in millimeters
    pub x: f32,
    /// Vertical offset from the top edge in millimeters
    pub y: f32,
    /// Styling of the run
    pub style: TextStyle,
    /// Text content
    pub text: String,
}

/// A laid-out page
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Text runs on this page
    pub texts: Vec<PlacedText>,
}

struct LayoutBuilder {
    done: Vec<PageLayout>,
    current: PageLayout,
    cursor: f32,
}

impl LayoutBuilder {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            current: PageLayout::default(),
            cursor: MARGIN,
        }
    }

    // Break check happens before rendering, so a line is never placed
    // past the bottom margin.
    fn break_page_if_needed(&mut self) {
        if self.cursor > PAGE_HEIGHT - MARGIN {
            self.done.push(std::mem::take(&mut self.current));
            self.cursor = MARGIN;
        }
    }

    fn place(&mut self, x: f32, style: TextStyle, text: &str) {
        self.current.texts.push(PlacedText {
            x,
            y: self.cursor,
            style,
            text: text.to_string(),
        });
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.done.push(self.current);
        self.done
    }
}

/// Lay out the merged text across pages.
///
/// The document opens with a title line and a generation timestamp,
/// followed by a gap before body content begins.
pub fn layout_document(merged: &str, base_filename: &str, generated: &str) -> Vec<PageLayout> {
    let mut layout = LayoutBuilder::new();

    layout.place(
        MARGIN,
        TextStyle::Title,
        &format!("Merged Files: {}", base_filename),
    );
    layout.cursor = MARGIN + 8.0;
    layout.place(
        MARGIN,
        TextStyle::Generated,
        &format!("Generated on: {}", generated),
    );
    layout.cursor = MARGIN + 20.0;

    for line in merged.split('\n') {
        layout.break_page_if_needed();

        match classify_line(line) {
            LineKind::Banner => {
                let header = line.replace('=', "").trim().to_string();
                layout.place(MARGIN, TextStyle::Banner, &header);
                layout.cursor += LINE_HEIGHT + 2.0;
            }
            LineKind::Metadata => {
                layout.place(MARGIN + 5.0, TextStyle::Metadata, line);
                layout.cursor += LINE_HEIGHT - 1.0;
            }
            LineKind::Blank => {
                layout.cursor += LINE_HEIGHT / 2.0;
            }
            LineKind::Body => {
                for wrapped in wrap_line(line, MAX_WIDTH - 10.0) {
                    layout.break_page_if_needed();
                    layout.place(MARGIN + 5.0, TextStyle::Body, &wrapped);
                    layout.cursor += LINE_HEIGHT;
                }
            }
        }
    }

    layout.finish()
}

/// Render merged text into PDF document bytes
pub fn render_pdf(merged: &str, base_filename: &str) -> Result<Vec<u8>> {
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let pages = layout_document(merged, base_filename, &generated);

    let mut doc = PdfDocument::new(&format!("Merged Files: {}", base_filename));
    let pdf_pages: Vec<PdfPage> = pages
        .iter()
        .map(|page| {
            let mut ops = Vec::new();
            for placed in &page.texts {
                let (r, g, b) = placed.style.color();
                let font = placed.style.font();
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Mm(placed.x).into(),
                        y: Mm(PAGE_HEIGHT - placed.y).into(),
                    },
                });
                ops.push(Op::SetFillColor {
                    col: Color::Rgb(Rgb {
                        r,
                        g,
                        b,
                        icc_profile: None,
                    }),
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(placed.style.size()),
                    font,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(placed.text.clone())],
                    font,
                });
                ops.push(Op::EndTextSection);
            }
            PdfPage::new(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), ops)
        })
        .collect();

    let bytes = doc
        .with_pages(pdf_pages)
        .save(&PdfSaveOptions::default(), &mut Vec::new());
    Ok(bytes)
}
