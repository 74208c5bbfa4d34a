//! Markdown → PDF rendering.
//!
//! Markdown is reduced to a flat list of blocks (headings, paragraphs, list
//! items, code, rules), word-wrapped to the A4 text width and laid out with
//! the PDF built-in fonts. Built-in fonts only cover ASCII, so anything else
//! is transliterated or replaced with `?`.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::constants::export::PDF_SUFFIX_LEN;
use crate::types::{AutodocError, Result};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.35;

const BODY_SIZE: f32 = 11.0;
const CODE_SIZE: f32 = 9.0;
const LIST_INDENT_MM: f32 = 5.0;

/// Average glyph width as a fraction of font size
const PROPORTIONAL_WIDTH: f32 = 0.5;
const MONOSPACE_WIDTH: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Heading(usize, String),
    Paragraph(String),
    ListItem(String),
    Code(String),
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Mono,
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    face: Face,
    size: f32,
    indent_mm: f32,
    space_before_mm: f32,
}

/// Render markdown to a fresh `<output_dir>/<prefix>_<6 hex>.pdf`.
///
/// Failures are reported as [`AutodocError::Render`] and never touch other
/// files in `output_dir`.
pub fn render_pdf(markdown: &str, output_dir: &Path, prefix: &str) -> Result<PathBuf> {
    let bytes = render_pdf_bytes(markdown)?;

    fs::create_dir_all(output_dir).map_err(|e| {
        AutodocError::Render(format!("Cannot create {}: {}", output_dir.display(), e))
    })?;
    let path = output_dir.join(pdf_file_name(prefix));
    fs::write(&path, bytes)
        .map_err(|e| AutodocError::Render(format!("Cannot write {}: {}", path.display(), e)))?;

    info!("Saved PDF report to {}", path.display());
    Ok(path)
}

fn pdf_file_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}.pdf", prefix, &id[..PDF_SUFFIX_LEN])
}

/// Pure transformation: markdown text in, PDF bytes out.
pub fn render_pdf_bytes(markdown: &str) -> Result<Vec<u8>> {
    let lines = layout(&parse_blocks(markdown));

    let (doc, page, layer) = PdfDocument::new(
        "Documentation",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts::load(&doc)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in &lines {
        let height = line.size * LINE_SPACING * PT_TO_MM;
        let needed = line.space_before_mm + height;
        if y - needed < MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        } else {
            y -= line.space_before_mm;
        }
        y -= height;
        write_line(&current, &fonts, line, y);
    }

    doc.save_to_bytes()
        .map_err(|e| AutodocError::Render(format!("PDF serialization failed: {}", e)))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let load = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| AutodocError::Render(format!("Font unavailable: {}", e)))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            mono: load(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Mono => &self.mono,
        }
    }
}

fn write_line(layer: &PdfLayerReference, fonts: &Fonts, line: &Line, y: f32) {
    if line.text.is_empty() {
        return;
    }
    layer.use_text(
        line.text.clone(),
        line.size,
        Mm(MARGIN_MM + line.indent_mm),
        Mm(y),
        fonts.get(line.face),
    );
}

// =============================================================================
// Markdown → blocks
// =============================================================================

fn parse_blocks(markdown: &str) -> Vec<Block> {
    #[derive(Clone, Copy)]
    enum Kind {
        Heading(usize),
        Paragraph,
        Item,
        Code,
    }

    let mut blocks = Vec::new();
    let mut buf = String::new();
    let mut kind = Kind::Paragraph;
    let mut item_depth = 0usize;

    let flush = |buf: &mut String, kind: Kind, blocks: &mut Vec<Block>| {
        let text = match kind {
            Kind::Code => buf.trim_end().to_string(),
            _ => buf.trim().to_string(),
        };
        buf.clear();
        if text.is_empty() {
            return;
        }
        blocks.push(match kind {
            Kind::Heading(level) => Block::Heading(level, text),
            Kind::Paragraph => Block::Paragraph(text),
            Kind::Item => Block::ListItem(text),
            Kind::Code => Block::Code(text),
        });
    };

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut buf, kind, &mut blocks);
                kind = Kind::Heading(level as usize);
            }
            Event::Start(Tag::Paragraph) if item_depth == 0 => {
                flush(&mut buf, kind, &mut blocks);
                kind = Kind::Paragraph;
            }
            Event::Start(Tag::Item) => {
                flush(&mut buf, kind, &mut blocks);
                item_depth += 1;
                kind = Kind::Item;
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut buf, kind, &mut blocks);
                kind = Kind::Code;
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::CodeBlock) => {
                flush(&mut buf, kind, &mut blocks);
                kind = if item_depth > 0 { Kind::Item } else { Kind::Paragraph };
            }
            Event::End(TagEnd::Paragraph) => {
                if item_depth == 0 {
                    flush(&mut buf, kind, &mut blocks);
                } else {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Item) => {
                flush(&mut buf, kind, &mut blocks);
                item_depth = item_depth.saturating_sub(1);
                kind = if item_depth > 0 { Kind::Item } else { Kind::Paragraph };
            }
            Event::Text(text) | Event::Code(text) | Event::Html(text) | Event::InlineHtml(text) => {
                buf.push_str(&text);
            }
            Event::SoftBreak => buf.push(if matches!(kind, Kind::Code) { '\n' } else { ' ' }),
            Event::HardBreak => buf.push('\n'),
            Event::Rule => {
                flush(&mut buf, kind, &mut blocks);
                blocks.push(Block::Rule);
            }
            _ => {}
        }
    }
    flush(&mut buf, kind, &mut blocks);

    blocks
}

// =============================================================================
// Blocks → wrapped lines
// =============================================================================

fn layout(blocks: &[Block]) -> Vec<Line> {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Block::Heading(level, text) => {
                let size = match level {
                    1 => 20.0,
                    2 => 17.0,
                    3 => 15.0,
                    4 => 13.0,
                    _ => 12.0,
                };
                push_wrapped(&mut lines, text, Face::Bold, size, 0.0, 5.0);
            }
            Block::Paragraph(text) => push_wrapped(&mut lines, text, Face::Regular, BODY_SIZE, 0.0, 2.5),
            Block::ListItem(text) => {
                let bulleted = format!("* {}", text);
                push_wrapped(&mut lines, &bulleted, Face::Regular, BODY_SIZE, LIST_INDENT_MM, 1.0);
            }
            Block::Code(text) => push_wrapped(&mut lines, text, Face::Mono, CODE_SIZE, LIST_INDENT_MM, 2.5),
            Block::Rule => lines.push(Line {
                text: "-".repeat(40),
                face: Face::Regular,
                size: BODY_SIZE,
                indent_mm: 0.0,
                space_before_mm: 2.5,
            }),
        }
    }

    lines
}

fn push_wrapped(
    lines: &mut Vec<Line>,
    text: &str,
    face: Face,
    size: f32,
    indent_mm: f32,
    space_before_mm: f32,
) {
    let width = max_chars(face, size, indent_mm);
    let text = sanitize(text);
    let wrapped = if face == Face::Mono {
        hard_wrap(&text, width)
    } else {
        word_wrap(&text, width)
    };

    for (i, text) in wrapped.into_iter().enumerate() {
        lines.push(Line {
            text,
            face,
            size,
            indent_mm,
            space_before_mm: if i == 0 { space_before_mm } else { 0.0 },
        });
    }
}

fn max_chars(face: Face, size: f32, indent_mm: f32) -> usize {
    let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent_mm;
    let glyph = if face == Face::Mono { MONOSPACE_WIDTH } else { PROPORTIONAL_WIDTH };
    let glyph_mm = size * glyph * PT_TO_MM;
    ((usable_mm / glyph_mm).floor() as usize).max(1)
}

/// Greedy word wrap; explicit newlines start new lines, long words are split.
fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.len() > width {
                if !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(width);
                out.push(word);
                word = rest;
            }
            if line.is_empty() {
                line = word;
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(&word);
            } else {
                out.push(std::mem::replace(&mut line, word));
            }
        }
        out.push(line);
    }

    out
}

/// Code keeps its own line breaks and indentation; overlong lines are cut.
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.split('\n') {
        if raw.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut rest = raw;
        while rest.len() > width {
            let (head, tail) = rest.split_at(width);
            out.push(head.to_string());
            rest = tail;
        }
        out.push(rest.to_string());
    }
    out
}

/// Reduce text to printable ASCII so byte offsets equal char offsets.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            ' '..='~' => out.push(c),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            '\u{2192}' => out.push_str("->"),
            // Variation selectors and zero-width joiners render as nothing.
            '\u{FE00}'..='\u{FE0F}' | '\u{200B}'..='\u{200D}' => {}
            '\r' => {}
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_blocks() {
        let md = "\n\n### a.py\n\n#### Architect Agent\nFirst line\nsame paragraph.\n\n- one\n- two\n\n```python\ndef f():\n    pass\n```\n\n---\n";
        let blocks = parse_blocks(md);
        assert_eq!(
            blocks,
            vec![
                Block::Heading(3, "a.py".to_string()),
                Block::Heading(4, "Architect Agent".to_string()),
                Block::Paragraph("First line same paragraph.".to_string()),
                Block::ListItem("one".to_string()),
                Block::ListItem("two".to_string()),
                Block::Code("def f():\n    pass".to_string()),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_word_wrap() {
        assert_eq!(word_wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(word_wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(word_wrap("x\n\ny", 10), vec!["x", "", "y"]);
        for line in word_wrap(&"word ".repeat(100), 17) {
            assert!(line.len() <= 17);
        }
    }

    #[test]
    fn test_hard_wrap_keeps_indentation() {
        assert_eq!(hard_wrap("    abcdef", 6), vec!["    ab", "cdef"]);
        assert_eq!(hard_wrap("a\n\nb", 6), vec!["a", "", "b"]);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("⚠️ Documentation — “quoted” • ok…"), "? Documentation - \"quoted\" * ok...");
        assert_eq!(sanitize("tab\there"), "tab    here");
        assert!(sanitize("日本語").chars().all(|c| c == '?'));
    }

    #[test]
    fn test_layout_wraps_within_width() {
        let long = "lorem ipsum ".repeat(200);
        let lines = layout(&[Block::Paragraph(long)]);
        let width = max_chars(Face::Regular, BODY_SIZE, 0.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.text.len() <= width));
        assert!(lines[0].space_before_mm > 0.0);
        assert_eq!(lines[1].space_before_mm, 0.0);
    }

    #[test]
    fn test_render_bytes_is_pdf() {
        let md = format!("### big.py\n\n#### User Agent\n{}", "paragraph text\n\n".repeat(300));
        let bytes = render_pdf_bytes(&md).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_paths_are_fresh() {
        let dir = TempDir::new().unwrap();
        let first = render_pdf("# hello", dir.path(), "auto_docs").unwrap();
        let second = render_pdf("# hello", dir.path(), "auto_docs").unwrap();

        assert_ne!(first, second);
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("auto_docs_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), "auto_docs_".len() + PDF_SUFFIX_LEN + ".pdf".len());
    }

    #[test]
    fn test_empty_markdown_still_renders() {
        assert!(render_pdf_bytes("").unwrap().starts_with(b"%PDF"));
    }
}
