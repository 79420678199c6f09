//! Plain-text → PDF rendering for generated résumés.
//!
//! Deliberately minimal: Helvetica on US letter, naive line wrap, new page on
//! overflow. Layout fidelity is not a goal — the artifact only needs to be a
//! readable, downloadable PDF.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

/// Rough character budget per line for Helvetica 11pt inside 20mm margins.
const WRAP_COLUMNS: usize = 90;

/// Renders plain text into PDF bytes.
pub fn text_to_pdf_bytes(text: &str) -> Result<Vec<u8>> {
    // US letter: 215.9mm x 279.4mm, 20mm margins, 5.5mm line height.
    let (doc, first_page, first_layer) =
        PdfDocument::new("Resume", Mm(215.9), Mm(279.4), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("failed to load builtin PDF font")?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = 259.4;

    for line in text.lines().flat_map(|l| wrap_line(l, WRAP_COLUMNS)) {
        if y < 20.0 {
            let (page, new_layer) = doc.add_page(Mm(215.9), Mm(279.4), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = 259.4;
        }
        if !line.trim().is_empty() {
            layer.use_text(line, 11.0, Mm(20.0), Mm(y), &font);
        }
        y -= 5.5;
    }

    doc.save_to_bytes().context("failed to serialize PDF")
}

/// Greedy word wrap at a fixed column budget. Words longer than the budget
/// are emitted on their own line rather than split.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    if line.len() <= columns {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > columns {
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
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_valid_pdf_header() {
        let bytes = text_to_pdf_bytes("John Doe\nSenior Engineer\n\nRust, Tokio, Axum").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 100);
    }

    #[test]
    fn test_renders_long_document_across_pages() {
        let long_text = "A line of resume content.\n".repeat(200);
        let bytes = text_to_pdf_bytes(&long_text).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        assert_eq!(wrap_line("short line", 90), vec!["short line".to_string()]);
    }

    #[test]
    fn test_wrap_splits_at_word_boundaries() {
        let wrapped = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_keeps_overlong_word_whole() {
        let wrapped = wrap_line("supercalifragilistic word", 10);
        assert_eq!(wrapped[0], "supercalifragilistic");
    }

    #[test]
    fn test_wrap_whitespace_only_line_yields_empty() {
        let long_spaces = " ".repeat(120);
        assert_eq!(wrap_line(&long_spaces, 90), vec![String::new()]);
    }
}
