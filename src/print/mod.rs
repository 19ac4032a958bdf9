//! Printable documents generated from employee records.
//!
//! Templates are pure functions returning a [`PrintDocument`]; rendering to
//! HTML is separate so previews and tests work on the same structure.

mod templates;

pub use templates::{Issuer, investigation_request, work_certificate};

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{AppError, Result};

/// A formatted certificate or letter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintDocument {
    /// Issuing organization block, top left.
    pub header: Vec<String>,
    pub reference: Option<String>,
    /// Addressee block, top right.
    pub recipient: Vec<String>,
    pub title: String,
    pub subject: Option<String>,
    pub paragraphs: Vec<String>,
    /// Bulleted lines printed after the first paragraph.
    pub items: Vec<String>,
    /// Paragraphs printed after the items.
    pub closing: Vec<String>,
    pub place_date: String,
    pub signature: Vec<String>,
}

impl PrintDocument {
    /// Plain-text rendering used by the preview pane.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.header {
            let _ = writeln!(out, "{line}");
        }
        if let Some(reference) = &self.reference {
            let _ = writeln!(out, "{reference}");
        }
        if !self.recipient.is_empty() {
            out.push('\n');
            for line in &self.recipient {
                let _ = writeln!(out, "{line}");
            }
        }
        let _ = writeln!(out, "\n{}\n", self.title);
        if let Some(subject) = &self.subject {
            let _ = writeln!(out, "{subject}\n");
        }
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            let _ = writeln!(out, "{paragraph}\n");
            if i == 0 && !self.items.is_empty() {
                for item in &self.items {
                    let _ = writeln!(out, "  - {item}");
                }
                out.push('\n');
            }
        }
        for paragraph in &self.closing {
            let _ = writeln!(out, "{paragraph}\n");
        }
        let _ = writeln!(out, "{}", self.place_date);
        for line in &self.signature {
            let _ = writeln!(out, "{line}");
        }
        out
    }

    /// Standalone A4 HTML page, ready for the browser's print dialog.
    pub fn to_html(&self) -> String {
        let mut body = String::new();

        body.push_str("<div class=\"top\"><div class=\"header\">");
        for line in &self.header {
            let _ = write!(body, "<div>{}</div>", escape_html(line));
        }
        if let Some(reference) = &self.reference {
            let _ = write!(body, "<div class=\"ref\">{}</div>", escape_html(reference));
        }
        body.push_str("</div>");
        if !self.recipient.is_empty() {
            body.push_str("<div class=\"recipient\">");
            for line in &self.recipient {
                let _ = write!(body, "<div>{}</div>", escape_html(line));
            }
            body.push_str("</div>");
        }
        body.push_str("</div>");

        let _ = write!(body, "<h1>{}</h1>", escape_html(&self.title));
        if let Some(subject) = &self.subject {
            let _ = write!(body, "<p class=\"subject\">{}</p>", escape_html(subject));
        }

        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            let _ = write!(body, "<p>{}</p>", escape_html(paragraph));
            if i == 0 && !self.items.is_empty() {
                body.push_str("<ul>");
                for item in &self.items {
                    let _ = write!(body, "<li>{}</li>", escape_html(item));
                }
                body.push_str("</ul>");
            }
        }
        for paragraph in &self.closing {
            let _ = write!(body, "<p>{}</p>", escape_html(paragraph));
        }

        body.push_str("<div class=\"signature\">");
        let _ = write!(body, "<div>{}</div>", escape_html(&self.place_date));
        for line in &self.signature {
            let _ = write!(body, "<div><strong>{}</strong></div>", escape_html(line));
        }
        body.push_str("</div>");

        format!(
            "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
            title = escape_html(&self.title),
        )
    }
}

const STYLE: &str = "@page{size:A4;margin:20mm}\
body{font-family:'Times New Roman',serif;font-size:13pt;line-height:1.6;max-width:170mm;margin:auto}\
.top{display:flex;justify-content:space-between;margin-bottom:12mm}\
.header{font-weight:bold}.ref{font-weight:normal;margin-top:4mm}\
.recipient{text-align:right;margin-top:10mm}\
h1{text-align:center;text-decoration:underline;font-size:17pt;margin:10mm 0}\
.subject{font-weight:bold}p{text-align:justify}\
.signature{margin-top:15mm;margin-left:55%}";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write the document as an HTML file.
pub fn save_html(doc: &PrintDocument, path: &Path) -> Result<()> {
    std::fs::write(path, doc.to_html()).map_err(|e| AppError::Print(format!("Cannot write {}: {e}", path.display())))
}

/// Open save file dialog for a printable document.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("HTML Documents", &["html"])
        .save_file()
}

/// Generate default filename for a printable document.
pub fn generate_document_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.html", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> PrintDocument {
        PrintDocument {
            header: vec!["Banque <Test>".to_string()],
            reference: Some("N° 12/DRH/2024".to_string()),
            recipient: vec![],
            title: "ATTESTATION DE TRAVAIL".to_string(),
            subject: None,
            paragraphs: vec!["Premier paragraphe.".to_string(), "Second.".to_string()],
            items: vec!["Ligne A".to_string()],
            closing: vec!["Clôture & fin".to_string()],
            place_date: "Fait à Alger, le 1er mars 2024".to_string(),
            signature: vec!["Le Directeur".to_string()],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">O'Neil & co</a>"#), "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;");
    }

    #[test]
    fn test_html_is_escaped_and_complete() {
        let html = doc().to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Banque &lt;Test&gt;"));
        assert!(!html.contains("Banque <Test>"));
        assert!(html.contains("Clôture &amp; fin"));
        assert!(html.contains("<li>Ligne A</li>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_items_follow_first_paragraph() {
        let text = doc().to_plain_text();
        let first = text.find("Premier paragraphe.").unwrap();
        let item = text.find("  - Ligne A").unwrap();
        let second = text.find("Second.").unwrap();
        assert!(first < item && item < second);
    }

    #[test]
    fn test_save_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.html");
        save_html(&doc(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("ATTESTATION DE TRAVAIL"));
    }
}
