//! HTML table rendering
//!
//! Produces a `<table>` with a header row and the printed body in current
//! sort order. Header cells of sortable columns carry the sort class, and
//! the active column additionally carries `<sort class>-asc` or
//! `<sort class>-desc`. All text is escaped.

use crate::error::Result;
use crate::widget::SortableTable;
use std::fmt::Write;

impl SortableTable {
    /// Render the table as an HTML fragment
    pub fn to_html(&self) -> Result<String> {
        let options = self.options();
        let state = self.state();
        let mut html = String::new();

        let mut table_classes = vec![escape(&options.table_class)];
        if let Some(theme) = &options.theme {
            table_classes.push(escape(&format!("{}_theme_{theme}", options.table_class)));
        }
        let _ = write!(html, "<table class=\"{}\">", table_classes.join(" "));

        html.push_str("<thead><tr>");
        for (index, header) in self.table().headers().iter().enumerate() {
            if self.columns()[index].sortable {
                let mut classes = vec![escape(&options.sort_class)];
                if state.column == Some(index) {
                    classes.push(escape(&format!("{}-{}", options.sort_class, state.direction)));
                }
                let _ = write!(html, "<th class=\"{}\">{}</th>", classes.join(" "), escape(header));
            } else {
                let _ = write!(html, "<th>{}</th>", escape(header));
            }
        }
        html.push_str("</tr></thead>");

        html.push_str("<tbody>");
        for row in self.display_rows()? {
            html.push_str("<tr>");
            for cell in row {
                let _ = write!(html, "<td>{}</td>", escape(&cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");

        Ok(html)
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
