//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!` into [`axum::response::Html`]. Every
//! value that came from a user or the database goes through [`escape`].

pub mod forms;
pub mod layout;
pub mod resources;
pub mod tables;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
