//! Server-rendered HTML.
//!
//! Pages are plain strings built with `format!`; every value that came from
//! the catalog or the request goes through [`escape`].

mod admin;
mod storefront;

pub use admin::{admin_page, product_form, AdminView, FormMode};
pub use storefront::{storefront_page, StorefrontView};

use axum::http::StatusCode;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #fafafa; color: #111; }
a { color: inherit; }
header, main, footer { max-width: 1200px; margin: 0 auto; padding: 1rem; }
header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid #ddd; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1rem; }
.card { background: #fff; border: 1px solid #ddd; padding: 0.75rem; }
.card img { width: 100%; aspect-ratio: 1; object-fit: cover; background: #1a1a1a; }
.badge { display: inline-block; font-size: 0.7rem; padding: 0.1rem 0.4rem; background: #e5e5e5; margin-right: 0.25rem; }
.badge.dark { background: #111; color: #fff; }
.muted { color: #666; font-size: 0.85rem; }
.error { color: #b00020; }
.pagination a, .pagination span { margin: 0 0.25rem; }
.cart { background: #fff; border: 1px solid #ddd; padding: 1rem; margin-bottom: 1rem; }
table { width: 100%; border-collapse: collapse; background: #fff; }
td, th { border-bottom: 1px solid #eee; padding: 0.5rem; text-align: left; vertical-align: top; }
form.inline { display: inline; }
label { display: block; margin-top: 0.5rem; }
"#;

/// Wrap `body_html` in the page shell.
pub fn shell(title: &str, body_html: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{STYLE}</style>
    <title>{title}</title>
</head>
<body>
    {body_html}
</body>
</html>"#
    )
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<main>
    <h1>{code} {reason}</h1>
    <p class="error">{message}</p>
    <p><a href="/">Back to the store</a></p>
</main>"#,
        code = status.as_u16(),
        message = escape(message),
    );
    shell(reason, &body)
}

/// Grey album-cover placeholder of the given size.
pub fn placeholder_svg(width: u32, height: u32) -> String {
    format!(
        r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
  <rect width="100%" height="100%" fill="#1a1a1a"/>
  <rect width="100%" height="100%" fill="none" stroke="#333" stroke-width="2"/>
  <text x="50%" y="50%" font-family="Arial, sans-serif" font-size="14" fill="#666" text-anchor="middle" dy=".3em">{width}x{height}</text>
  <text x="50%" y="60%" font-family="Arial, sans-serif" font-size="12" fill="#999" text-anchor="middle" dy=".3em">Album Cover</text>
</svg>"##
    )
}
