//! Shared page chrome: shell, header and helpers used by every page.

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const SITE_NAME: &str = "spacetraveling";

/// Inline stylesheet for all pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#1a1d23;--surface:#282a36;--fg:#f8f8f8;--fg2:#d7d7d7;--fg3:#bbb;--accent:#ff57b2;--highlight:#f8f8f8}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg2);background:var(--bg)}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
.site-header{max-width:1120px;margin:0 auto;padding:2.5rem 2rem 2rem}
.site-header a{color:var(--highlight);font-weight:700;font-size:1.5rem}
.site-header .dot{color:var(--accent)}
main{max-width:720px;margin:0 auto;padding:0 1rem 4rem}
.banner{width:100%;max-height:400px;object-fit:cover;display:block;margin-bottom:4rem}
.post h1{color:var(--highlight);font-size:3rem;line-height:1.2}
.post-info{display:flex;gap:1.5rem;margin:1.5rem 0 4rem;color:var(--fg3);font-size:.875rem}
.post section{margin-bottom:4rem}
.post section h2{color:var(--highlight);font-size:2.25rem;margin-bottom:2rem}
.post-content p,.post-content ul,.post-content ol,.post-content pre{margin-bottom:1.25rem}
.post-content ul,.post-content ol{padding-left:1.5rem}
.post-content pre{background:var(--surface);padding:1rem;overflow-x:auto}
.post-navigation{display:flex;justify-content:space-between;gap:1rem;border-top:1px solid var(--surface);padding-top:3rem}
.post-navigation a{display:flex;flex-direction:column;color:var(--highlight)}
.post-navigation .next{margin-left:auto;text-align:right}
.post-navigation small{color:var(--accent)}
.post-list li{list-style:none;margin-bottom:3rem}
.post-list h2{color:var(--highlight);font-size:1.75rem}
.preview-banner{position:sticky;top:0;background:var(--accent);color:#fff;text-align:center;padding:.5rem}
.preview-banner a{color:#fff;font-weight:700;text-decoration:underline}
.not-found{text-align:center;padding-top:6rem}
"#;

/// Render the full HTML page shell with `<head>`, header and body content.
pub fn page_shell(title: &str, body_content: Markup) -> Markup {
    let full_title = if title.is_empty() {
        SITE_NAME.to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    };
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                meta property="og:title" content=(title);
                meta property="og:site_name" content=(SITE_NAME);
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header class="site-header" {
                    a href="/" { (SITE_NAME) span class="dot" { "." } }
                }
                main { (body_content) }
            }
        }
    }
}

/// Sticky banner shown on every page served in preview mode.
pub fn preview_banner() -> Markup {
    html! {
        aside class="preview-banner" {
            "Modo preview. "
            a href="/api/exit-preview" { "Sair do modo preview" }
        }
    }
}

/// Check that a URL is safe to put in `href`/`src`.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("http://")
        || url.starts_with("mailto:")
        || (url.starts_with('/') && !url.starts_with("//"))
}

/// Publication date as shown on pages, e.g. `15 Mar 2021`.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

pub fn post_href(uid: &str) -> String {
    format!("/post/{uid}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn safe_urls() {
        assert!(is_safe_url("https://images.prismic.io/banner.png"));
        assert!(is_safe_url("/post/hello"));
        assert!(!is_safe_url("//evil.example/x"));
        assert!(!is_safe_url("javascript:alert(1)"));
    }

    #[test]
    fn date_format() {
        let date = Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap();
        assert_eq!(format_date(Some(&date)), "15 Mar 2021");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn shell_escapes_title() {
        let page = page_shell("<script>", html! { p { "body" } }).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("&lt;script&gt; | spacetraveling"));
        assert!(page.contains(r#"<a href="/">"#));
    }
}
