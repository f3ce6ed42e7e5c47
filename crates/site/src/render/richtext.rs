//! Rich-text to HTML.
//!
//! Consecutive list items are grouped into a single `ul`/`ol`. Inline spans
//! are applied per text segment, so overlapping spans nest instead of
//! producing mismatched tags. All text goes through maud's escaping.

use std::slice;

use maud::{html, Markup};
use spacetraveling_core::document::richtext::{BlockKind, RichTextBlock, Span, SpanKind};

use super::components::is_safe_url;

/// Render a rich-text field.
pub fn as_html(blocks: &[RichTextBlock]) -> Markup {
    let mut parts = Vec::new();
    let mut rest = blocks;
    while let Some(first) = rest.first() {
        let run = if is_list(first.kind) {
            rest.iter().take_while(|b| b.kind == first.kind).count()
        } else {
            1
        };
        let (head, tail) = rest.split_at(run);
        parts.push(if is_list(first.kind) {
            list(first.kind, head)
        } else {
            block(first)
        });
        rest = tail;
    }
    html! {
        @for part in &parts { (part) }
    }
}

fn is_list(kind: BlockKind) -> bool {
    matches!(kind, BlockKind::ListItem | BlockKind::OListItem)
}

fn block(b: &RichTextBlock) -> Markup {
    if let Some(level) = b.kind.heading_level() {
        return heading(level, inline(b));
    }
    match b.kind {
        BlockKind::Paragraph => html! { p { (inline(b)) } },
        BlockKind::Preformatted => html! { pre { (b.text) } },
        BlockKind::Image => match b.url.as_deref().filter(|u| is_safe_url(u)) {
            Some(url) => html! {
                p class="block-img" {
                    img src=(url) alt=(b.alt.as_deref().unwrap_or_default()) loading="lazy";
                }
            },
            None => html! {},
        },
        BlockKind::Embed => match b.embed_url().filter(|u| is_safe_url(u)) {
            Some(url) => html! {
                div class="embed" { a href=(url) rel="noopener" { (url) } }
            },
            None => html! {},
        },
        BlockKind::ListItem | BlockKind::OListItem => list(b.kind, slice::from_ref(b)),
        _ => {
            tracing::debug!(kind = ?b.kind, "skipping unsupported rich-text block");
            html! {}
        }
    }
}

fn heading(level: u8, content: Markup) -> Markup {
    match level {
        1 => html! { h1 { (content) } },
        2 => html! { h2 { (content) } },
        3 => html! { h3 { (content) } },
        4 => html! { h4 { (content) } },
        5 => html! { h5 { (content) } },
        _ => html! { h6 { (content) } },
    }
}

fn list(kind: BlockKind, items: &[RichTextBlock]) -> Markup {
    let items = html! {
        @for item in items { li { (inline(item)) } }
    };
    if kind == BlockKind::OListItem {
        html! { ol { (items) } }
    } else {
        html! { ul { (items) } }
    }
}

/// Block text with its spans applied.
fn inline(b: &RichTextBlock) -> Markup {
    let chars: Vec<char> = b.text.chars().collect();
    let len = chars.len();
    let spans: Vec<&Span> = b
        .spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len)
        .collect();

    let mut bounds = vec![0, len];
    for span in &spans {
        bounds.push(span.start);
        bounds.push(span.end.min(len));
    }
    bounds.sort_unstable();
    bounds.dedup();

    let segments: Vec<Markup> = bounds
        .windows(2)
        .map(|w| {
            let (from, to) = (w[0], w[1]);
            let text: String = chars[from..to].iter().collect();
            let active: Vec<&Span> = spans
                .iter()
                .copied()
                .filter(|s| s.start <= from && s.end.min(len) >= to)
                .collect();
            wrap(&text, &active)
        })
        .collect();

    html! {
        @for segment in &segments { (segment) }
    }
}

fn wrap(text: &str, active: &[&Span]) -> Markup {
    let Some((span, rest)) = active.split_first() else {
        return with_breaks(text);
    };
    let inner = wrap(text, rest);
    match span.kind {
        SpanKind::Strong => html! { strong { (inner) } },
        SpanKind::Em => html! { em { (inner) } },
        SpanKind::Hyperlink => match span.link_url().filter(|u| is_safe_url(u)) {
            Some(url) => {
                let target = span.data.as_ref().and_then(|d| d.target.as_deref());
                html! { a href=(url) target=[target] rel=[target.map(|_| "noopener")] { (inner) } }
            }
            None => inner,
        },
        SpanKind::Label => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.label.as_deref())
                .unwrap_or_default();
            html! { span class=(label) { (inner) } }
        }
        SpanKind::Unknown => inner,
    }
}

fn with_breaks(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}
