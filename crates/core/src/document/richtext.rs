//! Structured rich-text as stored by the content API.
//!
//! A rich-text field is a list of blocks. Inline formatting is a list of
//! spans over the block's text, addressed by character offsets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Preformatted,
    ListItem,
    OListItem,
    Image,
    Embed,
    #[serde(other)]
    Unknown,
}

impl BlockKind {
    /// Heading level for `heading1`..`heading6`.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            BlockKind::Heading4 => Some(4),
            BlockKind::Heading5 => Some(5),
            BlockKind::Heading6 => Some(6),
            _ => None,
        }
    }

    /// Whether the block carries text (as opposed to media).
    pub fn is_textual(self) -> bool {
        !matches!(
            self,
            BlockKind::Image | BlockKind::Embed | BlockKind::Unknown
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image source, for `image` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// oEmbed payload, for `embed` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Value>,
}

impl RichTextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }

    /// URL of an embedded resource, if this is an embed block.
    pub fn embed_url(&self) -> Option<&str> {
        self.oembed
            .as_ref()
            .and_then(|o| o.get("embed_url"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Label,
    #[serde(other)]
    Unknown,
}

/// Inline formatting over `text[start..end]`, in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Span {
    pub fn link_url(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_block_kinds() {
        let kinds: Vec<BlockKind> = serde_json::from_value(json!([
            "paragraph",
            "heading2",
            "o-list-item",
            "list-item",
            "preformatted",
            "image",
            "something-new"
        ]))
        .unwrap();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Paragraph,
                BlockKind::Heading2,
                BlockKind::OListItem,
                BlockKind::ListItem,
                BlockKind::Preformatted,
                BlockKind::Image,
                BlockKind::Unknown,
            ]
        );
    }

    #[test]
    fn decode_hyperlink_span() {
        let block: RichTextBlock = serde_json::from_value(json!({
            "type": "paragraph",
            "text": "read the docs",
            "spans": [{
                "start": 9,
                "end": 13,
                "type": "hyperlink",
                "data": { "link_type": "Web", "url": "https://doc.rust-lang.org" }
            }]
        }))
        .unwrap();
        assert_eq!(block.spans.len(), 1);
        assert_eq!(block.spans[0].kind, SpanKind::Hyperlink);
        assert_eq!(block.spans[0].link_url(), Some("https://doc.rust-lang.org"));
    }

    #[test]
    fn decode_image_block() {
        let block: RichTextBlock = serde_json::from_value(json!({
            "type": "image",
            "url": "https://images.prismic.io/a.png",
            "alt": "diagram",
            "dimensions": { "width": 800, "height": 600 }
        }))
        .unwrap();
        assert_eq!(block.kind, BlockKind::Image);
        assert_eq!(block.url.as_deref(), Some("https://images.prismic.io/a.png"));
        assert!(block.text.is_empty());
        assert!(!block.kind.is_textual());
    }

    #[test]
    fn heading_levels() {
        assert_eq!(BlockKind::Heading1.heading_level(), Some(1));
        assert_eq!(BlockKind::Heading6.heading_level(), Some(6));
        assert_eq!(BlockKind::Paragraph.heading_level(), None);
    }

    #[test]
    fn embed_url_from_oembed() {
        let block: RichTextBlock = serde_json::from_value(json!({
            "type": "embed",
            "oembed": { "embed_url": "https://youtu.be/xyz", "type": "video" }
        }))
        .unwrap();
        assert_eq!(block.embed_url(), Some("https://youtu.be/xyz"));
    }
}
