use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::richtext::RichTextBlock;

/// Document type the blog stores its posts under.
pub const POST_DOCUMENT_TYPE: &str = "post";

/// A document as returned by the content API.
///
/// `data` holds the custom-type fields. It defaults to an untyped JSON map so
/// documents of any type can be fetched, then narrowed with
/// [`Document::into_typed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D = Map<String, Value>> {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, with = "super::date::option")]
    pub first_publication_date: Option<DateTime<Utc>>,
    #[serde(default, with = "super::date::option")]
    pub last_publication_date: Option<DateTime<Utc>>,
    pub data: D,
}

/// Document with untyped `data`.
pub type RawDocument = Document<Map<String, Value>>;

/// A blog post document.
pub type PostDocument = Document<PostData>;

impl RawDocument {
    /// Decode `data` into a concrete custom type.
    pub fn into_typed<D: DeserializeOwned>(self) -> Result<Document<D>, serde_json::Error> {
        let data = serde_json::from_value(Value::Object(self.data))?;
        Ok(Document {
            id: self.id,
            uid: self.uid,
            doc_type: self.doc_type,
            tags: self.tags,
            lang: self.lang,
            first_publication_date: self.first_publication_date,
            last_publication_date: self.last_publication_date,
            data,
        })
    }
}

/// Fields of the `post` custom type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentSection>,
}

/// Image field. An image left empty in the editor comes back as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One entry of the post's `content` group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<RichTextBlock>,
}

/// Empty text fields are sent as `null` rather than omitted.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post_json() -> Value {
        json!({
            "id": "YF1",
            "uid": "como-utilizar-hooks",
            "type": "post",
            "href": "https://example.cdn.prismic.io/api/v2/documents/search",
            "tags": [],
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": null,
            "slugs": ["como-utilizar-hooks"],
            "lang": "pt-br",
            "data": {
                "title": "Como utilizar Hooks",
                "banner": { "url": "https://images.prismic.io/banner.png", "alt": null },
                "author": "Joseph Oliveira",
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [{ "type": "paragraph", "text": "Lorem ipsum", "spans": [] }]
                    }
                ]
            }
        })
    }

    #[test]
    fn decode_raw_document() {
        let doc: RawDocument = serde_json::from_value(post_json()).unwrap();
        assert_eq!(doc.id, "YF1");
        assert_eq!(doc.uid.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(doc.doc_type, POST_DOCUMENT_TYPE);
        assert!(doc.first_publication_date.is_some());
        assert!(doc.last_publication_date.is_none());
        assert!(doc.data.contains_key("title"));
    }

    #[test]
    fn narrow_to_post() {
        let doc: RawDocument = serde_json::from_value(post_json()).unwrap();
        let post: PostDocument = doc.into_typed().unwrap();
        assert_eq!(post.data.title, "Como utilizar Hooks");
        assert_eq!(post.data.author, "Joseph Oliveira");
        assert_eq!(
            post.data.banner.url.as_deref(),
            Some("https://images.prismic.io/banner.png")
        );
        assert_eq!(post.data.content.len(), 1);
        assert_eq!(post.data.content[0].body[0].text, "Lorem ipsum");
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let post: PostData = serde_json::from_value(json!({
            "title": null,
            "banner": {},
            "author": null,
            "content": [{ "heading": null, "body": null }]
        }))
        .unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.banner, Banner::default());
        assert_eq!(post.content[0].heading, "");
        assert!(post.content[0].body.is_empty());
    }

    #[test]
    fn serialize_keeps_api_shape() {
        let doc: RawDocument = serde_json::from_value(post_json()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "post");
        assert_eq!(value["first_publication_date"], "2021-03-15T19:25:28+0000");
        assert_eq!(value["last_publication_date"], Value::Null);
    }
}
