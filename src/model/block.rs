//! Block and inline types.
//!
//! Both enums use an internal `type` tag. Deserialization goes through a
//! loose raw record first so that unknown tags become `Unhandled` regardless
//! of their other fields, while recognized tags must carry a well-formed
//! `content` sequence. `Unhandled` serializes back under its original tag.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Embedded videos, one player per identifier
    Video {
        /// Video identifiers
        content: Vec<String>,
    },

    /// Image block; carried through but not rendered
    Image {
        /// Raw image payload as authored
        content: Option<Value>,
    },

    /// Generic container of inline items
    Content {
        /// Identifier attribute for the rendered container
        id: Option<String>,
        /// Inline items in order
        content: Vec<Inline>,
    },

    /// Any block tag without a rendering rule
    Unhandled {
        /// The original `type` tag
        kind: String,
    },
}

impl Block {
    /// Create a video block.
    pub fn video<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Video {
            content: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a content block.
    pub fn content(id: Option<&str>, content: Vec<Inline>) -> Self {
        Block::Content {
            id: id.map(str::to_string),
            content,
        }
    }

    /// The `type` tag this block was authored with.
    pub fn kind(&self) -> &str {
        match self {
            Block::Video { .. } => "video",
            Block::Image { .. } => "image",
            Block::Content { .. } => "content",
            Block::Unhandled { kind } => kind,
        }
    }
}

/// A typed unit nested inside a `content` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Outbound links; each entry is a URL without its scheme
    ProjectLink {
        /// URL suffixes
        content: Vec<String>,
    },

    /// Paragraphs of text
    Paragraph {
        /// One string per paragraph
        content: Vec<String>,
    },

    /// Any inline tag without a rendering rule
    Unhandled {
        /// The original `type` tag
        kind: String,
    },
}

impl Inline {
    /// Create a paragraph inline.
    pub fn paragraphs<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Inline::Paragraph {
            content: texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a project-link inline.
    pub fn project_links<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Inline::ProjectLink {
            content: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// The `type` tag this inline was authored with.
    pub fn kind(&self) -> &str {
        match self {
            Inline::ProjectLink { .. } => "project-link",
            Inline::Paragraph { .. } => "p",
            Inline::Unhandled { kind } => kind,
        }
    }

    pub(crate) fn unhandled_kind(&self) -> Option<&str> {
        match self {
            Inline::Unhandled { kind } => Some(kind),
            _ => None,
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Block::Video { content } => map.serialize_entry("content", content)?,
            Block::Image {
                content: Some(content),
            } => map.serialize_entry("content", content)?,
            Block::Content { id, content } => {
                if let Some(id) = id {
                    map.serialize_entry("id", id)?;
                }
                map.serialize_entry("content", content)?;
            }
            Block::Image { content: None } | Block::Unhandled { .. } => {}
        }
        map.end()
    }
}

impl Serialize for Inline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Inline::ProjectLink { content } | Inline::Paragraph { content } => {
                map.serialize_entry("content", content)?
            }
            Inline::Unhandled { .. } => {}
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
}

impl RawItem {
    /// Take `id` as an optional string.
    fn optional_id<E: de::Error>(&mut self) -> Result<Option<String>, E> {
        match self.id.take() {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(id)) => Ok(Some(id)),
            Some(other) => Err(E::custom(format!(
                "`{}` block has a non-string `id`: {}",
                self.kind, other
            ))),
        }
    }

    /// Take `content` as a typed sequence, failing if it is absent or misshapen.
    fn required<T, E>(self, owner: &str) -> Result<T, E>
    where
        T: serde::de::DeserializeOwned,
        E: de::Error,
    {
        match self.content {
            None | Some(Value::Null) => Err(E::custom(format!(
                "`{}` {} is missing `content`",
                self.kind, owner
            ))),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                E::custom(format!("`{}` {} has invalid `content`: {}", self.kind, owner, e))
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawItem::deserialize(deserializer)?;
        match raw.kind.as_str() {
            "video" => Ok(Block::Video {
                content: raw.required("block")?,
            }),
            "image" => Ok(Block::Image {
                content: raw.content,
            }),
            "content" => {
                let mut raw = raw;
                let id = raw.optional_id()?;
                Ok(Block::Content {
                    id,
                    content: raw.required("block")?,
                })
            }
            _ => Ok(Block::Unhandled { kind: raw.kind }),
        }
    }
}

impl<'de> Deserialize<'de> for Inline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawItem::deserialize(deserializer)?;
        match raw.kind.as_str() {
            "project-link" => Ok(Inline::ProjectLink {
                content: raw.required("inline")?,
            }),
            "p" => Ok(Inline::Paragraph {
                content: raw.required("inline")?,
            }),
            _ => Ok(Inline::Unhandled { kind: raw.kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_known_blocks() {
        let json = r#"[
            {"type": "video", "content": ["1", "2"]},
            {"type": "image", "content": ["cover.png"]},
            {"type": "content", "id": "intro", "content": [
                {"type": "p", "content": ["Hello", "World"]},
                {"type": "project-link", "content": ["example.com/x"]}
            ]}
        ]"#;
        let blocks: Vec<Block> = serde_json::from_str(json).unwrap();

        assert_eq!(blocks[0], Block::video(["1", "2"]));
        assert!(matches!(blocks[1], Block::Image { content: Some(_) }));
        assert_eq!(
            blocks[2],
            Block::content(
                Some("intro"),
                vec![
                    Inline::paragraphs(["Hello", "World"]),
                    Inline::project_links(["example.com/x"]),
                ]
            )
        );
    }

    #[test]
    fn test_unknown_tags_become_unhandled() {
        let json = r#"{"type": "unknown-future-type", "content": {"anything": 1}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind(), "unknown-future-type");
        assert!(matches!(block, Block::Unhandled { .. }));

        let json = r#"{"type": "quote"}"#;
        let inline: Inline = serde_json::from_str(json).unwrap();
        assert_eq!(inline.unhandled_kind(), Some("quote"));
    }

    #[test]
    fn test_image_without_content_is_accepted() {
        let block: Block = serde_json::from_str(r#"{"type": "image"}"#).unwrap();
        assert_eq!(block, Block::Image { content: None });
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let err = serde_json::from_str::<Block>(r#"{"type": "video"}"#).unwrap_err();
        assert!(err.to_string().contains("`video` block is missing `content`"));

        let err = serde_json::from_str::<Inline>(r#"{"type": "p", "content": null}"#).unwrap_err();
        assert!(err.to_string().contains("`p` inline is missing `content`"));

        let json = r#"{"type": "content", "content": [{"type": "project-link"}]}"#;
        let err = serde_json::from_str::<Block>(json).unwrap_err();
        assert!(err.to_string().contains("`project-link` inline is missing `content`"));
    }

    #[test]
    fn test_wrong_content_shape_is_rejected() {
        let err =
            serde_json::from_str::<Block>(r#"{"type": "video", "content": "123"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid `content`"));
    }

    #[test]
    fn test_non_string_id_is_rejected() {
        let json = r#"{"type": "content", "id": 7, "content": []}"#;
        let err = serde_json::from_str::<Block>(json).unwrap_err();
        assert!(err.to_string().contains("non-string `id`"));

        let json = r#"{"type": "carousel", "id": 7}"#;
        assert!(serde_json::from_str::<Block>(json).is_ok());
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert!(serde_json::from_str::<Block>(r#"{"content": []}"#).is_err());
    }

    #[test]
    fn test_serialize_tags() {
        let json = serde_json::to_string(&Inline::paragraphs(["a"])).unwrap();
        assert_eq!(json, r#"{"type":"p","content":["a"]}"#);

        let json = serde_json::to_string(&Block::content(None, vec![])).unwrap();
        assert_eq!(json, r#"{"type":"content","content":[]}"#);

        let json = serde_json::to_string(&Block::content(Some("intro"), vec![])).unwrap();
        assert_eq!(json, r#"{"type":"content","id":"intro","content":[]}"#);

        let json = serde_json::to_string(&Block::Image { content: None }).unwrap();
        assert_eq!(json, r#"{"type":"image"}"#);
    }

    #[test]
    fn test_unhandled_keeps_original_tag() {
        let block = Block::content(
            None,
            vec![Inline::Unhandled {
                kind: "quote".to_string(),
            }],
        );
        let blocks = vec![
            Block::Unhandled {
                kind: "gallery".to_string(),
            },
            block,
        ];

        let json = serde_json::to_string(&blocks).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"gallery"},{"type":"content","content":[{"type":"quote"}]}]"#
        );

        let reloaded: Vec<Block> = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, blocks);
    }
}
