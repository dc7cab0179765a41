//! Wire shapes of the miyolive and BBS responses.
//!
//! Only the fields the resolver reads are modelled. `structured_content` and
//! `template` arrive as JSON documents encoded inside a string and are decoded
//! in a second pass with [`decode_embedded`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// `retcode`/`message` pair present on every response.
#[derive(Debug, Deserialize)]
pub struct Status {
    pub retcode: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

pub fn decode_embedded<T: DeserializeOwned>(raw: &str) -> serde_json::Result<T> {
    serde_json::from_str(raw)
}

// user_instant/list

#[derive(Debug, Deserialize)]
pub struct InstantList {
    #[serde(default)]
    pub list: Vec<InstantItem>,
}

#[derive(Debug, Deserialize)]
pub struct InstantItem {
    #[serde(default)]
    pub post: Option<PostWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct PostWrapper {
    #[serde(default)]
    pub post: Option<Post>,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub structured_content: String,
}

/// One rich-text run of a post body.
#[derive(Debug, Deserialize)]
pub struct Segment {
    /// Text for plain runs, an object for images and embeds.
    #[serde(default)]
    pub insert: serde_json::Value,
    #[serde(default)]
    pub attributes: Option<SegmentAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct SegmentAttributes {
    #[serde(default)]
    pub link: Option<String>,
}

impl Segment {
    pub fn text(&self) -> &str {
        self.insert.as_str().unwrap_or_default()
    }

    pub fn link(&self) -> Option<&str> {
        self.attributes
            .as_ref()?
            .link
            .as_deref()
            .filter(|link| !link.is_empty())
    }
}

// miyolive/index

#[derive(Debug, Deserialize)]
pub struct LiveIndex {
    pub live: LiveInfo,
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct LiveInfo {
    pub code_ver: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_end: bool,
    #[serde(default)]
    pub start: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTemplate {
    pub kv_desktop: String,
    #[serde(default)]
    pub live_config: Vec<LiveRoom>,
    #[serde(default)]
    pub review_url: Option<ReviewRef>,
}

#[derive(Debug, Deserialize)]
pub struct LiveRoom {
    pub desktop: String,
}

/// `reviewUrl` is either a bare post id or an app link object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReviewRef {
    PostId(String),
    Link {
        #[serde(default)]
        args: Option<ReviewArgs>,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct ReviewArgs {
    #[serde(default, deserialize_with = "deserialize_post_id")]
    pub post_id: Option<String>,
}

impl ReviewRef {
    pub fn post_id(self) -> Option<String> {
        let post_id = match self {
            Self::PostId(id) => Some(id),
            Self::Link { args } => args.and_then(|a| a.post_id),
            Self::Other(_) => None,
        };

        post_id.filter(|id| !id.is_empty())
    }
}

fn deserialize_post_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PostIdFormat {
        String(String),
        Integer(i64),
    }

    Ok(Option::<PostIdFormat>::deserialize(deserializer)?.map(|id| match id {
        PostIdFormat::String(s) => s,
        PostIdFormat::Integer(i) => i.to_string(),
    }))
}

// miyolive/refreshCode

#[derive(Debug, Deserialize)]
pub struct CodeRefresh {
    #[serde(default)]
    pub code_list: Vec<CodeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CodeEntry {
    #[serde(default)]
    pub title: String,
    pub code: String,
}
