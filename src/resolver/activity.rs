use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Resolver;
use crate::games::Game;
use crate::upstream::types::{decode_embedded, InstantList, Post, Segment};
use crate::upstream::{FetchParams, RequestKind, Upstream};

static ACT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"act_id=(.*?)&").expect("invalid act_id regex"));

const LIVE_MARKER: &str = "直播";

/// Identifier of a live-stream campaign. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityId(String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<U: Upstream> Resolver<'_, U> {
    /// Finds the act_id of the latest special program announced by `game`'s
    /// official account. Any failure along the way reads as "none yet".
    #[tracing::instrument(skip_all, fields(game = game.slug()))]
    pub async fn locate_activity(&self, game: Game) -> Option<ActivityId> {
        let uid = self.config.game_config(game).author_uid;
        let posts: InstantList = self
            .fetch_data(RequestKind::ActivityList, FetchParams::author(uid))
            .await
            .ok()?;

        let act_id = find_activity_id(&posts, &self.config.keyword);
        tracing::debug!(act_id = ?act_id, "activity lookup finished");
        act_id
    }
}

/// Scans posts in feed order; the first post with `keyword` in its subject
/// that carries a live-stream link wins.
pub fn find_activity_id(posts: &InstantList, keyword: &str) -> Option<ActivityId> {
    posts
        .list
        .iter()
        .filter_map(|item| item.post.as_ref()?.post.as_ref())
        .filter(|post| post.subject.contains(keyword))
        .find_map(activity_id_in_post)
}

fn activity_id_in_post(post: &Post) -> Option<ActivityId> {
    let segments: Vec<Segment> = decode_embedded(&post.structured_content).ok()?;

    // later qualifying links in the same post replace earlier ones
    let mut act_id = None;
    for segment in &segments {
        let Some(link) = segment.link() else {
            continue;
        };
        if !segment.text().contains(LIVE_MARKER) {
            continue;
        }
        if let Some(caps) = ACT_ID_RE.captures(link) {
            act_id = ActivityId::new(&caps[1]);
        }
    }

    act_id
}
