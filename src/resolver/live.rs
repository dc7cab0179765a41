use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use super::{ActivityId, Resolver};
use crate::error::ResolveError;
use crate::upstream::types::{decode_embedded, LiveIndex, LiveTemplate};
use crate::upstream::{FetchParams, RequestKind, Upstream};

const START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PROGRAM_SUFFIX: &str = "特别节目";

/// Schedule times are published in China Standard Time.
pub fn live_timezone() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("valid UTC+8 offset")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSession {
    /// `code_ver`, required by the code refresh endpoint.
    pub version_token: String,
    pub title: String,
    pub header_asset: String,
    pub room_asset: String,
    pub has_ended: bool,
    /// Raw `start` value while the stream is still upcoming.
    pub upcoming_start: Option<String>,
    pub review_post_id: Option<String>,
}

impl<U: Upstream> Resolver<'_, U> {
    pub async fn fetch_session(&self, act_id: &ActivityId) -> Result<LiveSession, ResolveError> {
        self.fetch_session_at(act_id, Utc::now()).await
    }

    #[tracing::instrument(skip(self, act_id), fields(act_id = %act_id))]
    pub async fn fetch_session_at(
        &self,
        act_id: &ActivityId,
        now: DateTime<Utc>,
    ) -> Result<LiveSession, ResolveError> {
        let index: LiveIndex = self
            .fetch_data(RequestKind::LiveIndex, FetchParams::activity(act_id.as_str()))
            .await?;

        let session = session_from_index(index, now)?;
        tracing::debug!(
            title = %session.title,
            code_ver = %session.version_token,
            has_ended = session.has_ended,
            "live session resolved"
        );

        Ok(session)
    }
}

pub fn session_from_index(index: LiveIndex, now: DateTime<Utc>) -> Result<LiveSession, ResolveError> {
    let template: LiveTemplate = decode_embedded(&index.template)
        .map_err(ResolveError::malformed(RequestKind::LiveIndex, "template"))?;

    let room_asset = template
        .live_config
        .into_iter()
        .next()
        .map(|room| room.desktop)
        .ok_or_else(|| ResolveError::Malformed {
            kind: RequestKind::LiveIndex,
            field: "liveConfig",
            reason: "no live room configured".into(),
        })?;

    let live = index.live;
    let mut session = LiveSession {
        version_token: live.code_ver,
        title: live.title.replace(PROGRAM_SUFFIX, ""),
        header_asset: template.kv_desktop,
        room_asset,
        has_ended: live.is_end,
        upcoming_start: None,
        review_post_id: None,
    };

    if session.has_ended {
        session.review_post_id = template.review_url.and_then(|review| review.post_id());
    } else if now < parse_start(&live.start)? {
        session.upcoming_start = Some(live.start);
    }

    Ok(session)
}

fn parse_start(raw: &str) -> Result<DateTime<Utc>, ResolveError> {
    let malformed = |reason: String| ResolveError::Malformed {
        kind: RequestKind::LiveIndex,
        field: "start",
        reason,
    };

    let naive =
        NaiveDateTime::parse_from_str(raw, START_FORMAT).map_err(|e| malformed(e.to_string()))?;

    live_timezone()
        .from_local_datetime(&naive)
        .single()
        .map(|start| start.with_timezone(&Utc))
        .ok_or_else(|| malformed(format!("ambiguous local time {raw}")))
}
