//! The announcement pipeline: locate the live-stream activity, read its
//! session, fetch the published codes and compose the reply.
//!
//! Every stage runs strictly after the previous one and makes at most one
//! upstream call. Nothing here is shared between invocations; a [`Resolver`]
//! is cheap to build per command.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::ResolveError;
use crate::games::Game;
use crate::upstream::types::{Envelope, Status};
use crate::upstream::{FetchParams, RequestKind, Upstream};

pub mod activity;
pub mod codes;
pub mod live;
pub mod message;


pub use activity::ActivityId;
pub use codes::{strip_markup, RedemptionCode};
pub use live::LiveSession;
pub use message::OutcomeMessage;

pub struct Resolver<'a, U> {
    upstream: U,
    config: &'a Config,
}

impl<'a, U: Upstream> Resolver<'a, U> {
    pub fn new(upstream: U, config: &'a Config) -> Self {
        Self { upstream, config }
    }

    /// Runs the whole pipeline for `game` against the current clock.
    pub async fn compose(&self, game: Game) -> OutcomeMessage {
        self.compose_at(game, Utc::now()).await
    }

    #[tracing::instrument(skip_all, fields(game = game.display_name()))]
    pub async fn compose_at(&self, game: Game, now: DateTime<Utc>) -> OutcomeMessage {
        let Some(act_id) = self.locate_activity(game).await else {
            return OutcomeMessage::Unavailable(message::NO_ACTIVITY.into());
        };

        let session = match self.fetch_session_at(&act_id, now).await {
            Ok(session) => session,
            Err(e) => return OutcomeMessage::Unavailable(e.to_string()),
        };

        if let Some(start) = &session.upcoming_start {
            tracing::debug!(%act_id, %start, "live stream has not started yet");
            return OutcomeMessage::PlainText(vec![session.header_asset, session.room_asset]);
        }

        let codes = match self.fetch_codes(&session.version_token, &act_id).await {
            Ok(codes) => codes,
            Err(e) => {
                tracing::debug!(%act_id, error = ?e, "code refresh unusable");
                // reported with the live session's text rather than the code stage's
                return OutcomeMessage::Unavailable(
                    RequestKind::LiveIndex.fallback_message().into(),
                );
            }
        };

        let replay_link = session
            .review_post_id
            .as_deref()
            .map(|post_id| self.config.review_url(post_id));

        OutcomeMessage::listing(codes, replay_link)
    }

    /// Performs one request and unwraps the `{retcode, message, data}`
    /// envelope. A missing or non-zero `retcode` is an upstream error.
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        kind: RequestKind,
        params: FetchParams<'_>,
    ) -> Result<T, ResolveError> {
        let value = self.upstream.fetch(kind, params).await?;

        let status =
            Status::deserialize(&value).map_err(ResolveError::malformed(kind, "retcode"))?;
        if status.retcode != Some(0) {
            tracing::debug!(
                kind = %kind,
                retcode = ?status.retcode,
                message = %status.message,
                "upstream rejected request"
            );
            return Err(ResolveError::Upstream {
                kind,
                retcode: status.retcode,
                message: status.message,
            });
        }

        let envelope =
            Envelope::<T>::deserialize(value).map_err(ResolveError::malformed(kind, "data"))?;

        Ok(envelope.data)
    }
}
