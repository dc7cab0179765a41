//! Chat command handling: alias selection, the argument gate and turning an
//! outcome into something the delivery layer can send.

use async_trait::async_trait;
use serde::Serialize;

use crate::games::Game;
use crate::resolver::{OutcomeMessage, Resolver};
use crate::upstream::Upstream;

pub const USAGE: &str = "查询原神/星穹铁道前瞻直播兑换码
注意：经测试，兑换码接口返回与前瞻直播有 2 分钟左右延迟，应为正常现象，请耐心等待。
/gscode
/srcode";

/// An incoming command as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct Trigger<T> {
    /// The alias the user typed, e.g. `gscode` or `星穹铁道兑换码`.
    pub command: String,
    /// Text after the command name.
    pub argument: String,
    pub target: T,
}

/// Payload for the delivery layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "segments", rename_all = "snake_case")]
pub enum Sendable {
    /// A forwarded bundle, one node per segment.
    Aggregated(Vec<String>),
}

impl Sendable {
    pub fn segments(&self) -> &[String] {
        match self {
            Self::Aggregated(segments) => segments,
        }
    }
}

/// Every reply goes out as a forwarded bundle, informational ones included.
impl From<OutcomeMessage> for Sendable {
    fn from(outcome: OutcomeMessage) -> Self {
        Self::Aggregated(outcome.segments())
    }
}

#[async_trait]
pub trait MessageSink<T: Sync>: Send + Sync {
    async fn send_to(&self, target: &T, payload: Sendable) -> anyhow::Result<()>;
}

/// Resolves the reply for `trigger`, or `None` when the command should end
/// silently (unknown alias or extra arguments).
#[tracing::instrument(skip_all, fields(command = %trigger.command))]
pub async fn respond<U: Upstream, T>(
    resolver: &Resolver<'_, U>,
    trigger: &Trigger<T>,
) -> Option<Sendable> {
    if !trigger.argument.trim().is_empty() {
        tracing::debug!("argument supplied, ignoring command");
        return None;
    }

    let game = Game::from_alias(&trigger.command)?;
    Some(resolver.compose(game).await.into())
}

pub async fn handle<U, T, S>(
    resolver: &Resolver<'_, U>,
    trigger: &Trigger<T>,
    sink: &S,
) -> anyhow::Result<()>
where
    U: Upstream,
    T: Sync,
    S: MessageSink<T>,
{
    if let Some(payload) = respond(resolver, trigger).await {
        sink.send_to(&trigger.target, payload).await?;
    }

    Ok(())
}
