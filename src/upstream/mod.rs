use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;

pub mod http;
pub mod types;

pub use http::HttpUpstream;

/// Which miyolive endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ActivityList,
    LiveIndex,
    CodeRefresh,
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ActivityList => "act_id",
            Self::LiveIndex => "index",
            Self::CodeRefresh => "code",
        }
    }

    /// Text shown to the user when this stage yields nothing usable.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ActivityList => "暂无前瞻直播资讯！",
            Self::LiveIndex => "前瞻直播数据异常",
            Self::CodeRefresh => "兑换码数据异常",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-request values. Each kind reads only the fields it needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchParams<'a> {
    /// Announcement author, used by [`RequestKind::ActivityList`].
    pub uid: Option<u64>,
    /// Sent as `x-rpc-act_id` for the live index and code refresh.
    pub act_id: Option<&'a str>,
    /// `code_ver` of the live session, used by [`RequestKind::CodeRefresh`].
    pub version: Option<&'a str>,
}

impl<'a> FetchParams<'a> {
    pub fn author(uid: u64) -> Self {
        Self {
            uid: Some(uid),
            ..Self::default()
        }
    }

    pub fn activity(act_id: &'a str) -> Self {
        Self {
            act_id: Some(act_id),
            ..Self::default()
        }
    }

    pub fn codes(version: &'a str, act_id: &'a str) -> Self {
        Self {
            act_id: Some(act_id),
            version: Some(version),
            ..Self::default()
        }
    }
}

/// A request that never produced a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{class}] {kind} 接口请求错误")]
pub struct FetchError {
    pub kind: RequestKind,
    /// Short name of the failure, e.g. `Connect` or `Decode`.
    pub class: Cow<'static, str>,
}

impl FetchError {
    pub fn new(kind: RequestKind, class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            class: class.into(),
        }
    }

    pub fn from_reqwest(kind: RequestKind, err: &reqwest::Error) -> Self {
        let class = if err.is_timeout() {
            "Timeout"
        } else if err.is_connect() {
            "Connect"
        } else if err.is_decode() {
            "Decode"
        } else if err.is_body() {
            "Body"
        } else if err.is_builder() {
            "Builder"
        } else if err.is_redirect() {
            "Redirect"
        } else {
            "Request"
        };

        Self::new(kind, class)
    }
}

/// One round trip to the upstream API.
///
/// Implementations perform exactly one request per call and never retry.
/// Transport failures are reported through [`FetchError`]; a response with a
/// non-zero `retcode` is still `Ok` and is left to the caller to interpret.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(
        &self,
        kind: RequestKind,
        params: FetchParams<'_>,
    ) -> Result<serde_json::Value, FetchError>;
}

#[async_trait]
impl<U: Upstream + ?Sized> Upstream for &U {
    async fn fetch(
        &self,
        kind: RequestKind,
        params: FetchParams<'_>,
    ) -> Result<serde_json::Value, FetchError> {
        (**self).fetch(kind, params).await
    }
}
