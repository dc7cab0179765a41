use crate::upstream::{FetchError, RequestKind};

/// Why a resolver stage produced nothing usable.
///
/// The `Display` text is what ends up in the chat message: the transport
/// description for [`ResolveError::Fetch`], the stage's fixed fallback text
/// otherwise.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{}", .kind.fallback_message())]
    Upstream {
        kind: RequestKind,
        retcode: Option<i64>,
        message: String,
    },

    #[error("{}", .kind.fallback_message())]
    Malformed {
        kind: RequestKind,
        field: &'static str,
        reason: String,
    },
}

impl ResolveError {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Fetch(e) => e.kind,
            Self::Upstream { kind, .. } | Self::Malformed { kind, .. } => *kind,
        }
    }

    pub(crate) fn malformed(
        kind: RequestKind,
        field: &'static str,
    ) -> impl FnOnce(serde_json::Error) -> Self {
        move |e| Self::Malformed {
            kind,
            field,
            reason: e.to_string(),
        }
    }
}
