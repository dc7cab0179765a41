use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::{ActivityId, Resolver};
use crate::error::ResolveError;
use crate::upstream::types::CodeRefresh;
use crate::upstream::{FetchParams, RequestKind, Upstream};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("invalid tag regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionCode {
    /// Reward summary with markup removed.
    pub description: String,
    pub code: String,
}

impl<U: Upstream> Resolver<'_, U> {
    /// Current codes of the session, in upstream order. An empty list just
    /// means nothing has been published yet.
    #[tracing::instrument(skip(self, act_id), fields(act_id = %act_id))]
    pub async fn fetch_codes(
        &self,
        version: &str,
        act_id: &ActivityId,
    ) -> Result<Vec<RedemptionCode>, ResolveError> {
        let refresh: CodeRefresh = self
            .fetch_data(
                RequestKind::CodeRefresh,
                FetchParams::codes(version, act_id.as_str()),
            )
            .await?;

        let codes: Vec<_> = refresh
            .code_list
            .into_iter()
            .map(|entry| RedemptionCode {
                description: strip_markup(&entry.title),
                code: entry.code,
            })
            .collect();

        tracing::debug!(count = codes.len(), "fetched codes");

        Ok(codes)
    }
}

/// Drops `<...>` tags, then turns `&nbsp;` into a plain space.
///
/// Tags go first on purpose: an entity split by a tag (`&nb<i>sp;`) would
/// otherwise survive one pass and change on the next.
pub fn strip_markup(s: &str) -> String {
    TAG_RE.replace_all(s, "").replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(strip_markup("<b>Primogems</b>&nbsp;100"), "Primogems 100");
        assert_eq!(
            strip_markup(r#"<p><span style="color:#ffd700">原石</span>×60</p>"#),
            "原石×60"
        );
    }

    #[test]
    fn plain_text_only_loses_entities() {
        assert_eq!(strip_markup("Mora"), "Mora");
        assert_eq!(strip_markup("Mora&nbsp;x10000"), "Mora x10000");
    }

    #[test]
    fn stripping_is_idempotent() {
        for input in [
            "<b>Primogems</b>&nbsp;100",
            "<<b>>nested",
            "&nb<i>sp;split entity",
            "a < b and c > d",
            "unclosed <tag",
        ] {
            let once = strip_markup(input);
            assert_eq!(strip_markup(&once), once, "input: {input}");
        }
    }
}
