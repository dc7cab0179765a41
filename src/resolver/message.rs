use serde::Serialize;

use super::RedemptionCode;

pub const NO_ACTIVITY: &str = "暂无前瞻直播资讯！";
pub const DELAY_NOTE: &str = "* 官方接口数据有 2 分钟左右延迟，请耐心等待下~";
pub const REPLAY_PREFIX: &str = "直播已经结束，查看回放：\n\n";

/// What the command replies with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum OutcomeMessage {
    /// Independent text segments, e.g. banner and live room before the stream starts.
    PlainText(Vec<String>),
    CodeListing {
        intro: String,
        codes: Vec<RedemptionCode>,
        replay_link: Option<String>,
    },
    Unavailable(String),
}

impl OutcomeMessage {
    pub fn listing(codes: Vec<RedemptionCode>, replay_link: Option<String>) -> Self {
        Self::CodeListing {
            intro: listing_intro(codes.len()),
            codes,
            replay_link,
        }
    }

    /// Renders the outcome as the ordered message segments handed to delivery.
    ///
    /// A listing yields the intro, one segment per code (the bare code only)
    /// and the replay entry when there is one.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Self::PlainText(parts) => parts.clone(),
            Self::Unavailable(reason) => vec![reason.clone()],
            Self::CodeListing {
                intro,
                codes,
                replay_link,
            } => {
                let mut segments = Vec::with_capacity(codes.len() + 2);
                segments.push(intro.clone());
                segments.extend(codes.iter().map(|c| c.code.clone()));
                if let Some(link) = replay_link {
                    segments.push(format!("{REPLAY_PREFIX}{link}"));
                }
                segments
            }
        }
    }
}

pub fn listing_intro(count: usize) -> String {
    format!("当前发布了 {count} 个兑换码，请在有效期内及时兑换哦~\n\n{DELAY_NOTE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(code: &str) -> RedemptionCode {
        RedemptionCode {
            description: String::new(),
            code: code.into(),
        }
    }

    #[test]
    fn listing_renders_codes_then_replay() {
        let msg = OutcomeMessage::listing(
            vec![code("GENSHINGIFT"), code("MORACODE")],
            Some("https://www.miyoushe.com/ys/article/1".into()),
        );

        assert_eq!(
            msg.segments(),
            vec![
                "当前发布了 2 个兑换码，请在有效期内及时兑换哦~\n\n* 官方接口数据有 2 分钟左右延迟，请耐心等待下~".to_string(),
                "GENSHINGIFT".to_string(),
                "MORACODE".to_string(),
                "直播已经结束，查看回放：\n\nhttps://www.miyoushe.com/ys/article/1".to_string(),
            ]
        );
    }

    #[test]
    fn empty_listing_still_has_intro() {
        let msg = OutcomeMessage::listing(Vec::new(), None);
        assert_eq!(msg.segments().len(), 1);
        assert!(msg.segments()[0].starts_with("当前发布了 0 个兑换码"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let msg = OutcomeMessage::Unavailable(NO_ACTIVITY.into());
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            serde_json::json!({ "type": "unavailable", "content": "暂无前瞻直播资讯！" })
        );
    }
}
