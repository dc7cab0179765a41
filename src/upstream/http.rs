use async_trait::async_trait;

use super::{FetchError, FetchParams, RequestKind, Upstream};
use crate::config::UpstreamConfig;

const ACT_ID_HEADER: &str = "x-rpc-act_id";
const PAGE_SIZE: &str = "20";

/// [`Upstream`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    endpoints: UpstreamConfig,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client, endpoints: UpstreamConfig) -> Self {
        Self { client, endpoints }
    }

    fn request(&self, kind: RequestKind, params: &FetchParams<'_>) -> reqwest::RequestBuilder {
        let act_id = params.act_id.unwrap_or_default();

        match kind {
            RequestKind::ActivityList => {
                let uid = params.uid.unwrap_or_default().to_string();
                self.client
                    .get(&self.endpoints.activity_list)
                    .query(&[("offset", "0"), ("size", PAGE_SIZE), ("uid", uid.as_str())])
            }
            RequestKind::LiveIndex => self
                .client
                .get(&self.endpoints.live_index)
                .header(ACT_ID_HEADER, act_id),
            RequestKind::CodeRefresh => {
                // fresh timestamp on every call, the endpoint is cached by query string
                let time = chrono::Utc::now().timestamp().to_string();
                self.client
                    .get(&self.endpoints.code_refresh)
                    .query(&[
                        ("version", params.version.unwrap_or_default()),
                        ("time", time.as_str()),
                    ])
                    .header(ACT_ID_HEADER, act_id)
            }
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(
        &self,
        kind: RequestKind,
        params: FetchParams<'_>,
    ) -> Result<serde_json::Value, FetchError> {
        let result = async {
            self.request(kind, &params)
                .send()
                .await?
                .json::<serde_json::Value>()
                .await
        }
        .await;

        result.map_err(|e| {
            let err = FetchError::from_reqwest(kind, &e);
            tracing::error!(
                kind = %kind,
                class = %err.class,
                error = %e,
                "{} 接口请求错误",
                kind
            );
            err
        })
    }
}
