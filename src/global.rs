use std::sync::Arc;

use anyhow::Context as _;

use crate::config::Config;
use crate::resolver::Resolver;
use crate::upstream::HttpUpstream;

pub struct Global {
    pub config: Config,
    pub http_client: reqwest::Client,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.http.user_agent)
            .build()
            .context("http client")?;

        Ok(Arc::new(Self {
            config,
            http_client,
        }))
    }

    pub fn upstream(&self) -> HttpUpstream {
        HttpUpstream::new(self.http_client.clone(), self.config.upstream.clone())
    }

    /// A resolver for one command invocation.
    pub fn resolver(&self) -> Resolver<'_, HttpUpstream> {
        Resolver::new(self.upstream(), &self.config)
    }
}
