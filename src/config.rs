use std::env;
use std::path::Path;

use ::config::{Config as Layers, ConfigError, Environment, File};
use serde::Deserialize;

use crate::games::{genshin, starrail, Game};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

/// Base URLs of the three miyolive endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub activity_list: String,
    pub live_index: String,
    pub code_refresh: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            activity_list: "https://bbs-api.mihoyo.com/painter/api/user_instant/list".into(),
            live_index: "https://api-takumi.mihoyo.com/event/miyolive/index".into(),
            code_refresh: "https://api-takumi-static.mihoyo.com/event/miyolive/refreshCode".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Account that publishes the special-program announcement posts.
    pub author_uid: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    pub genshin: GameConfig,
    pub starrail: GameConfig,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            genshin: GameConfig {
                author_uid: genshin::AUTHOR_UID,
            },
            starrail: GameConfig {
                author_uid: starrail::AUTHOR_UID,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub level: String,
    pub http: HttpConfig,
    pub upstream: UpstreamConfig,
    /// Marker every announcement subject must contain.
    pub keyword: String,
    pub review_url_base: String,
    pub games: GamesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".into(),
            http: HttpConfig::default(),
            upstream: UpstreamConfig::default(),
            keyword: "版本前瞻特别节目".into(),
            review_url_base: "https://www.miyoushe.com/ys/article/".into(),
            games: GamesConfig::default(),
        }
    }
}

impl Config {
    /// Loads defaults, then `config/default.yaml`, `config/local.yaml`,
    /// an optional extra file and finally `GSCODE__*` environment variables.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Layers::builder()
            .add_source(File::with_name("config/default.yaml").required(false))
            .add_source(File::with_name("config/local.yaml").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }

        if let Ok(level) = env::var("RUST_LOG") {
            builder = builder.set_override("level", level)?;
        }

        builder
            .add_source(Environment::with_prefix("GSCODE").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn game_config(&self, game: Game) -> &GameConfig {
        match game {
            Game::Genshin => &self.games.genshin,
            Game::Starrail => &self.games.starrail,
        }
    }

    pub fn review_url(&self, post_id: &str) -> String {
        format!("{}{}", self.review_url_base, post_id)
    }
}
