pub mod genshin;
pub mod starrail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Genshin,
    Starrail,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::Genshin, Game::Starrail];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Genshin => "genshin",
            Self::Starrail => "starrail",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Genshin => "Genshin Impact",
            Self::Starrail => "Honkai: Star Rail",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Genshin => &genshin::ALIASES,
            Self::Starrail => &starrail::ALIASES,
        }
    }

    /// Resolves a chat command name (with or without a leading `/`).
    pub fn from_alias(s: &str) -> Option<Self> {
        let name = s.trim().trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|game| game.aliases().contains(&name))
    }
}
