use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;
use clap::Parser;
use gscode::command::{self, MessageSink, Sendable, Trigger};
use gscode::config::Config;
use gscode::games::Game;
use gscode::global::Global;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Look up the redemption codes of the latest Genshin Impact / Star Rail
/// special program.
#[derive(Debug, Parser)]
#[command(version, after_help = command::USAGE)]
struct Cli {
    /// Extra configuration file layered over config/default.yaml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the payload as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Command alias, e.g. `gscode`, `srcode` or `原神兑换码`.
    command: String,

    /// Anything after the alias. A non-empty argument produces no reply.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    argument: Vec<String>,
}

struct StdoutSink {
    json: bool,
}

#[async_trait]
impl MessageSink<()> for StdoutSink {
    async fn send_to(&self, _target: &(), payload: Sendable) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        for segment in payload.segments() {
            println!("{segment}\n----------------");
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(&config.level),
        )
        .init();

    if Game::from_alias(&cli.command).is_none() {
        eprintln!("{}", command::USAGE);
        return Ok(());
    }

    let global = Global::init(config)?;
    let resolver = global.resolver();

    let trigger = Trigger {
        command: cli.command,
        argument: cli.argument.join(" "),
        target: (),
    };

    command::handle(&resolver, &trigger, &StdoutSink { json: cli.json }).await
}
