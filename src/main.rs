use clap::{Parser, ValueEnum};
use engine::{Game, GameConfig, Player};
use tracing_subscriber::EnvFilter;

mod console;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Red,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::Red => Player::Red,
            Side::Black => Player::Black,
        }
    }
}

/// 中国象棋：在终端里和电脑对弈
#[derive(Parser)]
#[command(name = "xiangqi", version, about, long_about = None)]
struct Cli {
    /// Side you play. Red always moves first.
    #[arg(long, value_enum, default_value = "red")]
    side: Side,
    /// Seed for the computer's tie-breaking, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // 日志写到 stderr，不和棋盘输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let game = Game::new(GameConfig {
        human: cli.side.into(),
        seed: cli.seed,
    });
    console::ui(game)?;
    Ok(())
}
