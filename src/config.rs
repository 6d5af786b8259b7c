use crate::grid::Position;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub width: usize,

    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Randomly blocked cells for a generated map
    #[arg(long, default_value_t = 40)]
    pub num_walls: usize,

    /// Seed for the generated map; a random one is printed when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML scene file; replaces the generated map
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Start cell as `x,y` (default: scene start or top-left corner)
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Goal cell as `x,y` (default: scene goal or bottom-right corner)
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    #[arg(long, default_value_t = false)]
    pub four_connected: bool,

    /// Only compute the cost field
    #[arg(long, default_value_t = false)]
    pub no_path: bool,

    /// Cross-check the goal cost against A*
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Read editor commands from stdin
    #[arg(long, default_value_t = false)]
    pub interactive: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in `{s}`"))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in `{s}`"))?;
    Ok(Position { x, y })
}
