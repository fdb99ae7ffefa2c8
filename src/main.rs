use anyhow::Result;
use clap::Parser;
use grid_snake::app::App;
use grid_snake::game::GameConfig;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Terminal snake game on a fixed 20x20 grid")]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let mut app = App::new(GameConfig::default());
    app.run().await?;

    Ok(())
}
