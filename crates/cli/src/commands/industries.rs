//! Industries command handler.

use clap::Args;
use vertical_core::AppResult;
use vertical_ideas::Industry;

/// List the supported industries
#[derive(Args, Debug)]
pub struct IndustriesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndustriesCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing industries command");

        if self.json {
            let json = serde_json::to_string_pretty(&Industry::ALL)?;
            println!("{}", json);
        } else {
            for industry in Industry::ALL {
                println!("{}", industry);
            }
        }

        Ok(())
    }
}
