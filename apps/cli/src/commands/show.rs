use anyhow::{Context, Result};
use clap::Args;

use crate::core::context::AppContext;
use crate::ui::render;

#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Print the case as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let view = ctx.service()?.current_case(ctx.session())?;
        if self.json {
            let json = serde_json::to_string_pretty(&view).context("Failed to serialize case")?;
            println!("{}", json);
        } else {
            print!("{}", render::case(&view));
        }
        Ok(())
    }
}
