use anyhow::Result;
use clap::Args;

use crate::core::context::AppContext;
use crate::ui::{Icon, Theme};

#[derive(Args, Debug)]
pub struct ResetCommand {}

impl ResetCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let removed = ctx.service()?.reset(ctx.session())?;
        if removed {
            println!("{} Case discarded for session '{}'.", Icon::Info, ctx.session());
        } else {
            println!(
                "{}",
                Theme::muted(format!("No case to discard for session '{}'.", ctx.session()))
            );
        }
        Ok(())
    }
}
