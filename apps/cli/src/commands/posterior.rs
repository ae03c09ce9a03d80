use anyhow::Result;
use clap::Args;

use crate::core::context::AppContext;
use crate::ui::render;

#[derive(Args, Debug)]
pub struct PosteriorCommand {}

impl PosteriorCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let view = ctx.service()?.current_case(ctx.session())?;
        println!("{}", render::distribution(&view.probabilities));
        Ok(())
    }
}
