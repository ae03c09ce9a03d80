use anyhow::Result;
use clap::Args;

use crate::core::context::AppContext;
use crate::ui::{Icon, Theme};

#[derive(Args, Debug)]
pub struct DiagnoseCommand {
    /// Disease name, e.g. "acute pancreatitis"
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl DiagnoseCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let guess = self.name.join(" ").replace('_', " ");
        let verdict = ctx.service()?.submit_diagnosis(ctx.session(), &guess)?;

        if verdict.correct {
            println!("{} {}", Theme::success(Icon::Check), Theme::success(&verdict.feedback));
        } else {
            println!("{} {}", Theme::error(Icon::Cross), verdict.feedback);
        }
        Ok(())
    }
}
