use anyhow::Result;
use clap::Args;

use dx_trainer::application::CaseView;

use crate::core::context::AppContext;
use crate::ui::{render, Theme};

#[derive(Args, Debug)]
pub struct NewCommand {}

impl NewCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service()?;
        let view = service.new_case(ctx.session())?;

        println!(
            "{} {}\n",
            Theme::success("New patient"),
            Theme::muted(format!("(session '{}')", ctx.session()))
        );
        print!("{}", report(&view));
        println!(
            "\n{}",
            Theme::muted("Order tests with `dx-trainer order <TEST>`, then `dx-trainer diagnose <NAME>`.")
        );
        Ok(())
    }
}

/// The presentation followed by the starting distribution.
fn report(view: &CaseView) -> String {
    format!(
        "{}\n{}\n{}\n",
        render::case(view),
        Theme::primary("Starting probabilities"),
        render::distribution(&view.probabilities)
    )
}
