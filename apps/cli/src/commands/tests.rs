use anyhow::Result;
use clap::Args;

use dx_trainer::application::format::display_name;

use crate::core::context::AppContext;
use crate::ui::{Icon, Theme};

#[derive(Args, Debug)]
pub struct TestsCommand {}

impl TestsCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service()?;
        println!("{}", Theme::primary("Available tests"));
        for test in service.available_tests() {
            let findings = service.catalog().findings_for(&test);
            if findings.is_empty() {
                println!("  {} {}", Icon::Test, display_name(&test));
            } else {
                let findings: Vec<String> = findings.iter().map(|f| display_name(f)).collect();
                println!(
                    "  {} {} {}",
                    Icon::Test,
                    display_name(&test),
                    Theme::muted(format!("({})", findings.join(", ")))
                );
            }
        }
        Ok(())
    }
}
