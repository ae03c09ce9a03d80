use anyhow::Result;
use clap::Args;

use dx_trainer::application::format::display_name;

use crate::core::context::AppContext;
use crate::ui::{render, Icon, Theme};

#[derive(Args, Debug)]
pub struct OrderCommand {
    /// Test to order, e.g. `WBC_Count` or "wbc count"
    #[arg(required = true, num_args = 1..)]
    pub test: Vec<String>,
}

impl OrderCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service()?;
        let requested = self.test.join(" ");
        let test_name = resolve_test_name(&requested, &service.available_tests());

        let report = service.order_test(ctx.session(), &test_name)?;
        println!(
            "{} {}: {}",
            Icon::Test,
            Theme::bold(display_name(&report.test_name)),
            Theme::primary(render::result_text(&report.result))
        );

        let view = service.current_case(ctx.session())?;
        println!("\n{}", render::distribution(&view.probabilities));
        Ok(())
    }
}

/// Map a display-style name ("ct scan") onto the catalog's spelling
/// ("CT_Scan"). Unmatched input is passed through unchanged.
fn resolve_test_name(requested: &str, available: &[String]) -> String {
    let wanted = requested.trim().replace(' ', "_").to_lowercase();
    available
        .iter()
        .find(|name| name.to_lowercase() == wanted)
        .cloned()
        .unwrap_or_else(|| requested.trim().to_string())
}
