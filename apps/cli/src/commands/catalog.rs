use anyhow::Result;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

use dx_trainer::application::format::display_name;

use crate::core::context::AppContext;
use crate::ui::Theme;

#[derive(Args, Debug)]
pub struct CatalogCommand {}

impl CatalogCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service()?;
        let catalog = service.catalog();
        let priors = catalog.normalized_priors()?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Disease", "Prior", "Tests"]);
        for disease in catalog.iter() {
            let prior = priors.get(&disease.name).copied().unwrap_or(0.0);
            table.add_row(vec![
                Cell::new(display_name(&disease.name)),
                Cell::new(format!("{:.1}%", prior * 100.0)).set_alignment(CellAlignment::Right),
                Cell::new(disease.diagnostic_tests.len()).set_alignment(CellAlignment::Right),
            ]);
        }

        println!(
            "{} {}",
            Theme::primary(format!("{} diseases", catalog.len())),
            Theme::muted(format!("from {}", ctx.templates_dir().display()))
        );
        println!("{}", table);
        Ok(())
    }
}
