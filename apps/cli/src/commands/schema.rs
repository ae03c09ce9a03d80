use anyhow::Result;
use clap::Args;

use dx_trainer::template::TemplateParser;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn execute(&self) -> Result<()> {
        println!("{}", TemplateParser::json_schema()?);
        Ok(())
    }
}
