use anyhow::{Context, Result};
use mockfs::Options;

pub fn execute(options: &Options) -> Result<()> {
    print!("{}", render(options)?);
    Ok(())
}

fn render(options: &Options) -> Result<String> {
    toml::to_string_pretty(&options.effective()).context("Failed to serialize options")
}
