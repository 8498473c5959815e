use crate::classification::DEFAULT_RULES_TOML;
use anyhow::Result;
use std::io::Write;

/// Print the embedded rule table; a copy can be edited and passed to `--rules`
pub fn print_rules() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(DEFAULT_RULES_TOML.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
