//! `herd template`

use std::path::Path;

use anyhow::{Context, Result};

pub fn handle(out: &Path) -> Result<()> {
    let written = herd_io::write_template(out)
        .with_context(|| format!("writing template to {}", out.display()))?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("Wrote {} tables to {}", written.len(), out.display());
    Ok(())
}
