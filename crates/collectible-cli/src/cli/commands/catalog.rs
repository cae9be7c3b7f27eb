//! `collectible catalog <mod>...` – scan mod plugin sources and print the fused catalog.

use anyhow::{anyhow, Context, Result};
use collectible_core::catalog::{self, EntityCatalog};
use collectible_core::App;
use std::path::PathBuf;

pub fn run_catalog(app: &App, mods: &[PathBuf]) -> Result<()> {
    let lifetime = app
        .lifetime()
        .ok_or_else(|| anyhow!("application started without a lifetime"))?;

    let mut catalogs = Vec::with_capacity(mods.len());
    for path in mods {
        eprintln!("Scanning {}", path.display());
        let c = catalog::scan(path, lifetime)
            .with_context(|| format!("scan {}", path.display()))?;
        if c.is_empty() {
            tracing::warn!(path = %path.display(), "no entity found in mod");
        }
        catalogs.push(c);
    }

    let fused = EntityCatalog::fuse(catalogs);
    let stdout = std::io::stdout();
    fused.write_json(stdout.lock())?;
    println!();
    Ok(())
}
