//! `collectible tally <map>...` – count collectibles in decoded map dumps.

use anyhow::{anyhow, Context, Result};
use collectible_core::catalog::EntityCatalog;
use collectible_core::config::CollectibleConfig;
use collectible_core::tally::{MapDump, Tally, TallyRules};
use collectible_core::{App, Lifetime};
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub fn run_tally(
    app: &App,
    cfg: &CollectibleConfig,
    maps: &[PathBuf],
    catalog: Option<&Path>,
) -> Result<()> {
    let lifetime = app
        .lifetime()
        .ok_or_else(|| anyhow!("application started without a lifetime"))?;
    let names = match catalog {
        Some(path) => EntityCatalog::load(path)
            .with_context(|| format!("load catalog {}", path.display()))?,
        None => EntityCatalog::new(),
    };
    let rules = TallyRules::from(&cfg.tally);

    for map in maps {
        print!("{}", tally_map(map, &rules, &names, lifetime)?);
    }
    Ok(())
}

/// Report for one map; checks the lifetime before reading it.
fn tally_map(
    map: &Path,
    rules: &TallyRules,
    names: &EntityCatalog,
    lifetime: &Lifetime,
) -> Result<String> {
    lifetime.checkpoint()?;
    let dump =
        MapDump::from_path(map).with_context(|| format!("read map dump {}", map.display()))?;
    let tally = rules.count(&dump);
    let mut out = String::new();
    let _ = writeln!(out, "Scanning {}", map.display());
    out.push_str(&render_report(&tally, dump.ends_on_heart(), names));
    out.push('\n');
    Ok(out)
}

fn render_report(tally: &Tally, ends_on_heart: bool, names: &EntityCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "End on heart: {}", if ends_on_heart { "yes" } else { "no" });
    let _ = writeln!(
        out,
        "Found: {} entities (excluded: {} entities)",
        tally.total_found(),
        tally.total_excluded()
    );
    for (id, count) in &tally.found {
        let _ = writeln!(out, " - {}: x{}", names.display_name(id), count);
    }
    if !tally.excluded.is_empty() {
        let _ = writeln!(out, "Excluded:");
        for (id, count) in &tally.excluded {
            let _ = writeln!(out, " - {}: x{}", id, count);
        }
    }
    out
}
