//! Entity name catalog built from mod editor-plugin sources.
//!
//! Mods ship editor support either as Loenn (Lua) or Ahorn (Julia) plugins,
//! optionally with an `en_gb.lang` file. The catalog maps the entity id found
//! in a map (e.g. `MyMod/SpikyBerry`) to the display name mappers see.
//!
//! Resolution order: lang file entries first, then Loenn sources, then Ahorn
//! sources. The first name found for an id wins within one mod.

use crate::error::Result;
use crate::lifetime::Lifetime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;
use zip::ZipArchive;

const LOENN_LANG: &str = "Loenn/lang/en_gb.lang";
const AHORN_LANG: &str = "Ahorn/lang/en_gb.lang";

/// One plugin file: path relative to the mod root (`/`-separated) and its text.
#[derive(Debug, Clone)]
pub struct PluginSource {
    pub path: String,
    pub contents: String,
}

impl PluginSource {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Entity id -> display name, plus files that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCatalog {
    entities: BTreeMap<String, String>,
    #[serde(default)]
    unresolved: Vec<String>,
}

fn lang_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^(?:entities|triggers|style\.effects)\.([^.]+)\.(?:placements\.)?name(?:\.[^=]+)?=(.*)$",
        )
        .expect("invalid lang regex")
    })
}

fn loenn_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Loenn/(?:entities|triggers|style)/[a-zA-Z_/]+(?:\.lua|\.lua..+)$")
            .expect("invalid loenn path regex")
    })
}

fn ahorn_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Ahorn/(?:entities|triggers|style)/[a-zA-Z_/]+(?:\.jl|\.jl..+)$")
            .expect("invalid ahorn path regex")
    })
}

/// Id and placement-name patterns for one plugin flavour.
struct SourcePatterns {
    id: Regex,
    name: Regex,
}

fn lua_patterns() -> &'static SourcePatterns {
    static PATTERNS: OnceLock<SourcePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SourcePatterns {
        id: Regex::new(
            r#"(?m)(?:(?:.+)\.|(?:return|local\s*.+\s*=)\s*\{(?:\n|.)*?)name\s*=\s*"(\S+)""#,
        )
        .expect("invalid lua id regex"),
        name: Regex::new(
            r#"(?m)(?:(?:.+)\.|(?:return|local\s*.+\s*=)\s*\{(?:\n|.)*?)placements(?:\.|\s*=\s*\{(?:\n|.)*?)name\s*=\s*"(.+)",?"#,
        )
        .expect("invalid lua name regex"),
    })
}

fn julia_patterns() -> &'static SourcePatterns {
    static PATTERNS: OnceLock<SourcePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SourcePatterns {
        id: Regex::new(
            r#"(?m)(?:@mapdef\s*(?:Entity|Trigger)|@pardef\s*(?:.|\n)+\s*=(?:\s|\n)*(?:Entity|Trigger)\s*\()\s*"(\S+)"\s*"#,
        )
        .expect("invalid julia id regex"),
        name: Regex::new(
            r#"(?m)const\splacements\s*=\s*Ahorn\.PlacementDict\((?:\n|\s)*"(.+)"\s*=>\sAhorn\.EntityPlacement\("#,
        )
        .expect("invalid julia name regex"),
    })
}

/// Display names carry a variant suffix like `Spiky Berry (Normal)`; keep the base.
fn clean_name(raw: &str) -> String {
    raw.split('(').next().unwrap_or_default().trim().to_string()
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog of one mod from its plugin files.
    pub fn from_sources(sources: &[PluginSource]) -> Self {
        let mut catalog = Self::new();

        let has_lang_file = sources.iter().any(|s| s.path.ends_with("lang/en_gb.lang"));
        if has_lang_file {
            let lang = sources
                .iter()
                .find(|s| s.path == LOENN_LANG)
                .or_else(|| sources.iter().find(|s| s.path == AHORN_LANG));
            if let Some(lang) = lang {
                for caps in lang_regex().captures_iter(&lang.contents) {
                    catalog.entities.insert(caps[1].to_string(), clean_name(&caps[2]));
                }
            }
        } else {
            tracing::debug!("no lang file, resolving names from plugin sources only");
        }

        for src in sources.iter().filter(|s| loenn_file_regex().is_match(&s.path)) {
            catalog.resolve_source(src, lua_patterns(), has_lang_file);
        }
        for src in sources.iter().filter(|s| ahorn_file_regex().is_match(&s.path)) {
            catalog.resolve_source(src, julia_patterns(), has_lang_file);
        }

        catalog
    }

    fn resolve_source(&mut self, src: &PluginSource, patterns: &SourcePatterns, has_lang_file: bool) {
        let Some(id) = first_capture(&patterns.id, &src.contents) else {
            if !has_lang_file {
                tracing::debug!(file = %src.path, "no entity id found");
                self.unresolved.push(format!("ID: NA, file {}", src.path));
            }
            return;
        };
        if self.entities.contains_key(&id) {
            return;
        }
        match first_capture(&patterns.name, &src.contents) {
            Some(name) => {
                self.entities.insert(id, clean_name(&name));
            }
            None if !has_lang_file => {
                tracing::debug!(file = %src.path, id = %id, "no display name found");
                self.unresolved.push(format!("ID: {}, file {}", id, src.path));
            }
            None => {}
        }
    }

    /// Merge another catalog into this one. Entries from `other` win on id clashes.
    pub fn merge(&mut self, other: EntityCatalog) {
        self.entities.extend(other.entities);
        self.unresolved.extend(other.unresolved);
    }

    /// Fuse per-mod catalogs into one lookup table.
    pub fn fuse(catalogs: impl IntoIterator<Item = EntityCatalog>) -> Self {
        catalogs.into_iter().fold(Self::new(), |mut acc, c| {
            acc.merge(c);
            acc
        })
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entities.get(id).map(String::as_str)
    }

    /// Display name for `id`, or `id` itself when unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).unwrap_or(id)
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Read a catalog previously written with [`write_json`](Self::write_json) or `collectible catalog`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn is_plugin_path(rel: &str) -> bool {
    rel.ends_with("lang/en_gb.lang")
        || loenn_file_regex().is_match(rel)
        || ahorn_file_regex().is_match(rel)
}

/// Scan a mod as found on disk: an unpacked directory or a `.zip` archive.
pub fn scan(path: &Path, lifetime: &Lifetime) -> Result<EntityCatalog> {
    if path.is_dir() {
        scan_dir(path, lifetime)
    } else {
        scan_zip(path, lifetime)
    }
}

/// Scan an unpacked mod directory and build its catalog.
///
/// Checks `lifetime` before reading each file and stops with
/// [`Error::Cancelled`](crate::Error::Cancelled) once it has been cancelled.
pub fn scan_dir(root: &Path, lifetime: &Lifetime) -> Result<EntityCatalog> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        lifetime.checkpoint()?;
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !is_plugin_path(&rel) {
            continue;
        }
        let bytes = fs::read(entry.path())?;
        sources.push(PluginSource::new(rel, String::from_utf8_lossy(&bytes)));
    }

    Ok(finish_scan(root, &sources))
}

/// Scan a mod archive as distributed (`.zip`) without unpacking it.
///
/// Same cancellation behavior as [`scan_dir`], checked before each archive entry.
pub fn scan_zip(archive_path: &Path, lifetime: &Lifetime) -> Result<EntityCatalog> {
    let file = fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(io::BufReader::new(file))?;

    let mut sources = Vec::new();
    for i in 0..archive.len() {
        lifetime.checkpoint()?;
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !is_plugin_path(entry.name()) {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        sources.push(PluginSource::new(name, String::from_utf8_lossy(&bytes)));
    }

    Ok(finish_scan(archive_path, &sources))
}

fn finish_scan(origin: &Path, sources: &[PluginSource]) -> EntityCatalog {
    let catalog = EntityCatalog::from_sources(sources);
    tracing::info!(
        origin = %origin.display(),
        files = sources.len(),
        entities = catalog.len(),
        unresolved = catalog.unresolved().len(),
        "scanned mod plugins"
    );
    catalog
}
