//! Collectible tally over a decoded map dump.
//!
//! The dump is JSON produced by an external map decoder:
//! `{"map": {"rooms": [{"entities": [{"name": .., "data": {..}}]}]}, "data": {"meta": {..}}}`.

use crate::config::TallyConfig;
use crate::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct MapDump {
    pub map: MapBody,
    /// Map-level metadata (`meta.HeartIsEnd` etc.).
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapBody {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Entity {
    fn flag(&self, key: &str) -> bool {
        self.data.get(key).is_some_and(is_truthy)
    }
}

/// Loose truthiness for decoder output, where flags may be bools, numbers or strings.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl MapDump {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether collecting the crystal heart ends the chapter (`meta.HeartIsEnd`).
    pub fn ends_on_heart(&self) -> bool {
        self.data
            .get("meta")
            .and_then(|m| m.get("HeartIsEnd"))
            .is_some_and(is_truthy)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.map.rooms.iter().flat_map(|r| r.entities.iter())
    }
}

/// Counted collectibles and excluded look-alikes, keyed by (normalized) entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub found: BTreeMap<String, u64>,
    pub excluded: BTreeMap<String, u64>,
}

impl Tally {
    pub fn total_found(&self) -> u64 {
        self.found.values().sum()
    }

    pub fn total_excluded(&self) -> u64 {
        self.excluded.values().sum()
    }
}

/// Lowercased keyword lists used to classify entities.
#[derive(Debug, Clone)]
pub struct TallyRules {
    collectible: Vec<String>,
    excluded: Vec<String>,
}

impl Default for TallyRules {
    fn default() -> Self {
        Self::from(&TallyConfig::default())
    }
}

impl From<&TallyConfig> for TallyRules {
    fn from(cfg: &TallyConfig) -> Self {
        let lower = |words: &[String]| words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            collectible: lower(&cfg.collectible_keywords),
            excluded: lower(&cfg.excluded_keywords),
        }
    }
}

enum Verdict {
    Ignore,
    Exclude,
    Count(String),
}

impl TallyRules {
    fn classify(&self, entity: &Entity) -> Verdict {
        let lower = entity.name.to_lowercase();
        if !self.collectible.iter().any(|k| lower.contains(k.as_str())) {
            return Verdict::Ignore;
        }
        if self.excluded.iter().any(|k| lower.contains(k.as_str())) {
            return Verdict::Exclude;
        }
        let heart_like = entity.name == "blackGem" || lower.contains("heart");
        if heart_like && (entity.flag("fake") || entity.flag("fakeHeartDialog")) {
            return Verdict::Exclude;
        }

        let name = match entity.name.as_str() {
            "strawberry" if entity.flag("moon") => "MoonBerry",
            "strawberry" if entity.flag("winged") => "WingedStrawberry",
            "blackGem" | "reflectionHeartStatue" => "CrystalHeart",
            "memorialTextController" => "WingedGoldenBerry",
            other => other,
        };
        Verdict::Count(name.to_string())
    }

    pub fn count(&self, dump: &MapDump) -> Tally {
        let mut tally = Tally::default();
        for entity in dump.entities() {
            match self.classify(entity) {
                Verdict::Ignore => {}
                Verdict::Exclude => *tally.excluded.entry(entity.name.clone()).or_default() += 1,
                Verdict::Count(name) => *tally.found.entry(name).or_default() += 1,
            }
        }
        tracing::debug!(
            found = tally.total_found(),
            excluded = tally.total_excluded(),
            "map tallied"
        );
        tally
    }
}
