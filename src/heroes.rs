use crate::error::ApiResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default location of the hero reference file
pub const HERO_IDS_FILE: &str = "hero_ids.json";

/// Steam WebAPI GetHeroes file structure
#[derive(Debug, Deserialize)]
struct HeroListFile {
    result: HeroList,
}

#[derive(Debug, Deserialize)]
struct HeroList {
    heroes: Vec<HeroEntry>,
}

#[derive(Debug, Deserialize)]
struct HeroEntry {
    id: i64,
    name: String,
    #[serde(default)]
    localized_name: Option<String>,
}

/// Hero ID to display-name mapping
///
/// Loaded once at process start and passed by reference to whichever
/// component needs it.
#[derive(Debug, Default)]
pub struct HeroNames {
    names: HashMap<i64, String>,
}

impl HeroNames {
    /// Load the mapping from a GetHeroes-shaped JSON file
    pub fn load(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        log::info!("Loading hero names from: {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let file: HeroListFile = serde_json::from_str(&content)?;

        let names: HashMap<i64, String> = file
            .result
            .heroes
            .into_iter()
            .map(|h| (h.id, h.localized_name.unwrap_or(h.name)))
            .collect();

        log::info!("Loaded {} hero names", names.len());
        Ok(Self { names })
    }

    /// Load the mapping, degrading to an empty one so the GUI can still
    /// start without the data file
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(heroes) => heroes,
            Err(e) => {
                log::warn!("Failed to load hero names, charts will show IDs: {}", e);
                Self::default()
            }
        }
    }

    /// Display name for a hero ID
    pub fn name(&self, id: i64) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown Hero {}", id))
    }

    /// Number of known heroes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_hero_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_prefers_localized_name() {
        let file = write_hero_file(
            r#"{"result": {"heroes": [
                {"id": 1, "name": "npc_dota_hero_antimage", "localized_name": "Anti-Mage"},
                {"id": 14, "name": "npc_dota_hero_pudge", "localized_name": "Pudge"}
            ]}}"#,
        );

        let heroes = HeroNames::load(file.path()).unwrap();
        assert_eq!(heroes.len(), 2);
        assert_eq!(heroes.name(1), "Anti-Mage");
        assert_eq!(heroes.name(14), "Pudge");
    }

    #[test]
    fn load_falls_back_to_internal_name() {
        let file = write_hero_file(
            r#"{"result": {"heroes": [{"id": 2, "name": "npc_dota_hero_axe"}]}}"#,
        );

        let heroes = HeroNames::load(file.path()).unwrap();
        assert_eq!(heroes.name(2), "npc_dota_hero_axe");
    }

    #[test]
    fn unknown_id_gets_placeholder() {
        let heroes = HeroNames::default();
        assert_eq!(heroes.name(999), "Unknown Hero 999");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(HeroNames::load("/no/such/file.json").is_err());
    }

    #[test]
    fn load_or_empty_survives_missing_file() {
        let heroes = HeroNames::load_or_empty("/no/such/file.json");
        assert!(heroes.is_empty());
        assert_eq!(heroes.name(1), "Unknown Hero 1");
    }

    #[test]
    fn load_or_empty_survives_malformed_file() {
        let file = write_hero_file("{\"result\": 42}");
        let heroes = HeroNames::load_or_empty(file.path());
        assert!(heroes.is_empty());
    }
}
