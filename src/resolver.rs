//! Zone lookup by id or by localized name.

use std::collections::HashMap;

use tracing::debug;

use crate::{error::ForecastError, language::Language, store::Zone};

/// Positions of zones in the territory table, keyed by id and by
/// lowercased name per language. Built once when reference data loads.
#[derive(Debug, Default)]
pub struct ZoneIndex {
    by_id: HashMap<u32, usize>,
    by_name: HashMap<(Language, String), usize>,
}

impl ZoneIndex {
    pub fn build(zones: &[Zone]) -> Result<Self, ForecastError> {
        let mut index = ZoneIndex::default();
        for (position, zone) in zones.iter().enumerate() {
            if index.by_id.insert(zone.id, position).is_some() {
                return Err(ForecastError::DataIntegrity(format!(
                    "zone id {} defined more than once",
                    zone.id
                )));
            }

            for language in Language::ALL {
                let name = zone.name(language);
                if name.is_empty() {
                    continue;
                }
                let key = (language, name.to_lowercase());
                // later entries shadow earlier ones with the same name
                if let Some(previous) = index.by_name.insert(key, position) {
                    debug!(
                        name,
                        %language,
                        kept = zone.id,
                        shadowed = zones[previous].id,
                        "Duplicate zone name; keeping last entry"
                    );
                }
            }
        }
        Ok(index)
    }

    pub fn position_by_id(&self, id: u32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn position_by_name(&self, name: &str, language: Language) -> Option<usize> {
        self.by_name.get(&(language, name.to_lowercase())).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

/// How a caller identifies a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRef<'a> {
    Id(u32),
    Name { name: &'a str, language: Language },
}

impl<'a> ZoneRef<'a> {
    pub fn id(id: u32) -> Self {
        ZoneRef::Id(id)
    }

    pub fn name(name: &'a str, language: Language) -> Self {
        ZoneRef::Name { name, language }
    }

    /// Builds a reference from optional selectors; exactly one of `id` and
    /// `name` must be given. The language defaults to English.
    pub fn from_selectors(
        id: Option<u32>,
        name: Option<&'a str>,
        language: Option<Language>,
    ) -> Result<Self, ForecastError> {
        match (id, name) {
            (Some(id), None) => Ok(ZoneRef::Id(id)),
            (None, Some(name)) => Ok(ZoneRef::Name {
                name,
                language: language.unwrap_or_default(),
            }),
            (None, None) => Err(ForecastError::Validation(
                "a zone id or zone name is required".into(),
            )),
            (Some(_), Some(_)) => Err(ForecastError::Validation(
                "give either a zone id or a zone name, not both".into(),
            )),
        }
    }
}
