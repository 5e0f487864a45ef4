//! Immutable reference tables: weather kinds, rate tables and territories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::ForecastError,
    language::{Language, LocalizedNames},
    resolver::ZoneIndex,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherKind {
    pub id: u32,
    #[serde(flatten)]
    pub names: LocalizedNames,
}

impl WeatherKind {
    pub fn name(&self, language: Language) -> &str {
        self.names.get(language)
    }
}

/// One band of a rate table: targets below `threshold` (and above the previous
/// band) map to `weather_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    #[serde(rename = "rate")]
    pub threshold: u8,
    #[serde(rename = "id")]
    pub weather_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRateTable {
    pub id: u32,
    pub rates: Vec<RateEntry>,
}

/// A territory with its own weather profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    #[serde(rename = "weather_rate")]
    pub weather_rate_id: u32,
    #[serde(flatten)]
    pub names: LocalizedNames,
}

impl Zone {
    pub fn name(&self, language: Language) -> &str {
        self.names.get(language)
    }
}

/// Validated, read-only view over all reference tables.
#[derive(Debug)]
pub struct ReferenceData {
    weather_kinds: Vec<WeatherKind>,
    rate_tables: HashMap<u32, WeatherRateTable>,
    zones: Vec<Zone>,
    index: ZoneIndex,
}

impl ReferenceData {
    pub fn new(
        weather_kinds: Vec<WeatherKind>,
        rate_tables: Vec<WeatherRateTable>,
        zones: Vec<Zone>,
    ) -> Result<Self, ForecastError> {
        for (position, kind) in weather_kinds.iter().enumerate() {
            if kind.id as usize != position + 1 {
                return Err(ForecastError::DataIntegrity(format!(
                    "weather kind at position {position} has id {}, expected {}",
                    kind.id,
                    position + 1
                )));
            }
        }

        let mut tables = HashMap::with_capacity(rate_tables.len());
        for table in rate_tables {
            validate_rates(&table, weather_kinds.len())?;
            let id = table.id;
            if tables.insert(id, table).is_some() {
                return Err(ForecastError::DataIntegrity(format!(
                    "rate table {id} defined more than once"
                )));
            }
        }

        for zone in &zones {
            if !tables.contains_key(&zone.weather_rate_id) {
                return Err(ForecastError::DataIntegrity(format!(
                    "zone {} references unknown rate table {}",
                    zone.id, zone.weather_rate_id
                )));
            }
        }

        let index = ZoneIndex::build(&zones)?;
        info!(
            weather_kinds = weather_kinds.len(),
            rate_tables = tables.len(),
            zones = zones.len(),
            "Reference data ready"
        );

        Ok(Self {
            weather_kinds,
            rate_tables: tables,
            zones,
            index,
        })
    }

    pub fn weather_kinds(&self) -> &[WeatherKind] {
        &self.weather_kinds
    }

    /// Weather kinds are 1-indexed: id `n` lives at position `n - 1`.
    pub fn weather_kind(&self, id: u32) -> Option<&WeatherKind> {
        let position = (id as usize).checked_sub(1)?;
        self.weather_kinds.get(position)
    }

    pub fn rate_table(&self, id: u32) -> Option<&WeatherRateTable> {
        self.rate_tables.get(&id)
    }

    /// Rate table the zone points at.
    pub fn zone_rates(&self, zone: &Zone) -> Result<&WeatherRateTable, ForecastError> {
        self.rate_table(zone.weather_rate_id).ok_or_else(|| {
            ForecastError::DataIntegrity(format!(
                "zone {} references unknown rate table {}",
                zone.id, zone.weather_rate_id
            ))
        })
    }

    pub fn zone_by_id(&self, id: u32) -> Result<&Zone, ForecastError> {
        self.index
            .position_by_id(id)
            .map(|position| &self.zones[position])
            .ok_or(ForecastError::ZoneNotFound(id))
    }

    /// Case-insensitive exact match on the zone's name in `language`.
    pub fn zone_by_name(&self, name: &str, language: Language) -> Result<&Zone, ForecastError> {
        self.index
            .position_by_name(name, language)
            .map(|position| &self.zones[position])
            .ok_or_else(|| ForecastError::ZoneNameNotFound {
                name: name.to_string(),
                language,
            })
    }
}

fn validate_rates(table: &WeatherRateTable, weather_kind_count: usize) -> Result<(), ForecastError> {
    let mut previous = 0_u8;
    for entry in &table.rates {
        if entry.threshold <= previous || entry.threshold > 100 {
            return Err(ForecastError::DataIntegrity(format!(
                "rate table {} has threshold {} after {previous}; thresholds must increase within (0, 100]",
                table.id, entry.threshold
            )));
        }
        if entry.weather_id == 0 || entry.weather_id as usize > weather_kind_count {
            return Err(ForecastError::DataIntegrity(format!(
                "rate table {} references unknown weather {}",
                table.id, entry.weather_id
            )));
        }
        previous = entry.threshold;
    }
    if previous != 100 {
        return Err(ForecastError::DataIntegrity(format!(
            "rate table {} ends at {previous} instead of 100",
            table.id
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn kinds(names: &[&str]) -> Vec<WeatherKind> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| WeatherKind {
                id: i as u32 + 1,
                names: LocalizedNames::english(*name),
            })
            .collect()
    }

    pub(crate) fn table(id: u32, rates: &[(u8, u32)]) -> WeatherRateTable {
        WeatherRateTable {
            id,
            rates: rates
                .iter()
                .map(|&(threshold, weather_id)| RateEntry {
                    threshold,
                    weather_id,
                })
                .collect(),
        }
    }

    pub(crate) fn zone(id: u32, weather_rate_id: u32, name: &str) -> Zone {
        Zone {
            id,
            weather_rate_id,
            names: LocalizedNames::english(name),
        }
    }

    #[test]
    fn accepts_consistent_tables() {
        let data = ReferenceData::new(
            kinds(&["Clear Skies", "Fair Skies", "Clouds"]),
            vec![table(1, &[(25, 1), (60, 2), (100, 3)])],
            vec![zone(10, 1, "Somewhere"), zone(11, 1, "Elsewhere")],
        )
        .unwrap();

        assert_eq!(data.weather_kind(2).unwrap().name(Language::En), "Fair Skies");
        assert!(data.weather_kind(0).is_none());
        assert!(data.weather_kind(4).is_none());
        assert_eq!(data.zone_by_id(11).unwrap().name(Language::En), "Elsewhere");
    }

    #[test]
    fn rejects_table_not_ending_at_one_hundred() {
        let err = ReferenceData::new(
            kinds(&["Clear Skies"]),
            vec![table(1, &[(50, 1), (90, 1)])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let err = ReferenceData::new(
            kinds(&["Clear Skies", "Rain"]),
            vec![table(1, &[(50, 1), (50, 2), (100, 1)])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));
    }

    #[test]
    fn rejects_unknown_weather_and_table_references() {
        let err = ReferenceData::new(kinds(&["Clear Skies"]), vec![table(1, &[(100, 2)])], vec![])
            .unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));

        let err = ReferenceData::new(
            kinds(&["Clear Skies"]),
            vec![table(1, &[(100, 1)])],
            vec![zone(5, 9, "Nowhere")],
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));
    }

    #[test]
    fn rejects_sparse_weather_ids() {
        let mut weather = kinds(&["Clear Skies", "Rain"]);
        weather[1].id = 3;
        let err = ReferenceData::new(weather, vec![], vec![]).unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));
    }

    #[test]
    fn missing_zone_id_is_not_found() {
        let data = ReferenceData::new(
            kinds(&["Clear Skies"]),
            vec![table(1, &[(100, 1)])],
            vec![zone(10, 1, "Somewhere")],
        )
        .unwrap();
        assert_eq!(data.zone_by_id(99).unwrap_err(), ForecastError::ZoneNotFound(99));
    }
}
