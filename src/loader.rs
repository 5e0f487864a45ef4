use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::store::{ReferenceData, WeatherKind, WeatherRateTable, Zone};

pub const WEATHER_KINDS_FILE: &str = "weatherKinds.json";
pub const WEATHER_RATE_INDICES_FILE: &str = "weatherRateIndices.json";
pub const TERRITORY_TYPES_FILE: &str = "terriTypes.json";

/// Reads the three reference tables from a store directory.
pub struct StoreLoader {
    base_dir: PathBuf,
}

impl StoreLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<ReferenceData> {
        let weather_kinds: Vec<WeatherKind> = self.read_json(WEATHER_KINDS_FILE)?;
        let rate_tables: Vec<WeatherRateTable> = self.read_json(WEATHER_RATE_INDICES_FILE)?;
        let zones: Vec<Zone> = self.read_json(TERRITORY_TYPES_FILE)?;
        let data = ReferenceData::new(weather_kinds, rate_tables, zones)
            .with_context(|| format!("Invalid reference data in {}", self.base_dir.display()))?;
        Ok(data)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read reference table {}", path.display()))?;
        let parsed = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::language::Language;

    fn write_store(dir: &Path, rates: &str) {
        fs::write(
            dir.join(WEATHER_KINDS_FILE),
            r#"[{"id":1,"name_en":"Clear Skies","name_de":"Klar"},{"id":2,"name_en":"Rain"}]"#,
        )
        .unwrap();
        fs::write(dir.join(WEATHER_RATE_INDICES_FILE), rates).unwrap();
        fs::write(
            dir.join(TERRITORY_TYPES_FILE),
            r#"[{"id":7,"weather_rate":1,"name_en":"Test Field","name_ja":"テスト"}]"#,
        )
        .unwrap();
    }

    #[test]
    fn loads_store_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_store(
            temp_dir.path(),
            r#"[{"id":1,"rates":[{"rate":30,"id":1},{"rate":100,"id":2}]}]"#,
        );

        let data = StoreLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(data.weather_kinds().len(), 2);
        assert_eq!(data.weather_kind(1).unwrap().name(Language::De), "Klar");
        let zone = data.zone_by_name("テスト", Language::Ja).unwrap();
        assert_eq!(zone.id, 7);
        assert_eq!(data.zone_rates(zone).unwrap().rates.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = StoreLoader::new(temp_dir.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains(WEATHER_KINDS_FILE));
    }

    #[test]
    fn integrity_violation_surfaces_as_forecast_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_store(
            temp_dir.path(),
            r#"[{"id":1,"rates":[{"rate":30,"id":1},{"rate":90,"id":2}]}]"#,
        );

        let err = StoreLoader::new(temp_dir.path()).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForecastError>(),
            Some(ForecastError::DataIntegrity(_))
        ));
    }
}
