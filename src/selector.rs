use crate::{
    error::ForecastError,
    store::{ReferenceData, WeatherKind, WeatherRateTable},
};

/// Weather for `target` under `table`: the first band whose threshold is
/// strictly greater than the target wins.
pub fn select_weather<'a>(
    data: &'a ReferenceData,
    table: &WeatherRateTable,
    target: u8,
) -> Result<&'a WeatherKind, ForecastError> {
    let entry = table
        .rates
        .iter()
        .find(|entry| target < entry.threshold)
        .ok_or_else(|| {
            ForecastError::DataIntegrity(format!(
                "rate table {} has no band for target {target}",
                table.id
            ))
        })?;

    data.weather_kind(entry.weather_id).ok_or_else(|| {
        ForecastError::DataIntegrity(format!(
            "rate table {} references unknown weather {}",
            table.id, entry.weather_id
        ))
    })
}
