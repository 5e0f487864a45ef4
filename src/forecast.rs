//! Current weather and forecast sequences for a zone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    epoch::{align_to_epoch_start, compute_target, from_unix, WEATHER_PERIOD_SECONDS},
    error::ForecastError,
    resolver::ZoneRef,
    selector::select_weather,
    store::{ReferenceData, WeatherKind, WeatherRateTable, Zone},
};

const MAX_PREALLOCATED_ENTRIES: usize = 1024;

/// A weather and the instant it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastEntry<'a> {
    pub weather: &'a WeatherKind,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastOptions {
    pub count: usize,
    pub step_seconds: i64,
    pub offset_seconds: i64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            count: 1,
            step_seconds: WEATHER_PERIOD_SECONDS,
            offset_seconds: 0,
        }
    }
}

impl ForecastOptions {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_step(mut self, step_seconds: i64) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    pub fn with_offset(mut self, offset_seconds: i64) -> Self {
        self.offset_seconds = offset_seconds;
        self
    }
}

/// Forecast generator over shared, immutable reference data.
#[derive(Debug, Clone)]
pub struct Forecaster {
    data: Arc<ReferenceData>,
}

impl Forecaster {
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    pub fn resolve(&self, zone: ZoneRef<'_>) -> Result<&Zone, ForecastError> {
        match zone {
            ZoneRef::Id(id) => self.data.zone_by_id(id),
            ZoneRef::Name { name, language } => self.data.zone_by_name(name, language),
        }
    }

    /// Weather in effect now, shifted by `offset_seconds`.
    pub fn current_weather(
        &self,
        zone: ZoneRef<'_>,
        offset_seconds: i64,
    ) -> Result<ForecastEntry<'_>, ForecastError> {
        self.current_weather_at(zone, Utc::now(), offset_seconds)
    }

    /// Same as [`Forecaster::current_weather`] with an explicit clock reading.
    pub fn current_weather_at(
        &self,
        zone: ZoneRef<'_>,
        now: DateTime<Utc>,
        offset_seconds: i64,
    ) -> Result<ForecastEntry<'_>, ForecastError> {
        let zone = self.resolve(zone)?;
        let rates = self.data.zone_rates(zone)?;
        self.entry_for_epoch(rates, now, offset_seconds)
    }

    pub fn forecast(
        &self,
        zone: ZoneRef<'_>,
        options: &ForecastOptions,
    ) -> Result<Vec<ForecastEntry<'_>>, ForecastError> {
        self.forecast_at(zone, Utc::now(), options)
    }

    /// `options.count` entries starting at the epoch containing `now + offset`.
    /// Later entries sit `step_seconds` apart and are not re-aligned to epoch
    /// boundaries.
    pub fn forecast_at(
        &self,
        zone: ZoneRef<'_>,
        now: DateTime<Utc>,
        options: &ForecastOptions,
    ) -> Result<Vec<ForecastEntry<'_>>, ForecastError> {
        if options.count == 0 {
            return Ok(Vec::new());
        }
        if options.step_seconds <= 0 {
            return Err(ForecastError::Validation(format!(
                "forecast step must be positive, got {}s",
                options.step_seconds
            )));
        }

        let zone = self.resolve(zone)?;
        let rates = self.data.zone_rates(zone)?;

        let first = self.entry_for_epoch(rates, now, options.offset_seconds)?;
        let origin = first.start_time.timestamp();

        let mut entries = Vec::with_capacity(options.count.min(MAX_PREALLOCATED_ENTRIES));
        entries.push(first);
        for i in 1..options.count {
            let unix = (i as i64)
                .checked_mul(options.step_seconds)
                .and_then(|delta| origin.checked_add(delta))
                .ok_or_else(|| {
                    ForecastError::Validation(format!(
                        "forecast entry {i} falls outside the supported time range"
                    ))
                })?;
            let start_time = from_unix(unix)?;
            let weather = select_weather(&self.data, rates, compute_target(start_time))?;
            entries.push(ForecastEntry {
                weather,
                start_time,
            });
        }

        debug!(
            zone = zone.id,
            count = entries.len(),
            step = options.step_seconds,
            origin,
            "Forecast generated"
        );
        Ok(entries)
    }

    fn entry_for_epoch<'s>(
        &'s self,
        rates: &WeatherRateTable,
        now: DateTime<Utc>,
        offset_seconds: i64,
    ) -> Result<ForecastEntry<'s>, ForecastError> {
        let start_time = align_to_epoch_start(now, offset_seconds)?;
        let target = compute_target(start_time);
        let weather = select_weather(&self.data, rates, target)?;
        debug!(
            rate_table = rates.id,
            epoch = start_time.timestamp(),
            target,
            weather = weather.id,
            "Weather resolved"
        );
        Ok(ForecastEntry {
            weather,
            start_time,
        })
    }
}
