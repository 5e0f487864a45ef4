pub mod config;
pub mod epoch;
pub mod error;
pub mod forecast;
pub mod language;
pub mod loader;
pub mod resolver;
pub mod selector;
pub mod store;

pub use config::ForecasterConfig;
pub use error::ForecastError;
pub use forecast::{ForecastEntry, ForecastOptions, Forecaster};
pub use language::Language;
pub use loader::StoreLoader;
pub use resolver::ZoneRef;
pub use store::{RateEntry, ReferenceData, WeatherKind, WeatherRateTable, Zone};
