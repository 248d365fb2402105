pub mod config;
pub mod error;
pub mod io;
pub mod metrics;
pub mod models;
pub mod pace;
pub mod report;
pub mod repository;
pub mod smoothing;
pub mod storage;
pub mod timeseries;
pub mod translation;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use config::Config;
pub use error::{ExtractError, MetricError};
pub use metrics::{
    ngp_speed, ngp_speed_for, ngp_speed_series, pmc_fields, timeseries_for,
    training_stress_score, PmcRecord,
};
pub use models::ActivityData;
pub use pace::{MinettiModel, PaceModel};
pub use repository::{
    ExtractRepository, FindAllReport, StravaJsonDirectoryRepository, StravaJsonFileRepository,
};
pub use storage::{load_config, save_config};
pub use timeseries::Timeseries;
pub use translation::{ActivityDataTranslator, StravaApiTranslator};
pub use types::{RawStream, RawSummary, Variable};
