use serde::Serialize;

use crate::timeseries::Timeseries;

/// Én aktivitet: id, type og (valgfri) Timeseries.
/// `timeseries` er None når aktiviteten ikke hadde brukbare streams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityData {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub timeseries: Option<Timeseries>,
}

impl ActivityData {
    pub fn new(id: i64, kind: impl Into<String>, timeseries: Option<Timeseries>) -> Self {
        Self {
            id,
            kind: kind.into(),
            timeseries,
        }
    }

    pub fn get_timeseries(&self) -> Option<&Timeseries> {
        self.timeseries.as_ref()
    }
}
