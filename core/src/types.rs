use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kjente variabler (kolonner) i en Timeseries.
/// Rekkefølgen i `Variable::ALL` er kanonisk kolonnerekkefølge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Time,            // sekunder fra start
    Lat,             // grader
    Lon,             // grader
    Distance,        // meter
    Altitude,        // meter
    VelocitySmooth,  // m/s
    GradeSmooth,     // prosent
    Heartrate,       // bpm
    Cadence,         // rpm / spm
    Watts,           // watt
    Temp,            // °C
    Moving,          // 1.0 / 0.0
}

impl Variable {
    pub const ALL: [Variable; 12] = [
        Variable::Time,
        Variable::Lat,
        Variable::Lon,
        Variable::Distance,
        Variable::Altitude,
        Variable::VelocitySmooth,
        Variable::GradeSmooth,
        Variable::Heartrate,
        Variable::Cadence,
        Variable::Watts,
        Variable::Temp,
        Variable::Moving,
    ];

    /// Standard-vokabular: alt unntatt `time`, som allerede ligger i indeksen.
    pub fn defaults() -> Vec<Variable> {
        Variable::ALL
            .into_iter()
            .filter(|v| *v != Variable::Time)
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variable::Time => "time",
            Variable::Lat => "lat",
            Variable::Lon => "lon",
            Variable::Distance => "distance",
            Variable::Altitude => "altitude",
            Variable::VelocitySmooth => "velocity_smooth",
            Variable::GradeSmooth => "grade_smooth",
            Variable::Heartrate => "heartrate",
            Variable::Cadence => "cadence",
            Variable::Watts => "watts",
            Variable::Temp => "temp",
            Variable::Moving => "moving",
        }
    }

    /// Strava stream-type -> Variable. Ukjente navn (inkl. `latlng`) gir None.
    pub fn from_name(name: &str) -> Option<Variable> {
        Variable::ALL.iter().copied().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stream-typen for sammensatt posisjon: hver verdi er `[lat, lon]`.
pub const LATLNG: &str = "latlng";

/// Ett rått stream-element slik Strava eksporterer det.
/// `type` er påkrevd men ubegrenset (any), `data` må være en liste.
/// Ekstra felter (series_type, resolution, ...) beholdes i `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStream {
    #[serde(rename = "type")]
    pub kind: Value,
    pub data: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawStream {
    /// Stream-navnet hvis `type` er en streng.
    pub fn name(&self) -> Option<&str> {
        self.kind.as_str()
    }
}

/// Flat-fil-varianten pakker stream-lista inn i `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamsEnvelope {
    pub data: Vec<RawStream>,
}

/// Sammendrag for én aktivitet. Kun `id`, `type` og `start_date` er påkrevd.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSummary {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
