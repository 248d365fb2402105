use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::types::Variable;

/// Terskelfart (m/s) for 6:30/mile.
pub const DEFAULT_THRESHOLD_SPEED_MS: f64 = 4.13;
/// Rullende vindu (sek) i NGP-normaliseringen.
pub const DEFAULT_ROLLING_WINDOW_SECS: usize = 30;

/// Konfigurasjon for oversetting og metrikker.
/// Alle felter er valgfrie i JSON; manglende felter får default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// VARIABLES – kjente kolonner, i kanonisk rekkefølge.
    /// Ta med `time` for å beholde elapsed-sekundene som kolonne.
    pub variables: Vec<Variable>,
    /// Referanse-terskelfart for TSS (m/s).
    pub threshold_speed_ms: f64,
    /// Lokal tidssone for PMC-dato.
    pub local_tz: Tz,
    pub rolling_window_secs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variables: Variable::defaults(),
            threshold_speed_ms: DEFAULT_THRESHOLD_SPEED_MS,
            local_tz: chrono_tz::US::Arizona,
            rolling_window_secs: DEFAULT_ROLLING_WINDOW_SECS,
        }
    }
}
