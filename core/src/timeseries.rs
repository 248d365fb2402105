use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::error::ExtractError;
use crate::types::Variable;

/// Tidsindeksert tabell for én aktivitet.
///
/// Invarianter (sjekkes i `Timeseries::new`):
/// - indeksen er strengt stigende (sortert, ingen duplikater)
/// - hver kolonne er like lang som indeksen
/// - ingen variabel forekommer to ganger
///
/// Kolonnene ligger i kanonisk rekkefølge (samme som vokabularet).
/// Verdien er uforanderlig etter konstruksjon.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeseries {
    index: Vec<DateTime<FixedOffset>>,
    columns: Vec<(Variable, Vec<f64>)>,
}

impl Timeseries {
    /// Bygger en validert Timeseries.
    /// Null rader gir `Ok(None)` – tom tabell er "ingen data", ikke en feil.
    pub fn new(
        index: Vec<DateTime<FixedOffset>>,
        columns: Vec<(Variable, Vec<f64>)>,
    ) -> Result<Option<Self>, ExtractError> {
        if index.is_empty() {
            return Ok(None);
        }
        let errors = Self::validation_errors(&index, &columns);
        if !errors.is_empty() {
            return Err(ExtractError::Validation(errors));
        }
        Ok(Some(Self { index, columns }))
    }

    /// Alle brudd på invariantene, én melding per brudd.
    pub fn validation_errors(
        index: &[DateTime<FixedOffset>],
        columns: &[(Variable, Vec<f64>)],
    ) -> Vec<String> {
        let mut errors = Vec::new();

        let mut duplicates = 0usize;
        let mut unsorted = 0usize;
        for pair in index.windows(2) {
            if pair[1] == pair[0] {
                duplicates += 1;
            } else if pair[1] < pair[0] {
                unsorted += 1;
            }
        }
        if duplicates > 0 {
            errors.push(format!("indeksen har {duplicates} dupliserte tidsstempler"));
        }
        if unsorted > 0 {
            errors.push(format!("indeksen er ikke stigende ({unsorted} steg bakover)"));
        }

        let mut seen = HashSet::new();
        for (var, values) in columns {
            if !seen.insert(*var) {
                errors.push(format!("kolonnen {var} forekommer flere ganger"));
            }
            if values.len() != index.len() {
                errors.push(format!(
                    "kolonnen {var} har {} rader, indeksen har {}",
                    values.len(),
                    index.len()
                ));
            }
        }

        errors
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Alltid false for en konstruert Timeseries; finnes for API-symmetri.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[DateTime<FixedOffset>] {
        &self.index
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.index[0]
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.index[self.index.len() - 1]
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.columns.iter().map(|(v, _)| *v)
    }

    pub fn column(&self, var: Variable) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, values)| values.as_slice())
    }

    pub fn columns(&self) -> &[(Variable, Vec<f64>)] {
        &self.columns
    }

    /// Sekunder siden første sample, per rad.
    pub fn elapsed_secs(&self) -> Vec<f64> {
        let t0 = self.start();
        self.index.iter().map(|t| secs_between(t0, *t)).collect()
    }

    /// Total varighet (sek) fra første til siste sample.
    pub fn duration_secs(&self) -> f64 {
        secs_between(self.start(), self.end())
    }
}

fn secs_between(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// JSON-form: `{"index": [rfc3339...], "columns": {"navn": [...]}}`.
/// NaN serialiseres som null av serde_json.
impl Serialize for Timeseries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Columns<'a>(&'a [(Variable, Vec<f64>)]);

        impl Serialize for Columns<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (var, values) in self.0 {
                    map.serialize_entry(var.as_str(), values)?;
                }
                map.end()
            }
        }

        let index: Vec<String> = self.index.iter().map(|t| t.to_rfc3339()).collect();
        let mut st = serializer.serialize_struct("Timeseries", 2)?;
        st.serialize_field("index", &index)?;
        st.serialize_field("columns", &Columns(&self.columns))?;
        st.end()
    }
}
