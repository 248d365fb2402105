use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::config::Config;
use crate::metrics::{ngp_speed_for, pmc_fields, timeseries_for};
use crate::pace::MinettiModel;
use crate::repository::{ExtractRepository, StravaJsonDirectoryRepository, StravaJsonFileRepository};
use crate::storage::load_config;
use crate::translation::StravaApiTranslator;

// ──────────────────────────────────────────────────────────────────────────────
// Hjelpere
// ──────────────────────────────────────────────────────────────────────────────

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn resolve_config(config_path: Option<&str>) -> PyResult<Config> {
    match config_path {
        Some(p) => load_config(p).map_err(to_py_err),
        None => Ok(Config::default()),
    }
}

/// "directory" → activities/{id}/..., "file" → activities.jl + streams/
fn open_repo(root: &str, layout: &str, cfg: &Config) -> PyResult<Box<dyn ExtractRepository>> {
    let translator = StravaApiTranslator::new(cfg.variables.clone());
    match layout {
        "directory" => Ok(Box::new(StravaJsonDirectoryRepository::with_translator(root, translator))),
        "file" => Ok(Box::new(StravaJsonFileRepository::with_translator(root, translator))),
        other => Err(PyValueError::new_err(format!(
            "ukjent layout {other:?} (forventet \"directory\" eller \"file\")"
        ))),
    }
}

// Returnér som Python-objekt via json.loads (unngår pyo3 serde-feature)
fn json_to_py(py: Python<'_>, json: &str) -> PyResult<PyObject> {
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    let obj = json_mod.call_method1("loads", (json,))?;
    Ok(obj.into_py(py))
}

// ──────────────────────────────────────────────────────────────────────────────
// Funksjoner
// ──────────────────────────────────────────────────────────────────────────────

/// Timeseries for én aktivitet som dict (`index`, `columns`), eller None.
#[pyfunction]
#[pyo3(signature = (root, activity_id, layout = "directory", config_path = None))]
fn timeseries(
    py: Python<'_>,
    root: &str,
    activity_id: i64,
    layout: &str,
    config_path: Option<&str>,
) -> PyResult<Option<PyObject>> {
    let cfg = resolve_config(config_path)?;
    let repo = open_repo(root, layout, &cfg)?;
    match timeseries_for(repo.as_ref(), activity_id).map_err(to_py_err)? {
        Some(ts) => {
            let json = serde_json::to_string(&ts).map_err(to_py_err)?;
            json_to_py(py, &json).map(Some)
        }
        None => Ok(None),
    }
}

/// NGP-fart (m/s) for én aktivitet, eller None.
#[pyfunction]
#[pyo3(signature = (root, activity_id, layout = "directory", config_path = None))]
fn ngp_speed(
    root: &str,
    activity_id: i64,
    layout: &str,
    config_path: Option<&str>,
) -> PyResult<Option<f64>> {
    let cfg = resolve_config(config_path)?;
    let repo = open_repo(root, layout, &cfg)?;
    let model = MinettiModel::with_window(cfg.rolling_window_secs);
    ngp_speed_for(repo.as_ref(), activity_id, &model).map_err(to_py_err)
}

/// PMC-tabellen som liste av dicts (`recorded`, `type`, `TSS`).
#[pyfunction]
#[pyo3(signature = (root, layout = "directory", config_path = None))]
fn pmc_records(
    py: Python<'_>,
    root: &str,
    layout: &str,
    config_path: Option<&str>,
) -> PyResult<PyObject> {
    let cfg = resolve_config(config_path)?;
    let repo = open_repo(root, layout, &cfg)?;
    let model = MinettiModel::with_window(cfg.rolling_window_secs);
    let records = pmc_fields(repo.as_ref(), &model, &cfg).map_err(to_py_err)?;
    let json = serde_json::to_string(&records).map_err(to_py_err)?;
    json_to_py(py, &json)
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn runload_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(timeseries, m)?)?;
    m.add_function(wrap_pyfunction!(ngp_speed, m)?)?;
    m.add_function(wrap_pyfunction!(pmc_records, m)?)?;
    Ok(())
}
