use crate::error::MetricError;

/// Øvre grense for rutenettet: 7 døgn i sekunder. Lengre (eller et hull i
/// `time` på den størrelsen) avvises i stedet for å allokere hele rutenettet.
pub const MAX_RESAMPLE_SECS: f64 = 7.0 * 24.0 * 3600.0;

/// Lineær resampling av en irregulær serie til et 1 Hz-rutenett.
///
/// `elapsed` må starte på 0 og være strengt stigende. Rutenettet er
/// `0, 1, ..., floor(D)` der D er siste elapsed-verdi, altså `floor(D)+1` punkter.
/// Siste punkt ligger alltid innenfor [0, D], så vi ekstrapolerer aldri.
pub fn resample_1hz(elapsed: &[f64], values: &[f64]) -> Result<Vec<f64>, MetricError> {
    if elapsed.len() != values.len() {
        return Err(MetricError::InsufficientData(format!(
            "elapsed ({}) og verdier ({}) har ulik lengde",
            elapsed.len(),
            values.len()
        )));
    }
    if elapsed.len() < 2 {
        return Err(MetricError::InsufficientData(format!(
            "trenger minst 2 samples, fikk {}",
            elapsed.len()
        )));
    }
    if elapsed[0] != 0.0 {
        return Err(MetricError::InsufficientData(format!(
            "elapsed må starte på 0, starter på {}",
            elapsed[0]
        )));
    }
    if let Some(i) = elapsed.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(MetricError::InsufficientData(format!(
            "elapsed er ikke strengt stigende ved indeks {}",
            i + 1
        )));
    }

    let total = elapsed[elapsed.len() - 1];
    if total > MAX_RESAMPLE_SECS {
        return Err(MetricError::InsufficientData(format!(
            "varighet {total} s er over grensen på {MAX_RESAMPLE_SECS} s"
        )));
    }
    let n = total.floor() as usize + 1;
    let mut out = Vec::with_capacity(n);
    let mut j = 0usize;

    for k in 0..n {
        let t = k as f64;
        // finn intervallet [elapsed[j], elapsed[j+1]] som inneholder t
        while j + 2 < elapsed.len() && elapsed[j + 1] < t {
            j += 1;
        }
        let (t0, t1) = (elapsed[j], elapsed[j + 1]);
        let (v0, v1) = (values[j], values[j + 1]);
        let w = (t - t0) / (t1 - t0);
        out.push(v0 + w * (v1 - v0));
    }

    Ok(out)
}

/// Rullende snitt med fullt vindu (som `rolling(window).mean()` uten NaN-start).
/// Kortere serie enn vinduet gir tom vektor. Et vindu med NaN gir NaN,
/// men forgifter ikke vinduene etter.
pub fn rolling_mean(xs: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || xs.len() < window {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(xs.len() - window + 1);
    let mut sum = 0.0f64;
    let mut nans = 0usize;
    for i in 0..xs.len() {
        if xs[i].is_nan() {
            nans += 1;
        } else {
            sum += xs[i];
        }
        if i >= window {
            let old = xs[i - window];
            if old.is_nan() {
                nans -= 1;
            } else {
                sum -= old;
            }
        }
        if i + 1 >= window {
            out.push(if nans > 0 { f64::NAN } else { sum / window as f64 });
        }
    }
    out
}
