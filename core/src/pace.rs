use crate::config::DEFAULT_ROLLING_WINDOW_SECS;
use crate::smoothing::rolling_mean;

/// Fysiologisk modell bak NGP og TSS. Rene, tilstandsløse funksjoner.
/// Byttes ut i tester for å isolere kjernen fra selve modellen.
pub trait PaceModel {
    /// Faktor for stigning (brøk, ikke prosent): flat = 1.0, motbakke > 1.0.
    fn grade_factor(&self, grade: f64) -> f64;

    /// Reduserer en 1 Hz fartsserie (m/s) til én normalisert fart (m/s).
    /// None hvis serien er for kort eller ikke har gyldige verdier.
    fn normalize(&self, speeds_1hz: &[f64]) -> Option<f64>;

    /// Treningsbelastning fra normalisert fart, terskelfart (m/s) og varighet (sek).
    fn training_stress_score(&self, ngp_ms: f64, threshold_ms: f64, duration_secs: f64) -> f64;
}

/// Standardmodell:
/// - stigningsfaktor fra Minettis energikostkurve for løp, C(i)/C(0)
/// - normalisering: rullende snitt (30 s) → ^4-middel → fjerderot
/// - TSS = timer × IF² × 100, IF = NGP/terskel
#[derive(Debug, Clone, Copy)]
pub struct MinettiModel {
    pub window_secs: usize,
}

impl Default for MinettiModel {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_ROLLING_WINDOW_SECS,
        }
    }
}

impl MinettiModel {
    pub fn with_window(window_secs: usize) -> Self {
        Self { window_secs }
    }
}

/// Energikost (J/kg/m) ved stigning i (brøk).
fn minetti_cost(i: f64) -> f64 {
    155.4 * i.powi(5) - 30.4 * i.powi(4) - 43.3 * i.powi(3) + 46.3 * i.powi(2) + 19.5 * i + 3.6
}

impl PaceModel for MinettiModel {
    fn grade_factor(&self, grade: f64) -> f64 {
        // kurven er kun målt i [-0.45, 0.45]
        let i = grade.clamp(-0.45, 0.45);
        minetti_cost(i) / minetti_cost(0.0)
    }

    fn normalize(&self, speeds_1hz: &[f64]) -> Option<f64> {
        // vinduer med hull (NaN) telles ikke med
        let smooth: Vec<f64> = rolling_mean(speeds_1hz, self.window_secs.max(1))
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        if smooth.is_empty() {
            return None;
        }
        let fourth_power_avg =
            smooth.iter().map(|v| v.powi(4)).sum::<f64>() / smooth.len() as f64;
        Some(fourth_power_avg.powf(0.25))
    }

    fn training_stress_score(&self, ngp_ms: f64, threshold_ms: f64, duration_secs: f64) -> f64 {
        if threshold_ms <= 0.0 {
            return 0.0;
        }
        let intensity = ngp_ms / threshold_ms;
        duration_secs / 3600.0 * intensity.powi(2) * 100.0
    }
}
