use serde::Serialize;

use crate::math::integration::adaptiveintegrator::AdaptiveIntegrator;
use crate::math::integration::integrationresult::IntegrationResult;

/// 同一組輸入下，無快取版與快取版的結果對照。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VariantComparison {
    plain: IntegrationResult,
    cached: IntegrationResult
}

impl VariantComparison {
    pub fn new(plain: IntegrationResult, cached: IntegrationResult) -> VariantComparison {
        VariantComparison { plain, cached }
    }

    pub fn run<F>(integrator: &AdaptiveIntegrator, f: F, c: f64, d: f64, epsilon: f64) -> VariantComparison
    where
        F: Fn(f64) -> f64,
    {
        let plain = integrator.integrate(&f, c, d, epsilon);
        let cached = integrator.integrate_cached(&f, c, d, epsilon);
        VariantComparison { plain, cached }
    }

    pub fn plain(&self) -> &IntegrationResult {
        &self.plain
    }

    pub fn cached(&self) -> &IntegrationResult {
        &self.cached
    }

    /// (無快取版誤差, 快取版誤差)
    pub fn absolute_errors(&self, reference: f64) -> (f64, f64) {
        (self.plain.absolute_error(reference), self.cached.absolute_error(reference))
    }

    /// 快取版少用的求值次數與百分比；沒有節省時為 `None`。
    pub fn evaluation_reduction(&self) -> Option<(usize, f64)> {
        let plain = self.plain.evaluations();
        let cached = self.cached.evaluations();
        if plain > cached {
            let saved = plain - cached;
            Some((saved, saved as f64 / plain as f64 * 100.0))
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_on_subdivided_run() {
        let comparison = VariantComparison::run(
            &AdaptiveIntegrator::default(),
            |x| x * x + 1.0,
            0.0,
            2.0,
            1e-4
        );
        let (saved, percent) = comparison.evaluation_reduction().unwrap();
        assert_eq!(saved, 1533 - 513);
        assert!((percent - 1020.0 / 1533.0 * 100.0).abs() < 1e-12);

        let (plain_error, cached_error) = comparison.absolute_errors(14.0 / 3.0);
        assert!(plain_error < 1e-12);
        assert_eq!(plain_error, cached_error);
    }

    #[test]
    fn no_reduction_without_subdivision() {
        let comparison = VariantComparison::run(
            &AdaptiveIntegrator::default(),
            |x| 3.0 * x,
            0.0,
            1.0,
            1e-4
        );
        assert_eq!(comparison.plain().evaluations(), 3);
        assert_eq!(comparison.cached().evaluations(), 3);
        assert!(comparison.evaluation_reduction().is_none());
    }

    #[test]
    fn serializes_to_json() {
        let comparison = VariantComparison::new(
            IntegrationResult::new(1.5, 9),
            IntegrationResult::new(1.5, 5)
        );
        let json = serde_json::to_value(comparison).unwrap();
        assert_eq!(json["plain"]["evaluations"], 9);
        assert_eq!(json["cached"]["value"], 1.5);
    }
}
