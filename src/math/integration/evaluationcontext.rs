// ── evaluation_context.rs ───────────────────────────────────────────────────

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::math::integration::quadraturerule::simpson_from_values;
use crate::math::round::rounded_key;

/// 一次頂層積分呼叫期間，被積函數的求值行為：計數，以及（可選的）快取。
///
/// 每次頂層呼叫建立一個新的 context，以 `&mut` 傳進遞迴，呼叫結束即丟棄；
/// 因此不需要 `RefCell` 或鎖。
///
/// 兩種實作的 depth guard 行為刻意不同：
/// - `PlainContext`：直接以被積函數算 Simpson，計數只加 1
/// - `CachedContext`：三個點都經過快取求值，miss 才計數
pub trait EvaluationContext {
    type Error;

    fn evaluate(&mut self, x: f64) -> Result<f64, Self::Error>;

    fn depth_limit_estimate(&mut self, a: f64, b: f64) -> Result<f64, Self::Error>;

    fn evaluations(&self) -> usize;
}

// ── 無快取版 ────────────────────────────────────────────────────────────────

pub struct PlainContext<F> {
    integrand: F,
    evaluations: usize
}

impl<F> PlainContext<F> {
    pub fn new(integrand: F) -> PlainContext<F> {
        PlainContext { integrand, evaluations: 0 }
    }
}

impl<F, E> EvaluationContext for PlainContext<F> where
    F: FnMut(f64) -> Result<f64, E> {
    type Error = E;

    fn evaluate(&mut self, x: f64) -> Result<f64, E> {
        let value = (self.integrand)(x)?;
        self.evaluations += 1;
        Ok(value)
    }

    fn depth_limit_estimate(&mut self, a: f64, b: f64) -> Result<f64, E> {
        let m = (a + b) / 2.0;
        let fa = (self.integrand)(a)?;
        let fm = (self.integrand)(m)?;
        let fb = (self.integrand)(b)?;
        self.evaluations += 1;
        Ok(simpson_from_values(b - a, fa, fm, fb))
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}

// ── 快取版 ──────────────────────────────────────────────────────────────────
//
// key 為捨入到 `digits` 位小數的座標；被積函數本身仍以未捨入的 x 呼叫。
// 被積函數假設為純函數，所以快取在整個頂層呼叫內都不失效。

pub struct CachedContext<F> {
    integrand: F,
    cache: HashMap<u64, f64>,
    digits: u32,
    evaluations: usize
}

impl<F> CachedContext<F> {
    pub fn new(integrand: F, digits: u32) -> CachedContext<F> {
        CachedContext {
            integrand,
            cache: HashMap::new(),
            digits,
            evaluations: 0
        }
    }

    pub fn cached_points(&self) -> usize {
        self.cache.len()
    }
}

impl<F, E> EvaluationContext for CachedContext<F> where
    F: FnMut(f64) -> Result<f64, E> {
    type Error = E;

    fn evaluate(&mut self, x: f64) -> Result<f64, E> {
        match self.cache.entry(rounded_key(x, self.digits)) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let value = (self.integrand)(x)?;
                self.evaluations += 1;
                Ok(*entry.insert(value))
            }
        }
    }

    fn depth_limit_estimate(&mut self, a: f64, b: f64) -> Result<f64, E> {
        let m = (a + b) / 2.0;
        let fa = self.evaluate(a)?;
        let fb = self.evaluate(b)?;
        let fm = self.evaluate(m)?;
        Ok(simpson_from_values(b - a, fa, fm, fb))
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}


#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    fn square(x: f64) -> Result<f64, Infallible> {
        Ok(x * x)
    }

    #[test]
    fn plain_counts_every_call() {
        let mut context = PlainContext::new(square);
        context.evaluate(1.0).unwrap();
        context.evaluate(1.0).unwrap();
        assert_eq!(context.evaluations(), 2);
    }

    #[test]
    fn plain_depth_limit_counts_once() {
        let mut context = PlainContext::new(square);
        let value = context.depth_limit_estimate(0.0, 1.0).unwrap();
        assert!((value - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(context.evaluations(), 1);
    }

    #[test]
    fn cached_counts_misses_only() {
        let mut context = CachedContext::new(square, 12);
        assert_eq!(context.evaluate(0.5).unwrap(), 0.25);
        assert_eq!(context.evaluate(0.5).unwrap(), 0.25);
        assert_eq!(context.evaluate(0.5 + 1e-15).unwrap(), 0.25);
        assert_eq!(context.evaluations(), 1);
        assert_eq!(context.cached_points(), 1);
    }

    #[test]
    fn cached_depth_limit_goes_through_cache() {
        let mut context = CachedContext::new(square, 12);
        context.evaluate(0.0).unwrap();
        context.evaluate(1.0).unwrap();
        let value = context.depth_limit_estimate(0.0, 1.0).unwrap();
        assert!((value - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(context.evaluations(), 3);
    }

    #[test]
    fn integrand_error_is_not_cached() {
        let mut fail = true;
        let mut context = CachedContext::new(
            |x: f64| {
                if fail {
                    fail = false;
                    Err("undefined")
                } else {
                    Ok(x)
                }
            },
            12
        );
        assert_eq!(context.evaluate(2.0), Err("undefined"));
        assert_eq!(context.evaluations(), 0);
        assert_eq!(context.evaluate(2.0), Ok(2.0));
        assert_eq!(context.evaluations(), 1);
    }
}
