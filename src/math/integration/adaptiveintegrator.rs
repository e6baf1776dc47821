// ── adaptive_integrator.rs ──────────────────────────────────────────────────
//
// 自適應二分積分。對子區間 [a,b]（深度 level）：
//
//   1. level > max_level        → 以 Simpson 估計直接結束（depth guard）
//   2. |b-a| < min_width        → 回傳 0
//   3. 求 f(a)、f(b)、f(m)，算出 T 與 S
//   4. |T-S| <= ε / 2^(level+1) → 接受 S
//   5. 否則對 [a,m]、[m,b] 以 level+1 遞迴，回傳兩者之和
//
// 容許誤差依「深度」而非子區間數量減半；這是啟發式的誤差預算，不是嚴格上界。
//
// 公開入口負責建立 context（計數器／快取），內部遞迴只接收 `&mut` context。

use std::convert::Infallible;

use tracing::{
    debug,
    trace
};

use crate::configuration::IntegrationSettings;
use crate::math::integration::evaluationcontext::{
    CachedContext,
    EvaluationContext,
    PlainContext
};
use crate::math::integration::integrationresult::IntegrationResult;
use crate::math::integration::quadraturerule::{
    simpson_from_values,
    trapezoid_from_values
};

/// 深度 `level` 的子區間可接受的 |T-S|。
pub fn local_tolerance(epsilon: f64, level: u32) -> f64 {
    epsilon / 2f64.powi(level as i32 + 1)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveIntegrator {
    settings: IntegrationSettings
}

impl AdaptiveIntegrator {
    pub fn new(settings: IntegrationSettings) -> AdaptiveIntegrator {
        AdaptiveIntegrator { settings }
    }

    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }

    /// 無快取版本，每次求值都計數。
    pub fn integrate<F>(&self, f: F, c: f64, d: f64, epsilon: f64) -> IntegrationResult
    where
        F: Fn(f64) -> f64,
    {
        let Ok(result) = self.try_integrate(|x| Ok::<f64, Infallible>(f(x)), c, d, epsilon);
        result
    }

    /// 快取版本，座標捨入後相同的點只求值一次。
    pub fn integrate_cached<F>(&self, f: F, c: f64, d: f64, epsilon: f64) -> IntegrationResult
    where
        F: Fn(f64) -> f64,
    {
        let Ok(result) = self.try_integrate_cached(|x| Ok::<f64, Infallible>(f(x)), c, d, epsilon);
        result
    }

    /// 被積函數可能失敗的版本：第一個 `Err` 會中止遞迴並原樣回傳。
    pub fn try_integrate<F, E>(&self, f: F, c: f64, d: f64, epsilon: f64) -> Result<IntegrationResult, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let mut context = PlainContext::new(f);
        let value = self.subdivide(&mut context, c, d, epsilon, 0)?;
        let result = IntegrationResult::new(value, context.evaluations());
        debug!(
            lower = c,
            upper = d,
            epsilon,
            value,
            evaluations = result.evaluations(),
            "plain adaptive integration finished"
        );
        Ok(result)
    }

    pub fn try_integrate_cached<F, E>(&self, f: F, c: f64, d: f64, epsilon: f64) -> Result<IntegrationResult, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let mut context = CachedContext::new(f, self.settings.cache_digits);
        let value = self.subdivide(&mut context, c, d, epsilon, 0)?;
        let result = IntegrationResult::new(value, context.evaluations());
        debug!(
            lower = c,
            upper = d,
            epsilon,
            value,
            evaluations = result.evaluations(),
            cached_points = context.cached_points(),
            "cached adaptive integration finished"
        );
        Ok(result)
    }

    fn subdivide<C>(&self, context: &mut C, a: f64, b: f64, epsilon: f64, level: u32) -> Result<f64, C::Error>
    where
        C: EvaluationContext,
    {
        if level > self.settings.max_level {
            trace!(a, b, level, "depth limit reached, using simpson estimate");
            return context.depth_limit_estimate(a, b);
        }

        let width = b - a;
        if width.abs() < self.settings.min_width {
            return Ok(0.0);
        }

        let fa = context.evaluate(a)?;
        let fb = context.evaluate(b)?;
        let m = (a + b) / 2.0;
        let fm = context.evaluate(m)?;

        let trapezoid = trapezoid_from_values(width, fa, fb);
        let simpson = simpson_from_values(width, fa, fm, fb);

        if (trapezoid - simpson).abs() <= local_tolerance(epsilon, level) {
            return Ok(simpson);
        }

        let left = self.subdivide(context, a, m, epsilon, level + 1)?;
        let right = self.subdivide(context, m, b, epsilon, level + 1)?;
        Ok(left + right)
    }
}

// ── 以預設設定呼叫的便利函式 ────────────────────────────────────────────────

pub fn integrate<F>(f: F, c: f64, d: f64, epsilon: f64) -> IntegrationResult
where
    F: Fn(f64) -> f64,
{
    AdaptiveIntegrator::default().integrate(f, c, d, epsilon)
}

pub fn integrate_cached<F>(f: F, c: f64, d: f64, epsilon: f64) -> IntegrationResult
where
    F: Fn(f64) -> f64,
{
    AdaptiveIntegrator::default().integrate_cached(f, c, d, epsilon)
}

pub fn try_integrate<F, E>(f: F, c: f64, d: f64, epsilon: f64) -> Result<IntegrationResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    AdaptiveIntegrator::default().try_integrate(f, c, d, epsilon)
}

pub fn try_integrate_cached<F, E>(f: F, c: f64, d: f64, epsilon: f64) -> Result<IntegrationResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    AdaptiveIntegrator::default().try_integrate_cached(f, c, d, epsilon)
}
