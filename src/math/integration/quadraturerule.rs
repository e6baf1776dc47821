// ── quadrature_rule.rs ──────────────────────────────────────────────────────
//
// 單一區間上的兩個基本求積公式：
//
//   T(f,a,b) = (b-a)·(f(a) + f(b)) / 2
//   S(f,a,b) = (b-a)·(f(a) + 4·f(m) + f(b)) / 6,   m = (a+b)/2
//
// `*_from_values` 版本直接吃已算好的函數值，自適應積分器用它避免重複呼叫 f。

/// 梯形公式，f 求值兩次。
pub fn trapezoid<F>(f: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    trapezoid_from_values(b - a, f(a), f(b))
}

/// Simpson 公式，f 求值三次（a、中點、b）。
pub fn simpson<F>(f: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = (a + b) / 2.0;
    simpson_from_values(b - a, f(a), f(m), f(b))
}

pub fn trapezoid_from_values(width: f64, fa: f64, fb: f64) -> f64 {
    width * (fa + fb) / 2.0
}

pub fn simpson_from_values(width: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    width * (fa + 4.0 * fm + fb) / 6.0
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn trapezoid_is_exact_for_lines() {
        assert_eq!(trapezoid(|x| 2.0 * x + 1.0, 0.0, 2.0), 6.0);
    }

    #[test]
    fn simpson_is_exact_for_cubics() {
        let value = simpson(|x| x * x * x, 0.0, 1.0);
        assert!((value - 0.25).abs() < 1e-15);
        let value = simpson(|x| x * x + 1.0, 0.0, 2.0);
        assert!((value - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn evaluation_counts() {
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x.sin()
        };
        trapezoid(&f, 0.0, 1.0);
        assert_eq!(calls.get(), 2);
        simpson(&f, 0.0, 1.0);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn from_values_match_function_forms() {
        let f = |x: f64| x.exp();
        let (a, b) = (0.5, 1.5);
        assert_eq!(trapezoid(f, a, b), trapezoid_from_values(b - a, f(a), f(b)));
        assert_eq!(simpson(f, a, b), simpson_from_values(b - a, f(a), f(1.0), f(b)));
    }

    #[test]
    fn inverted_interval_flips_sign() {
        let forward = simpson(|x| x * x, 0.0, 1.0);
        let backward = simpson(|x| x * x, 1.0, 0.0);
        assert_eq!(forward, -backward);
    }
}
