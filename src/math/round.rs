// ── round.rs ────────────────────────────────────────────────────────────────

/// 十進位四捨六入五成雙（round-half-even），保留 `digits` 位小數。
///
/// 用於 cache key：同一個座標經由不同運算路徑（例如 `(a+b)/2` 在兩條遞迴分支各算一次）
/// 可能在尾端位元不同，先捨入再比對即可視為同一點。
///
/// - `digits > 22` 時把 10^digits 拆成兩段相乘，避免中間值溢位
/// - 非有限值（NaN、±inf）原樣回傳
/// - 捨入後溢位則回傳原值
pub fn round(x: f64, digits: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let (pow1, pow2) = if digits > 22 {
        (10f64.powi((digits - 22) as i32), 1e22)
    } else {
        (10f64.powi(digits as i32), 1.0)
    };

    let y = (x * pow1) * pow2;
    if !y.is_finite() {
        return x;
    }

    let mut z = y.round();
    if (y - z).abs() == 0.5 {
        z = 2.0 * (y / 2.0).round();
    }

    let rounded = (z / pow2) / pow1;
    if rounded.is_finite() { rounded } else { x }
}

/// 捨入後的座標轉成可雜湊的 key。`-0.0` 與 `0.0` 視為同一點。
pub fn rounded_key(x: f64, digits: u32) -> u64 {
    let rounded = round(x, digits);
    if rounded == 0.0 {
        0f64.to_bits()
    } else {
        rounded.to_bits()
    }
}
