//! Min/max normalization for the small summary-card charts.

/// Map each value to a height in `[0.1 * height, 0.9 * height]`, measured
/// from the bottom. The minimum lands at the low edge and the maximum at the
/// high edge; a flat series sits in the middle.
pub fn normalize(values: &[f64], height: f64) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if range > 0.0 {
                (v - min) / range * height * 0.8 + height * 0.1
            } else {
                height * 0.5
            }
        })
        .collect()
}

/// Sample values shown on the daily-price, weekly-price and volume cards.
pub const DAILY_PRICE: [f64; 7] = [42.0, 44.0, 43.0, 45.0, 46.0, 45.0, 45.23];
pub const WEEKLY_PRICE: [f64; 7] = [46.0, 45.0, 44.0, 45.0, 44.5, 44.8, 44.87];
pub const DAILY_VOLUME: [f64; 7] = [800.0, 950.0, 1100.0, 1200.0, 1150.0, 1250.0, 1234.0];
