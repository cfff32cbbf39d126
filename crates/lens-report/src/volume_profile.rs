//! Volume-profile support/resistance detection
//!
//! Closing prices of a window are split into [`BUCKET_COUNT`] equal-width buckets and
//! the traded volume of each bar is accumulated into its bucket. Interior buckets that
//! strictly out-trade both neighbors are candidate levels; the heaviest
//! [`MAX_LEVELS`] are reported at their bucket midpoint price.
//!
//! Candidates with equal volume are ordered by bucket index, lowest price first.

use crate::error::Result;
use lens_core::{MarketBar, SupportResistanceLevel, validate_bars};

/// Number of price buckets, independent of series length
pub const BUCKET_COUNT: usize = 20;

/// Levels reported by [`support_resistance`]
pub const MAX_LEVELS: usize = 3;

/// Accumulated volume per price bucket
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeProfile {
    min_close: f64,
    bucket_size: f64,
    volumes: [u64; BUCKET_COUNT],
}

impl VolumeProfile {
    /// Bucket the closes of `bars`; `None` for an empty series
    pub fn build(bars: &[MarketBar]) -> Result<Option<Self>> {
        validate_bars(bars)?;

        let Some(first) = bars.first() else {
            return Ok(None);
        };
        let (min_close, max_close) = bars
            .iter()
            .fold((first.close, first.close), |(lo, hi), bar| {
                (lo.min(bar.close), hi.max(bar.close))
            });

        let range = max_close - min_close;
        let bucket_size = if range > 0.0 {
            range / BUCKET_COUNT as f64
        } else {
            0.0
        };

        let mut profile = Self {
            min_close,
            bucket_size,
            volumes: [0; BUCKET_COUNT],
        };
        for bar in bars {
            let index = profile.bucket_index(bar.close);
            profile.volumes[index] = profile.volumes[index].saturating_add(bar.volume);
        }
        Ok(Some(profile))
    }

    fn bucket_index(&self, close: f64) -> usize {
        if self.bucket_size == 0.0 {
            return 0;
        }
        let raw = ((close - self.min_close) / self.bucket_size).floor();
        (raw.max(0.0) as usize).min(BUCKET_COUNT - 1)
    }

    pub fn volumes(&self) -> &[u64; BUCKET_COUNT] {
        &self.volumes
    }

    pub fn bucket_size(&self) -> f64 {
        self.bucket_size
    }

    /// Midpoint price of bucket `index`
    pub fn bucket_price(&self, index: usize) -> f64 {
        self.min_close + (index as f64 + 0.5) * self.bucket_size
    }

    /// Interior buckets strictly heavier than both neighbors
    pub fn local_maxima(&self) -> Vec<usize> {
        (1..BUCKET_COUNT - 1)
            .filter(|&i| {
                self.volumes[i] > self.volumes[i - 1] && self.volumes[i] > self.volumes[i + 1]
            })
            .collect()
    }

    /// The heaviest local maxima as price levels, heaviest first
    pub fn levels(&self) -> Vec<SupportResistanceLevel> {
        let mut peaks = self.local_maxima();
        peaks.sort_by(|&a, &b| self.volumes[b].cmp(&self.volumes[a]).then(a.cmp(&b)));
        peaks
            .into_iter()
            .take(MAX_LEVELS)
            .map(|i| SupportResistanceLevel {
                price: self.bucket_price(i),
                weight: self.volumes[i],
            })
            .collect()
    }
}

/// Up to three support/resistance levels of an already-windowed series
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lens_core::MarketBar;
/// use lens_report::support_resistance;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let bars = vec![MarketBar::flat(day, 50_000.0, 1_000); 5];
///
/// // Identical closes land in bucket 0, which is never a candidate
/// assert!(support_resistance(&bars).unwrap().is_empty());
/// assert!(support_resistance(&[]).unwrap().is_empty());
/// ```
pub fn support_resistance(bars: &[MarketBar]) -> Result<Vec<SupportResistanceLevel>> {
    Ok(VolumeProfile::build(bars)?
        .map(|profile| profile.levels())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// One bar per (close, volume) pair on consecutive days
    fn bars(points: &[(f64, u64)]) -> Vec<MarketBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        points
            .iter()
            .enumerate()
            .map(|(i, &(close, volume))| {
                MarketBar::flat(start + chrono::Days::new(i as u64), close, volume)
            })
            .collect()
    }

    /// Closes 0..=200 so that bucket `i` spans `[10i, 10i + 10)`
    fn spread(extra: &[(f64, u64)]) -> Vec<MarketBar> {
        let mut points = vec![(0.0, 1), (200.0, 1)];
        points.extend_from_slice(extra);
        bars(&points)
    }

    #[test]
    fn test_empty_series() {
        assert!(support_resistance(&[]).unwrap().is_empty());
        assert!(VolumeProfile::build(&[]).unwrap().is_none());
    }

    #[test]
    fn test_flat_series_uses_bucket_zero() {
        let series = bars(&[(700.0, 5), (700.0, 7), (700.0, 9)]);
        let profile = VolumeProfile::build(&series).unwrap().unwrap();
        assert_eq!(profile.bucket_size(), 0.0);
        assert_eq!(profile.volumes()[0], 21);
        assert_eq!(profile.volumes().iter().sum::<u64>(), 21);

        let levels = support_resistance(&series).unwrap();
        assert!(levels.len() <= 1);
        assert!(levels.iter().all(|l| l.price == 700.0));
    }

    #[test]
    fn test_max_close_lands_in_last_bucket() {
        let profile = VolumeProfile::build(&spread(&[])).unwrap().unwrap();
        assert_eq!(profile.volumes()[0], 1);
        assert_eq!(profile.volumes()[BUCKET_COUNT - 1], 1);
    }

    #[test]
    fn test_single_peak() {
        let series = spread(&[(55.0, 500), (45.0, 100), (65.0, 100)]);
        let levels = support_resistance(&series).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].weight, 500);
        assert!((levels[0].price - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_three_by_weight() {
        let series = spread(&[
            (15.0, 300),
            (55.0, 900),
            (95.0, 100),
            (135.0, 700),
            (175.0, 500),
        ]);
        let levels = support_resistance(&series).unwrap();
        let weights: Vec<u64> = levels.iter().map(|l| l.weight).collect();
        assert_eq!(weights, vec![900, 700, 500]);
        assert!((levels[0].price - 55.0).abs() < 1e-9);
        assert!((levels[1].price - 135.0).abs() < 1e-9);
        assert!((levels[2].price - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_buckets_never_candidates() {
        let series = spread(&[(1.0, 10_000), (199.0, 10_000), (105.0, 5)]);
        let levels = support_resistance(&series).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].weight, 5);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let series = spread(&[(55.0, 400), (65.0, 400)]);
        assert!(support_resistance(&series).unwrap().is_empty());
    }

    #[test]
    fn test_levels_dominate_neighbors() {
        let series = spread(&[(35.0, 80), (45.0, 120), (85.0, 60), (125.0, 95), (135.0, 30)]);
        let profile = VolumeProfile::build(&series).unwrap().unwrap();
        let volumes = profile.volumes();
        for i in profile.local_maxima() {
            assert!(volumes[i] > volumes[i - 1] && volumes[i] > volumes[i + 1]);
        }
        assert!(support_resistance(&series).unwrap().len() <= MAX_LEVELS);
    }

    #[test]
    fn test_equal_weights_lower_price_first() {
        let series = spread(&[(155.0, 250), (35.0, 250), (95.0, 250)]);
        let prices: Vec<f64> = support_resistance(&series)
            .unwrap()
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(prices, vec![35.0, 95.0, 155.0]);
    }

    #[test]
    fn test_non_finite_close_rejected() {
        let series = bars(&[(100.0, 1), (f64::INFINITY, 1)]);
        let err = support_resistance(&series).unwrap_err();
        assert!(err.to_string().contains("close"));
    }
}
