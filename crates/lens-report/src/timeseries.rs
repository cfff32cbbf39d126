//! Bar ordering and visible-window selection

use crate::error::Result;
use crate::volume_profile::support_resistance;
use lens_core::{MarketBar, SupportResistanceLevel, validate_bars};
use serde::Serialize;

/// Bars added or removed per zoom step
pub const ZOOM_STEP: usize = 30;

/// Smallest window zooming in can reach
pub const MIN_VISIBLE: usize = 30;

/// Copy of `bars` sorted ascending by date
///
/// The sort is stable, so bars sharing a date keep their input order.
pub fn sort_bars(bars: &[MarketBar]) -> Vec<MarketBar> {
    let mut sorted = bars.to_vec();
    sorted.sort_by_key(|bar| bar.date);
    sorted
}

/// The latest `visible_count` bars in ascending date order
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lens_core::MarketBar;
/// use lens_report::select_window;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let bars = vec![
///     MarketBar::flat(day(3), 100.0, 10),
///     MarketBar::flat(day(1), 90.0, 10),
///     MarketBar::flat(day(2), 95.0, 10),
/// ];
///
/// let window = select_window(&bars, 2);
/// assert_eq!(window.len(), 2);
/// assert_eq!(window[0].date, day(2));
/// assert_eq!(window[1].date, day(3));
/// ```
pub fn select_window(bars: &[MarketBar], visible_count: usize) -> Vec<MarketBar> {
    let mut sorted = sort_bars(bars);
    let start = sorted.len().saturating_sub(visible_count);
    sorted.split_off(start)
}

/// Narrow the window by one step, never below [`MIN_VISIBLE`]
pub fn zoom_in(count: usize) -> usize {
    count.saturating_sub(ZOOM_STEP).max(MIN_VISIBLE)
}

/// Widen the window by one step, never beyond the series length
pub fn zoom_out(count: usize, total_len: usize) -> usize {
    count.saturating_add(ZOOM_STEP).min(total_len)
}

/// Windowed bars with the support/resistance levels found inside that window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub bars: Vec<MarketBar>,
    pub levels: Vec<SupportResistanceLevel>,
    /// Requested window size
    pub visible_count: usize,
    /// Length of the full series the window was cut from
    pub total: usize,
}

impl ChartView {
    /// Validate `bars`, cut the visible window and run the volume profile on it
    pub fn new(bars: &[MarketBar], visible_count: usize) -> Result<Self> {
        validate_bars(bars)?;
        let window = select_window(bars, visible_count);
        let levels = support_resistance(&window)?;
        Ok(Self {
            bars: window,
            levels,
            visible_count,
            total: bars.len(),
        })
    }

    /// Window size after one zoom-in step
    pub fn zoom_in_count(&self) -> usize {
        if self.total < MIN_VISIBLE {
            return self.total;
        }
        zoom_in(self.visible_count).min(self.total)
    }

    /// Window size after one zoom-out step
    pub fn zoom_out_count(&self) -> usize {
        zoom_out(self.visible_count, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(len: u32) -> Vec<MarketBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..len)
            .rev()
            .map(|i| {
                let date = start + chrono::Days::new(u64::from(i));
                MarketBar::flat(date, 1000.0 + f64::from(i), 100)
            })
            .collect()
    }

    #[test]
    fn test_select_window_is_sorted_suffix() {
        let bars = series(50);
        let sorted = sort_bars(&bars);
        for n in [0, 1, 30, 50, 80] {
            let window = select_window(&bars, n);
            assert_eq!(window.len(), n.min(50));
            assert!(window.windows(2).all(|w| w[0].date <= w[1].date));
            assert_eq!(window.as_slice(), &sorted[sorted.len() - window.len()..]);
        }
    }

    #[test]
    fn test_select_window_empty() {
        assert!(select_window(&[], 90).is_empty());
    }

    #[test]
    fn test_sort_is_stable_on_equal_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let bars = vec![
            MarketBar::flat(date, 1.0, 1),
            MarketBar::flat(date, 2.0, 1),
        ];
        let sorted = sort_bars(&bars);
        assert_eq!(sorted[0].close, 1.0);
        assert_eq!(sorted[1].close, 2.0);
    }

    #[test]
    fn test_zoom_in_floor() {
        assert_eq!(zoom_in(90), 60);
        assert_eq!(zoom_in(45), 30);
        assert_eq!(zoom_in(30), 30);
        assert_eq!(zoom_in(0), 30);
    }

    #[test]
    fn test_zoom_out_ceiling() {
        assert_eq!(zoom_out(60, 365), 90);
        assert_eq!(zoom_out(350, 365), 365);
        assert_eq!(zoom_out(30, 20), 20);
        assert_eq!(zoom_out(0, 100), 30);
    }

    #[test]
    fn test_zoom_bounds_hold() {
        for total in [0usize, 10, 29, 30, 31, 200] {
            for count in [0usize, 15, 30, 60, 250] {
                let out = zoom_out(count, total);
                if total < 30 {
                    assert_eq!(out, total);
                } else {
                    assert!((30..=total).contains(&out));
                }
            }
        }
    }

    #[test]
    fn test_chart_view() {
        let bars = series(120);
        let view = ChartView::new(&bars, 90).unwrap();
        assert_eq!(view.bars.len(), 90);
        assert_eq!(view.total, 120);
        assert_eq!(view.zoom_in_count(), 60);
        assert_eq!(view.zoom_out_count(), 120);
        assert!(view.levels.len() <= 3);
    }

    #[test]
    fn test_chart_view_rejects_nan() {
        let mut bars = series(5);
        bars[2].close = f64::NAN;
        assert!(ChartView::new(&bars, 5).is_err());
    }

    #[test]
    fn test_chart_view_empty() {
        let view = ChartView::new(&[], 90).unwrap();
        assert!(view.is_empty());
        assert!(view.levels.is_empty());
    }
}
