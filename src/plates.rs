/// Standard powerlifting plate denominations in kg, largest first.
pub const DEFAULT_PLATES: [f64; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

/// Guard against float dust when dividing remainders by denominations
/// (e.g. 0.049999... / 0.05 must still count as one plate).
const EPSILON: f64 = 1e-9;

/// Bar, collars and available plates. Plates must be strictly positive and
/// listed in descending order; the solver walks them in the order given.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentConfig {
    pub bar_weight: f64,
    pub collar_weight: f64,
    pub use_collars: bool,
    pub plates: Vec<f64>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            // standard powerlifting barbell weighs 20kg, collars 2.5kg each
            bar_weight: 20.0,
            collar_weight: 2.5,
            use_collars: false,
            plates: DEFAULT_PLATES.to_vec(),
        }
    }
}

impl EquipmentConfig {
    /// Weight on the bar before any plates: bar plus both collars if enabled.
    pub fn base_weight(&self) -> f64 {
        if self.use_collars {
            self.bar_weight + 2.0 * self.collar_weight
        } else {
            self.bar_weight
        }
    }
}

/// Plates stacked on ONE side of the bar as (denomination, count) pairs,
/// counts >= 1, in the denomination order of the config that produced it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PlateBreakdown {
    pub plates: Vec<(f64, u32)>,
}

impl PlateBreakdown {
    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Plate weight on one side of the bar.
    pub fn per_side(&self) -> f64 {
        self.plates.iter().map(|(d, c)| d * *c as f64).sum()
    }

    /// Total bar weight actually achievable with this breakdown.
    pub fn achieved_total(&self, config: &EquipmentConfig) -> f64 {
        config.base_weight() + 2.0 * self.per_side()
    }

    /// Signed gap between what was asked for and what is loadable:
    /// `target - achieved`. Positive means the bar is under-loaded
    /// (a remainder too small for the available plates was dropped),
    /// negative means over-loaded.
    pub fn difference(&self, target: f64, config: &EquipmentConfig) -> f64 {
        target - self.achieved_total(config)
    }

    /// One entry per physical plate on one side, for rendering the bar.
    pub fn flattened(&self) -> Vec<f64> {
        let mut out = Vec::new();
        for &(denom, count) in &self.plates {
            for _ in 0..count {
                out.push(denom);
            }
        }
        out
    }
}

/// Greedy largest-first plate loading for one side of the bar.
///
/// A target at or below the base weight yields an empty breakdown; that is
/// a valid result ("nothing loadable"), not an error, and the caller
/// decides how to present it. Any remainder smaller than the last
/// denomination is dropped and shows up only in `difference`.
///
/// Greedy minimizes plate count for the default denomination set, where
/// each step evenly covers the next. For arbitrary sets it can return a
/// non-minimal (still correct) loading; callers supplying custom plate
/// lists accept that trade.
pub fn solve(target: f64, config: &EquipmentConfig) -> PlateBreakdown {
    let base = config.base_weight();
    if target <= base {
        return PlateBreakdown::default();
    }

    let mut remaining = (target - base) / 2.0;
    let mut plates = Vec::new();

    for &denom in &config.plates {
        let count = (remaining / denom + EPSILON).floor() as u32;
        if count > 0 {
            plates.push((denom, count));
            remaining -= count as f64 * denom;
        }
    }

    PlateBreakdown { plates }
}

/// IPF color for a plate denomination, for the loading visualization.
pub fn plate_color(denom: f64) -> &'static str {
    if denom == 25.0 {
        "#dc2626" // red
    } else if denom == 20.0 {
        "#2563eb" // blue
    } else if denom == 15.0 {
        "#eab308" // yellow
    } else if denom == 10.0 {
        "#16a34a" // green
    } else if denom == 5.0 {
        "#ffffff" // white
    } else if denom == 2.5 {
        "#6b7280" // gray
    } else {
        "#c0c0c0" // silver for fractional plates
    }
}

/// White and fractional plates need dark text to stay legible.
pub fn plate_text_color(denom: f64) -> &'static str {
    if denom == 5.0 || denom == 1.25 {
        "#000"
    } else {
        "#fff"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(breakdown: &PlateBreakdown) -> Vec<(f64, u32)> {
        breakdown.plates.clone()
    }

    fn total_plate_count(breakdown: &PlateBreakdown) -> u32 {
        breakdown.plates.iter().map(|(_, c)| c).sum()
    }

    #[test]
    fn four_red_plates_per_side_for_220() {
        let config = EquipmentConfig::default();
        let breakdown = solve(220.0, &config);
        assert_eq!(counts(&breakdown), vec![(25.0, 4)]);
        assert_eq!(breakdown.achieved_total(&config), 220.0);
        assert_eq!(breakdown.difference(220.0, &config), 0.0);
    }

    #[test]
    fn mixed_denominations() {
        let config = EquipmentConfig::default();
        // (142.5 - 20) / 2 = 61.25 = 2x25 + 1x10 + 1x1.25
        let breakdown = solve(142.5, &config);
        assert_eq!(
            counts(&breakdown),
            vec![(25.0, 2), (10.0, 1), (1.25, 1)]
        );
        assert_eq!(breakdown.difference(142.5, &config), 0.0);
    }

    #[test]
    fn target_at_or_below_base_weight_is_empty() {
        let config = EquipmentConfig::default();
        for target in [0.0, 5.0, 20.0] {
            let breakdown = solve(target, &config);
            assert!(breakdown.is_empty());
            assert_eq!(breakdown.achieved_total(&config), 20.0);
        }
    }

    #[test]
    fn collars_raise_the_base_weight() {
        let config = EquipmentConfig {
            use_collars: true,
            ..EquipmentConfig::default()
        };
        assert_eq!(config.base_weight(), 25.0);

        // 25kg base leaves nothing to load at 25
        assert!(solve(25.0, &config).is_empty());

        // (75 - 25) / 2 = 25 per side
        let breakdown = solve(75.0, &config);
        assert_eq!(counts(&breakdown), vec![(25.0, 1)]);
        assert_eq!(breakdown.achieved_total(&config), 75.0);
    }

    #[test]
    fn unrepresentable_remainder_is_dropped_and_signed_positive() {
        let config = EquipmentConfig::default();
        // (123 - 20) / 2 = 51.5 = 2x25 + 1x1.25, leaving 0.25 per side
        let breakdown = solve(123.0, &config);
        assert_eq!(counts(&breakdown), vec![(25.0, 2), (1.25, 1)]);
        assert_eq!(breakdown.achieved_total(&config), 122.5);
        let diff = breakdown.difference(123.0, &config);
        assert!(diff > 0.0, "under-loaded bar must give positive difference");
        assert!((diff - 0.5).abs() < 1e-9);
    }

    #[test]
    fn solver_is_pure_and_idempotent() {
        let config = EquipmentConfig::default();
        let first = solve(187.5, &config);
        let second = solve(187.5, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn achieved_total_never_exceeds_target() {
        let config = EquipmentConfig::default();
        let mut target = 20.0;
        while target <= 300.0 {
            let breakdown = solve(target, &config);
            assert!(
                breakdown.achieved_total(&config) <= target + 1e-9,
                "overshot at target {target}"
            );
            target += 0.5;
        }
    }

    #[test]
    fn plate_count_monotone_in_target() {
        // Greedy never drops below the previous count except when a
        // rollover swaps small plates for one larger one; either way the
        // achieved weight must keep up with the target.
        let config = EquipmentConfig::default();
        let mut prev_achieved = 0.0;
        let mut target = 22.5;
        while target <= 250.0 {
            let breakdown = solve(target, &config);
            let achieved = breakdown.achieved_total(&config);
            assert!(achieved >= prev_achieved, "regressed at target {target}");
            prev_achieved = achieved;
            target += 2.5;
        }
    }

    #[test]
    fn fractional_remainders_do_not_lose_a_plate_to_float_dust() {
        let config = EquipmentConfig::default();
        // (102.5 - 20) / 2 = 41.25; the trailing 1.25 must survive the
        // repeated float subtraction.
        let breakdown = solve(102.5, &config);
        assert_eq!(
            counts(&breakdown),
            vec![(25.0, 1), (15.0, 1), (1.25, 1)]
        );
        assert_eq!(breakdown.difference(102.5, &config), 0.0);
    }

    #[test]
    fn custom_plate_sets_are_walked_in_given_order() {
        let config = EquipmentConfig {
            plates: vec![20.0, 15.0, 5.0],
            ..EquipmentConfig::default()
        };
        // (100 - 20) / 2 = 40 = 2x20
        let breakdown = solve(100.0, &config);
        assert_eq!(counts(&breakdown), vec![(20.0, 2)]);
        assert_eq!(total_plate_count(&breakdown), 2);
    }

    #[test]
    fn flattened_repeats_each_plate() {
        let breakdown = PlateBreakdown {
            plates: vec![(25.0, 2), (2.5, 1)],
        };
        assert_eq!(breakdown.flattened(), vec![25.0, 25.0, 2.5]);
    }
}
