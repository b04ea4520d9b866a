//! Bracketing interpolation over unordered sample sets.

use crate::error::{PropError, PropResult};
use crate::table::CompressionSample;
use rc_core::numeric::{Tolerances, lerp, nearly_equal};

/// Half-width of the entropy window applied inside each pressure group.
pub const ENTROPY_WINDOW: f64 = 0.4;

/// Interpolate `value` as a function of `key` at `x`.
///
/// Selects the sample with the greatest key `<= x` and the one with the
/// smallest key `>= x` from the full set; the order of `samples` does not
/// matter. Outside the key range the nearest bound is returned unchanged
/// (flat extrapolation). A bound that lands exactly on a sample returns that
/// sample's value with no arithmetic.
pub fn interpolate_1d<T>(
    x: f64,
    samples: &[T],
    key: impl Fn(&T) -> f64,
    value: impl Fn(&T) -> f64,
    what: &'static str,
) -> PropResult<f64> {
    if samples.is_empty() {
        return Err(PropError::NoData { what });
    }
    if !x.is_finite() {
        return Err(PropError::InvalidArg {
            what: "lookup key must be finite",
        });
    }

    let mut lower: Option<usize> = None;
    let mut upper: Option<usize> = None;
    for (i, sample) in samples.iter().enumerate() {
        let k = key(sample);
        if k <= x && lower.is_none_or(|j| k >= key(&samples[j])) {
            lower = Some(i);
        }
        if k >= x && upper.is_none_or(|j| k < key(&samples[j])) {
            upper = Some(i);
        }
    }

    match (lower, upper) {
        (Some(lo), Some(hi)) if lo == hi => Ok(value(&samples[lo])),
        (Some(lo), Some(hi)) => {
            let (a, b) = (&samples[lo], &samples[hi]);
            Ok(lerp(x, key(a), key(b), value(a), value(b)))
        }
        (Some(only), None) | (None, Some(only)) => Ok(value(&samples[only])),
        (None, None) => Err(PropError::InvalidArg {
            what: "lookup key is not comparable with sample keys",
        }),
    }
}

/// Enthalpy at `(pressure, entropy)` over a compression grid.
///
/// Samples are grouped by pressure (within [`Tolerances::default`]) and the
/// two groups *nearest* the target pressure are used, whether or not they
/// bracket it. Near the edges of the grid this extrapolates linearly from the
/// two closest groups instead of interpolating.
pub fn interpolate_2d(
    pressure: f64,
    entropy: f64,
    grid: &[CompressionSample],
) -> PropResult<f64> {
    if grid.is_empty() {
        return Err(PropError::NoData {
            what: "compression grid",
        });
    }
    if !pressure.is_finite() || !entropy.is_finite() {
        return Err(PropError::InvalidArg {
            what: "pressure and entropy must be finite",
        });
    }

    let mut groups: Vec<(f64, Vec<CompressionSample>)> = Vec::new();
    for sample in grid {
        match groups
            .iter_mut()
            .find(|(p, _)| nearly_equal(*p, sample.pressure_pa, Tolerances::default()))
        {
            Some((_, members)) => members.push(*sample),
            None => groups.push((sample.pressure_pa, vec![*sample])),
        }
    }
    // Stable: equidistant groups keep their first-seen order.
    groups.sort_by(|a, b| (a.0 - pressure).abs().total_cmp(&(b.0 - pressure).abs()));

    let along_entropy = |members: &[CompressionSample]| {
        interpolate_1d(
            entropy,
            members,
            |c| c.entropy,
            |c| c.enthalpy,
            "compression group",
        )
    };

    if groups.len() < 2 {
        return along_entropy(&groups[0].1);
    }

    let windowed = |members: &[CompressionSample]| {
        let near: Vec<CompressionSample> = members
            .iter()
            .filter(|c| (c.entropy - entropy).abs() <= ENTROPY_WINDOW)
            .copied()
            .collect();
        if near.is_empty() { members.to_vec() } else { near }
    };

    let (p_low, low) = (&groups[0].0, windowed(&groups[0].1));
    let (p_high, high) = (&groups[1].0, windowed(&groups[1].1));
    let h_low = along_entropy(&low)?;
    let h_high = along_entropy(&high)?;

    Ok(lerp(pressure, *p_low, *p_high, h_low, h_high))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<(f64, f64)> {
        vec![(1.0, 10.0), (2.0, 20.0), (4.0, 40.0)]
    }

    fn lookup(x: f64, data: &[(f64, f64)]) -> PropResult<f64> {
        interpolate_1d(x, data, |p| p.0, |p| p.1, "test")
    }

    #[test]
    fn empty_set_is_no_data() {
        let err = lookup(1.0, &[]).unwrap_err();
        assert_eq!(err, PropError::NoData { what: "test" });
    }

    #[test]
    fn node_hit_is_exact() {
        assert_eq!(lookup(2.0, &pts()).unwrap(), 20.0);
    }

    #[test]
    fn interior_is_linear() {
        assert!((lookup(3.0, &pts()).unwrap() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn flat_extrapolation_both_ends() {
        assert_eq!(lookup(-5.0, &pts()).unwrap(), 10.0);
        assert_eq!(lookup(100.0, &pts()).unwrap(), 40.0);
    }

    #[test]
    fn order_of_samples_does_not_matter() {
        let shuffled = vec![(4.0, 40.0), (1.0, 10.0), (2.0, 20.0)];
        assert!((lookup(3.0, &shuffled).unwrap() - 30.0).abs() < 1e-12);
        assert_eq!(lookup(0.0, &shuffled).unwrap(), 10.0);
    }

    #[test]
    fn nan_key_is_rejected() {
        assert!(matches!(
            lookup(f64::NAN, &pts()),
            Err(PropError::InvalidArg { .. })
        ));
    }

    fn grid(rows: &[(f64, f64, f64)]) -> Vec<CompressionSample> {
        rows.iter()
            .map(|&(pressure_pa, entropy, enthalpy)| CompressionSample {
                pressure_pa,
                entropy,
                enthalpy,
            })
            .collect()
    }

    #[test]
    fn single_group_interpolates_along_entropy() {
        let g = grid(&[(2.0e5, 1.0, 220.0), (2.0e5, 1.2, 250.0)]);
        let h = interpolate_2d(9.0e5, 1.1, &g).unwrap();
        assert!((h - 235.0).abs() < 1e-9);
    }

    #[test]
    fn two_groups_interpolate_between_pressures() {
        let g = grid(&[
            (2.0e5, 1.0, 220.0),
            (2.0e5, 1.2, 250.0),
            (3.0e5, 1.0, 230.0),
            (3.0e5, 1.2, 260.0),
        ]);
        let h = interpolate_2d(2.5e5, 1.1, &g).unwrap();
        assert!((h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn nearly_equal_pressures_share_a_group() {
        let g = grid(&[
            (2.0e5, 1.0, 220.0),
            (2.0e5 * (1.0 + 1e-12), 1.2, 250.0),
            (3.0e5, 1.0, 230.0),
            (3.0e5, 1.2, 260.0),
        ]);
        let h = interpolate_2d(2.0e5, 1.1, &g).unwrap();
        assert!((h - 235.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_groups_extrapolate_past_the_grid() {
        let g = grid(&[
            (2.0e5, 1.0, 220.0),
            (4.0e5, 1.0, 240.0),
            (5.0e5, 1.0, 250.0),
        ]);
        // 5e5 and 4e5 are nearest to 7e5; the line through them continues to 270.
        let h = interpolate_2d(7.0e5, 1.0, &g).unwrap();
        assert!((h - 270.0).abs() < 1e-9);
    }

    #[test]
    fn entropy_window_falls_back_to_whole_group() {
        let g = grid(&[(2.0e5, 1.0, 220.0), (3.0e5, 1.0, 230.0)]);
        // Target entropy far outside ±0.4: each group falls back to its full set.
        let h = interpolate_2d(2.0e5, 3.0, &g).unwrap();
        assert_eq!(h, 220.0);
    }

    #[test]
    fn empty_grid_is_no_data() {
        assert!(matches!(
            interpolate_2d(3.0e5, 1.1, &[]),
            Err(PropError::NoData { .. })
        ));
    }
}
