use eframe::egui::Color32;

use crate::color::qualitative_color;
use crate::data::filter::FilteredView;
use crate::data::model::Property;

/// Standard deviation of the smoothing kernel, in samples.
pub const SMOOTHING_SIGMA: f64 = 2.0;
/// Kernel half-width in standard deviations.
pub const SMOOTHING_TRUNCATE: f64 = 4.0;

/// One property's line over the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub property: Property,
    /// `(atomic_number, value)`, ascending by atomic number.
    pub points: Vec<(u32, f64)>,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendView {
    /// No property selected.
    EmptySelection,
    /// One series per requested property, in request order. A series may be
    /// empty when the property is absent for every filtered element.
    Series(Vec<TrendSeries>),
}

/// Build per-property series over the filtered view.
///
/// Without smoothing, absent values produce no point. With smoothing the
/// absent values are filled with zero first, so the smoothed series has one
/// point per filtered element.
pub fn series(view: &FilteredView<'_>, properties: &[Property], smoothing: bool) -> TrendView {
    let mut requested: Vec<Property> = Vec::with_capacity(properties.len());
    for p in properties {
        if !requested.contains(p) {
            requested.push(*p);
        }
    }
    if requested.is_empty() {
        return TrendView::EmptySelection;
    }

    let series = requested
        .into_iter()
        .enumerate()
        .map(|(i, property)| {
            let points = if smoothing {
                let raw: Vec<f64> = view
                    .iter()
                    .map(|e| e.property(property).unwrap_or(0.0))
                    .collect();
                view.iter()
                    .map(|e| e.atomic_number)
                    .zip(gaussian_smooth(&raw, SMOOTHING_SIGMA))
                    .collect()
            } else {
                view.iter()
                    .filter_map(|e| e.property(property).map(|v| (e.atomic_number, v)))
                    .collect()
            };
            TrendSeries {
                property,
                points,
                color: qualitative_color(i),
            }
        })
        .collect();

    TrendView::Series(series)
}

// ---------------------------------------------------------------------------
// Gaussian smoothing
// ---------------------------------------------------------------------------

/// Normalised Gaussian weights for offsets `-radius..=radius`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (SMOOTHING_TRUNCATE * sigma + 0.5) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Map an out-of-range index back into `0..len` by half-sample symmetric
/// reflection (`d c b a | a b c d | d c b a`).
fn reflect(index: i64, len: usize) -> usize {
    let len = len as i64;
    let period = 2 * len;
    let j = index.rem_euclid(period);
    (if j >= len { period - 1 - j } else { j }) as usize
}

/// 1-D Gaussian filter with reflecting boundaries. Output has the same
/// length as the input.
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() || sigma <= 0.0 {
        return values.to_vec();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;

    (0..values.len() as i64)
        .map(|i| {
            kernel
                .iter()
                .zip(-radius..=radius)
                .map(|(w, offset)| w * values[reflect(i + offset, values.len())])
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::views::fixtures::sample;

    #[test]
    fn test_empty_property_list() {
        let ds = sample();
        assert_eq!(series(&FilteredView::all(&ds), &[], false), TrendView::EmptySelection);
    }

    #[test]
    fn test_unsmoothed_series_skips_absent_values() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let TrendView::Series(out) = series(&view, &[Property::MeltingPoint], false) else {
            panic!("expected series");
        };
        // Helium has no melting point.
        assert_eq!(out[0].points.len(), view.len() - 1);
        assert!(out[0].points.iter().all(|(z, _)| *z != 2));
        assert!(out[0].points.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_smoothed_series_is_dense() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let TrendView::Series(out) = series(&view, &[Property::ElectronAffinity], true) else {
            panic!("expected series");
        };
        let numbers: Vec<u32> = out[0].points.iter().map(|(z, _)| *z).collect();
        assert_eq!(numbers, view.atomic_numbers());
    }

    #[test]
    fn test_smoothing_fills_absent_values_with_zero() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let TrendView::Series(out) = series(&view, &[Property::ElectronAffinity], true) else {
            panic!("expected series");
        };

        // Helium, Actinium and Uranium have no electron affinity.
        let filled = [0.754, 0.0, 0.618, 1.262, 0.151, 0.55, 0.47, 0.5, 0.0, 0.0];
        let expected = gaussian_smooth(&filled, SMOOTHING_SIGMA);
        assert_eq!(out[0].points.len(), expected.len());
        for ((_, got), want) in out[0].points.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }

        // The gap at Helium picks up weight from its neighbours.
        let (z, helium) = out[0].points[1];
        assert_eq!(z, 2);
        assert!(helium > 0.0);

        // Filling with the mean instead would give a different series.
        let present: Vec<f64> = filled.iter().copied().filter(|v| *v != 0.0).collect();
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        let mean_filled: Vec<f64> = filled.iter().map(|v| if *v == 0.0 { mean } else { *v }).collect();
        let by_mean = gaussian_smooth(&mean_filled, SMOOTHING_SIGMA);
        assert!((by_mean[1] - helium).abs() > 1e-3);
    }

    #[test]
    fn test_duplicates_collapse_and_colors_cycle() {
        let ds = sample();
        let view = FilteredView::all(&ds);
        let TrendView::Series(out) = series(
            &view,
            &[Property::Density, Property::AtomicMass, Property::Density],
            false,
        ) else {
            panic!("expected series");
        };
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].color, qualitative_color(0));
        assert_eq!(out[1].color, qualitative_color(1));
    }

    #[test]
    fn test_kernel_is_normalised_with_radius_eight() {
        let kernel = gaussian_kernel(2.0);
        assert_eq!(kernel.len(), 17);
        assert_relative_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel[0], kernel[16]);
    }

    #[test]
    fn test_reflect_is_half_sample_symmetric() {
        let mapped: Vec<usize> = (-4..8).map(|i| reflect(i, 4)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect(-5, 1), 0);
    }

    #[test]
    fn test_constant_signal_is_unchanged() {
        let out = gaussian_smooth(&[3.5; 5], 2.0);
        for v in out {
            assert_relative_eq!(v, 3.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_impulse_spreads_symmetrically() {
        let mut signal = vec![0.0; 41];
        signal[20] = 1.0;
        let out = gaussian_smooth(&signal, 2.0);
        assert_relative_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[18], out[22], epsilon = 1e-15);
        assert!(out[20] > out[19] && out[19] > out[18]);
        assert_eq!(out[11], 0.0);
    }
}
