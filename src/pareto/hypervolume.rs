//! Exact hypervolume and least-contributor oracle
//!
//! All functions here work in minimization space: a point contributes the
//! box between itself and the reference point, and every point must be
//! strictly better than the reference in every objective. Callers with
//! maximized objectives map them with [`Direction::to_minimization`] first.
//!
//! Two objectives use an O(n log n) sweep; more objectives are sliced along
//! the last objective recursively (exact, but cost grows steeply with both
//! front size and dimensionality). Exclusive contributions are summed
//! directly rather than taken as a difference of two totals.
//!
//! [`Direction::to_minimization`]: crate::fitness::traits::Direction::to_minimization

use crate::error::IndicatorError;

/// Relative distance by which the reference point is pushed past the worst point
pub const REFERENCE_NUDGE: f64 = 0.01;

/// Hypervolume dominated by `points` and bounded by `reference`
pub fn hypervolume<V: AsRef<[f64]>>(points: &[V], reference: &[f64]) -> Result<f64, IndicatorError> {
    let points = validate(points, reference)?;
    Ok(volume(&points, reference))
}

/// Exclusive hypervolume contribution of every point
///
/// Entry `i` is the decrease in total hypervolume when point `i` is removed.
/// Coincident points contribute zero.
///
/// Each contribution is measured inside the point's own box, in coordinates
/// relative to the point, so it stays exact when the front sits far from
/// the origin.
pub fn contributions<V: AsRef<[f64]>>(
    points: &[V],
    reference: &[f64],
) -> Result<Vec<f64>, IndicatorError> {
    let points = validate(points, reference)?;
    Ok((0..points.len())
        .map(|i| exclusive_volume(&points, i, reference))
        .collect())
}

/// Index of the point whose removal loses the least hypervolume
///
/// Ties resolve to the lowest index.
pub fn least_contributor<V: AsRef<[f64]>>(
    points: &[V],
    reference: &[f64],
) -> Result<usize, IndicatorError> {
    let contributions = contributions(points, reference)?;

    let mut best = 0;
    for (i, &c) in contributions.iter().enumerate().skip(1) {
        if c < contributions[best] {
            best = i;
        }
    }
    Ok(best)
}

/// Nadir-like reference point for a set of minimization-space points
///
/// Takes the worst (largest) value per objective and pushes it out by
/// [`REFERENCE_NUDGE`] of its magnitude, so every point strictly dominates
/// the result. A worst value of exactly zero is pushed by the nudge itself.
pub fn nadir_reference<V: AsRef<[f64]>>(points: &[V]) -> Result<Vec<f64>, IndicatorError> {
    let first = points.first().ok_or(IndicatorError::EmptySet)?.as_ref();
    let m = first.len();

    let mut worst = vec![f64::NEG_INFINITY; m];
    for (index, p) in points.iter().enumerate() {
        let p = p.as_ref();
        if p.len() != m {
            return Err(IndicatorError::DimensionMismatch {
                index,
                expected: m,
                actual: p.len(),
            });
        }
        for (objective, (&v, w)) in p.iter().zip(worst.iter_mut()).enumerate() {
            if !v.is_finite() {
                return Err(IndicatorError::NonFinite { index, objective });
            }
            *w = w.max(v);
        }
    }

    Ok(worst
        .into_iter()
        .map(|w| {
            let nudge = REFERENCE_NUDGE * w.abs();
            if nudge > 0.0 {
                w + nudge
            } else {
                w + REFERENCE_NUDGE
            }
        })
        .collect())
}

fn validate<'a, V: AsRef<[f64]>>(
    points: &'a [V],
    reference: &[f64],
) -> Result<Vec<&'a [f64]>, IndicatorError> {
    if points.is_empty() {
        return Err(IndicatorError::EmptySet);
    }
    if reference.is_empty() {
        return Err(IndicatorError::InvalidReference(
            "reference point has no objectives".to_string(),
        ));
    }
    if let Some(objective) = reference.iter().position(|r| !r.is_finite()) {
        return Err(IndicatorError::InvalidReference(format!(
            "non-finite value in objective {}",
            objective
        )));
    }

    let m = reference.len();
    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let p = p.as_ref();
            if p.len() != m {
                return Err(IndicatorError::DimensionMismatch {
                    index,
                    expected: m,
                    actual: p.len(),
                });
            }
            for (objective, (&v, &r)) in p.iter().zip(reference.iter()).enumerate() {
                if !v.is_finite() {
                    return Err(IndicatorError::NonFinite { index, objective });
                }
                if v >= r {
                    return Err(IndicatorError::ReferenceNotDominated { index, objective });
                }
            }
            Ok(p)
        })
        .collect()
}

/// Part of the box between `points[index]` and `reference` that no other
/// point covers
fn exclusive_volume(points: &[&[f64]], index: usize, reference: &[f64]) -> f64 {
    let p = points[index];
    let extent: Vec<f64> = reference.iter().zip(p).map(|(r, v)| r - v).collect();

    // Another point covers max(p, q) upwards, expressed relative to p
    let clipped: Vec<Vec<f64>> = points
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, q)| q.iter().zip(p).map(|(a, b)| (a - b).max(0.0)).collect())
        .collect();
    let clipped: Vec<&[f64]> = clipped.iter().map(Vec::as_slice).collect();

    uncovered(&clipped, &extent)
}

/// Volume of `[0, extent)` not dominated by any of the non-negative `points`
///
/// Sums slabs along the last objective, so every term is non-negative.
fn uncovered(points: &[&[f64]], extent: &[f64]) -> f64 {
    let last = extent.len() - 1;
    let mut sorted: Vec<&[f64]> = points
        .iter()
        .copied()
        .filter(|p| p[last] < extent[last])
        .collect();
    sorted.sort_by(|a, b| a[last].total_cmp(&b[last]));

    let mut total = 0.0;
    let mut floor = 0.0;
    match last {
        0 => sorted.first().map_or(extent[0], |p| p[0]),
        1 => {
            let mut width = extent[0];
            for p in sorted {
                if p[1] > floor {
                    total += (p[1] - floor) * width;
                    floor = p[1];
                }
                width = width.min(p[0]);
                if width <= 0.0 {
                    return total;
                }
            }
            total + (extent[1] - floor) * width
        }
        _ => {
            let mut active: Vec<&[f64]> = Vec::with_capacity(sorted.len());
            for p in sorted {
                if p[last] > floor {
                    let slab = uncovered(&active, &extent[..last]);
                    if slab <= 0.0 {
                        return total;
                    }
                    total += (p[last] - floor) * slab;
                    floor = p[last];
                }
                active.push(&p[..last]);
            }
            total + (extent[last] - floor) * uncovered(&active, &extent[..last])
        }
    }
}

fn volume(points: &[&[f64]], reference: &[f64]) -> f64 {
    match reference.len() {
        0 => 0.0,
        1 => {
            let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
            (reference[0] - best).max(0.0)
        }
        2 => volume_2d(points, reference),
        d => {
            let last = d - 1;
            let mut sorted: Vec<&[f64]> = points.to_vec();
            sorted.sort_by(|a, b| a[last].total_cmp(&b[last]));

            let mut total = 0.0;
            let mut active: Vec<&[f64]> = Vec::with_capacity(sorted.len());
            for (i, &p) in sorted.iter().enumerate() {
                active.push(&p[..last]);
                let upper = sorted.get(i + 1).map_or(reference[last], |q| q[last]);
                let depth = upper - p[last];
                if depth > 0.0 {
                    total += depth * volume(&active, &reference[..last]);
                }
            }
            total
        }
    }
}

fn volume_2d(points: &[&[f64]], reference: &[f64]) -> f64 {
    let mut sorted: Vec<&[f64]> = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));

    let mut area = 0.0;
    let mut ceiling = reference[1];
    for p in sorted {
        if p[1] < ceiling {
            area += (reference[0] - p[0]) * (ceiling - p[1]);
            ceiling = p[1];
        }
    }
    area
}
