/// Pick an index from non-negative weights given a uniform sample in `[0, 1)`
///
/// Walks the cumulative distribution; the last positive weight absorbs any
/// floating point slack. Returns `None` when no weight is positive.
pub fn weighted_choice(weights: &[f64], unit_sample: f64) -> Option<usize> {
    let total: f64 = weights.iter().filter(|weight| **weight > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut remaining = unit_sample.clamp(0.0, 1.0) * total;
    let mut last_positive = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(i);
        if remaining < weight {
            return Some(i);
        }
        remaining -= weight;
    }
    last_positive
}

/// Share of the total weight carried by `index`
///
/// Expected selection frequency under weighted sampling; zero for an
/// out-of-range index or a non-positive total.
pub fn weight_share(weights: &[f64], index: usize) -> f64 {
    let total: f64 = weights.iter().filter(|weight| **weight > 0.0).sum();
    match weights.get(index) {
        Some(&weight) if weight > 0.0 && total > 0.0 => weight / total,
        _ => 0.0,
    }
}
