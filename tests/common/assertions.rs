//! Float comparisons for colors and rendered channels.

/// Tolerance used when a caller passes `None`
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Element-wise comparison of two float slices of equal length
pub fn assert_array_approx_eq(actual: &[f32], expected: &[f32], epsilon: Option<f32>) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    let worst = actual
        .iter()
        .zip(expected)
        .enumerate()
        .map(|(i, (a, e))| (i, (a - e).abs()))
        .find(|&(_, diff)| !(diff <= eps));

    if let Some((i, diff)) = worst {
        panic!(
            "element {} off by {} (eps {}): actual {:?}, expected {:?}",
            i, diff, eps, actual, expected
        );
    }
}

/// Compare two RGB triples channel by channel
pub fn assert_color_approx_eq(actual: [f32; 3], expected: [f32; 3], epsilon: Option<f32>) {
    assert_array_approx_eq(&actual, &expected, epsilon);
}

/// Check `min <= actual <= max`
pub fn assert_in_range(actual: f32, min: f32, max: f32) {
    assert!(
        (min..=max).contains(&actual),
        "{} outside [{}, {}]",
        actual,
        min,
        max
    );
}
