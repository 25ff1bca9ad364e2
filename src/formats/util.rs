/// Maps samples onto `[0, 1]`. Data already inside the unit range is kept
/// as is, anything else is stretched between its own extremes.
fn to_unit_range(values: &[f32]) -> Vec<f32> {
    let Some((min, max)) = sample_range(values) else {
        return Vec::new();
    };
    if min >= 0.0 && max <= 1.0 {
        return values.to_vec();
    }
    let span = max - min;
    if span.abs() < f32::EPSILON {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|value| ((value - min) / span).clamp(0.0, 1.0))
        .collect()
}

pub(crate) fn to_u8_samples(values: &[f32]) -> Vec<u8> {
    to_unit_range(values)
        .into_iter()
        .map(|value| (value * f32::from(u8::MAX)).round() as u8)
        .collect()
}

pub(crate) fn to_u16_samples(values: &[f32]) -> Vec<u16> {
    to_unit_range(values)
        .into_iter()
        .map(|value| (value * f32::from(u16::MAX)).round() as u16)
        .collect()
}

fn sample_range(values: &[f32]) -> Option<(f32, f32)> {
    values.iter().copied().fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((f32::min(min, value), f32::max(max, value))),
    })
}
