/// Cosine similarity between two embedding vectors.
///
/// Mismatched dimensions and zero-norm vectors yield 0.0 rather than an
/// error; both only arise from a broken embedding backend.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Clamp a raw similarity into [-1, 1] to absorb floating-point drift.
pub fn clamp_similarity(sim: f64) -> f64 {
    sim.clamp(-1.0, 1.0)
}

/// Affine rescale of a clamped similarity onto the 0–10 scale, rounded
/// to 2 decimal places: -1 → 0.00, 0 → 5.00, 1 → 10.00.
pub fn score_from_similarity(sim: f64) -> f64 {
    round_to(((clamp_similarity(sim) + 1.0) / 2.0) * 10.0, 2)
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
