//! Signal level measurement over decoded samples.
//!
//! Small helpers for the usual "is anyone talking" consumer: drive an
//! indicator LED or a level bar from a captured buffer without a full
//! analysis pipeline. Levels are normalized to `0.0..=1.0` relative to
//! full scale.

/// Peak level: the maximum absolute sample value, normalized to full
/// scale. Returns 0.0 for an empty slice.
pub fn peak(samples: &[i16]) -> f32 {
    let mut max = 0i32;
    for &s in samples {
        // -32768 has no i16 absolute value; widen first.
        let mag = (s as i32).abs();
        if mag > max {
            max = mag;
        }
    }
    max as f32 / 32767.0
}

/// RMS level, normalized to full scale. Returns 0.0 for an empty slice.
pub fn rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut accum = 0u64;
    for &s in samples {
        let v = s as i64;
        accum += (v * v) as u64;
    }
    let mean_sq = accum as f64 / samples.len() as f64;
    (libm::sqrt(mean_sq) / 32767.0) as f32
}
