//! Log-scale price slider: position s in [-1, 1] maps to multiplier 10^s

pub const SLIDER_MIN: f64 = -1.0;
pub const SLIDER_MAX: f64 = 1.0;
pub const SLIDER_STEP: f64 = 0.005;

/// Multiplier for a slider position (clamped to [0.1, 10])
pub fn multiplier_from_slider(position: f64) -> f64 {
    10f64.powf(position.clamp(SLIDER_MIN, SLIDER_MAX))
}

/// Slider position showing a multiplier; out-of-range values pin to an end
pub fn slider_from_multiplier(multiplier: f64) -> f64 {
    multiplier.log10().clamp(SLIDER_MIN, SLIDER_MAX)
}

/// Slider positions visited when dragging from `from` to `to`
///
/// Moves in [`SLIDER_STEP`] increments in either direction and always ends
/// exactly on `to`. Both ends are clamped to the slider range.
pub fn slider_sweep(from: f64, to: f64) -> Vec<f64> {
    let from = from.clamp(SLIDER_MIN, SLIDER_MAX);
    let to = to.clamp(SLIDER_MIN, SLIDER_MAX);
    let span = to - from;
    let steps = (span.abs() / SLIDER_STEP).round() as usize;
    if steps == 0 {
        return vec![to];
    }

    let step = span / steps as f64;
    (0..=steps)
        .map(|i| if i == steps { to } else { from + i as f64 * step })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_ends() {
        assert!((multiplier_from_slider(-1.0) - 0.1).abs() < 1e-12);
        assert_eq!(multiplier_from_slider(0.0), 1.0);
        assert_eq!(multiplier_from_slider(1.0), 10.0);
        assert_eq!(multiplier_from_slider(7.0), 10.0);
    }

    #[test]
    fn test_slider_inverse() {
        for s in [-0.75, -0.2, 0.0, 0.35, 0.9] {
            let back = slider_from_multiplier(multiplier_from_slider(s));
            assert!((back - s).abs() < 1e-12);
        }
        assert_eq!(slider_from_multiplier(1000.0), 1.0);
        assert_eq!(slider_from_multiplier(0.0), -1.0);
    }

    #[test]
    fn test_sweep() {
        let up = slider_sweep(0.0, 0.05);
        assert_eq!(up.len(), 11);
        assert_eq!(up[0], 0.0);
        assert_eq!(*up.last().unwrap(), 0.05);

        let down = slider_sweep(0.0, -1.0);
        assert_eq!(down.len(), 201);
        assert!(down.windows(2).all(|w| w[1] < w[0]));

        assert_eq!(slider_sweep(0.3, 0.3), vec![0.3]);
    }
}
