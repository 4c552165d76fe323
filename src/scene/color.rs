//! HSL color helpers for the decoration box hue ramp.

/// One HSL channel via the piecewise hue function.
fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL to RGB. The hue wraps into `[0, 1)` by Euclidean modulo, so
/// out-of-range hues (including negatives) are valid inputs.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

/// Color of a decoration box at path progress `p`: hue ramps down from 0.7
/// (wrapping below zero), full saturation, half lightness.
#[must_use]
pub fn box_color(p: f32) -> [f32; 3] {
    hsl_to_rgb(0.7 - p, 1.0, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps_euclidean() {
        assert!(close(
            hsl_to_rgb(-0.1, 1.0, 0.5),
            hsl_to_rgb(0.9, 1.0, 0.5)
        ));
        assert!(close(
            hsl_to_rgb(1.3, 1.0, 0.5),
            hsl_to_rgb(0.3, 1.0, 0.5)
        ));
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert!(close(hsl_to_rgb(0.42, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn box_color_is_deterministic_in_progress() {
        // Same progress, same color; hue past the wrap point still valid.
        assert_eq!(box_color(0.25), box_color(0.25));
        assert!(close(box_color(0.9), hsl_to_rgb(-0.2, 1.0, 0.5)));
    }
}
