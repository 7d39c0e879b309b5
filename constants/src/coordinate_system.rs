use bevy::math::Vec3;

/// World units (metres) per render unit. Map coordinates sit around 1e17, so
/// render-space magnitudes stay in single digits.
pub const SCALE: f64 = 1.0e18;

/// Map a raw world coordinate to render space.
/// Scales every axis down by `SCALE` and flips the third axis to match the
/// right-handed render frame.
pub fn to_render_space(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new((x / SCALE) as f32, (y / SCALE) as f32, (-z / SCALE) as f32)
}

/// Scale a world-space length (zoom distances, radii) into render units.
pub fn scale_to_render(length: f64) -> f32 {
    (length / SCALE) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        let diff = (a - b).abs();
        assert!(diff < 1e-6, "expected {} close to {}", a, b);
    }

    #[test]
    fn render_space_divides_by_scale() {
        let p = to_render_space(2.0e18, -5.0e17, 0.0);
        assert_close(p.x, 2.0);
        assert_close(p.y, -0.5);
        assert_close(p.z, 0.0);
    }

    #[test]
    fn render_space_negates_third_axis() {
        let p = to_render_space(0.0, 0.0, 3.0e18);
        assert_close(p.z, -3.0);

        let q = to_render_space(0.0, 0.0, -1.5e18);
        assert_close(q.z, 1.5);
    }

    #[test]
    fn lengths_scale_without_flipping() {
        assert_close(scale_to_render(4.0e17), 0.4);
    }
}
