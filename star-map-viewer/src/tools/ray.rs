use bevy::prelude::*;

/// Ray-sphere intersection. Returns the distance along `ray_direction`
/// (unit length) to the first hit in front of the origin, or the exit point
/// when the origin is inside the sphere.
///
/// Works from the perpendicular distance to the centre rather than the
/// quadratic discriminant, which loses all precision for spheres that are
/// tiny relative to their distance from the camera.
pub fn ray_sphere_hit_t(
    ray_origin: Vec3,
    ray_direction: Vec3,
    centre: Vec3,
    radius: f32,
) -> Option<f32> {
    let to_centre = centre - ray_origin;
    let t_closest = to_centre.dot(ray_direction);
    let closest = ray_origin + ray_direction * t_closest;
    let miss_sq = closest.distance_squared(centre);
    let radius_sq = radius * radius;
    if miss_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - miss_sq).sqrt();
    let (t_enter, t_exit) = (t_closest - half_chord, t_closest + half_chord);
    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}
