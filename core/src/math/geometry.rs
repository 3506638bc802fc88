//! Physical constants and orbit geometry for the ERS platform.

pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8; // m/s
pub const EARTH_RADIUS: f64 = 6_378_144.0; // m
pub const ANTENNA_LENGTH: f64 = 10.0; // m
pub const PLATFORM_ALTITUDE: f64 = 790_000.0; // m

pub struct GeometryHelper;

impl GeometryHelper {
    /// Euclidean norm of a velocity vector.
    pub fn speed(velocity: [f64; 3]) -> f64 {
        let [vx, vy, vz] = velocity;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }

    /// Orbital speed scaled to the speed seen by the aperture at ground range.
    pub fn effective_velocity(speed: f64) -> f64 {
        speed * (EARTH_RADIUS / (EARTH_RADIUS + PLATFORM_ALTITUDE)).sqrt()
    }

    /// Azimuth beam width [rad] for the fixed antenna length.
    pub fn azimuth_beam_width(wavelength: f64) -> f64 {
        wavelength / ANTENNA_LENGTH
    }

    /// Azimuth footprint of the beam on ground [m].
    pub fn ground_beam_width(beam_width: f64) -> f64 {
        PLATFORM_ALTITUDE * beam_width
    }

    /// Slant distance to the first range sample [m].
    pub fn near_range(range_gate_delay: f64) -> f64 {
        SPEED_OF_LIGHT * range_gate_delay / 2.0
    }

    pub fn range_pixel_spacing(sampling_frequency: f64) -> f64 {
        SPEED_OF_LIGHT / (2.0 * sampling_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_vector_norm() {
        assert_eq!(GeometryHelper::speed([3.0, 4.0, 12.0]), 13.0);
        assert_eq!(GeometryHelper::speed([0.0, 0.0, 0.0]), 0.0);
        let v = GeometryHelper::speed([7098.0, 446.0, 123.0]);
        let expected = (7098.0f64.powi(2) + 446.0f64.powi(2) + 123.0f64.powi(2)).sqrt();
        assert!((v - expected).abs() < 1e-9);
    }

    #[test]
    fn effective_velocity_applies_ground_scaling() {
        let factor = (6_378_144.0f64 / 7_168_144.0).sqrt();
        let effective = GeometryHelper::effective_velocity(7113.0);
        assert!((effective - 7113.0 * factor).abs() < 1e-9);
        assert!(effective < 7113.0);
    }

    #[test]
    fn near_range_is_half_round_trip() {
        let r0 = GeometryHelper::near_range(5.5e-3);
        assert!((r0 - 824_429.2595).abs() < 1e-3);
    }
}
