//! Procedural bump mapping.
//!
//! Each perturbation maps an object-space point to an offset that is added
//! to the geometric normal before renormalisation.

use rayz_math::DVec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NormalPerturbation {
    /// Offsets each axis by a sine of a neighbouring axis
    SineWave { frequency: f64, amplitude: f64 },
    /// Bumps along y from the product of sines in x and z
    Quilted { frequency: f64, amplitude: f64 },
    /// Cheap noise from skewed sines on all three axes
    Noise { frequency: f64, amplitude: f64 },
    /// Concentric waves in the xz plane around `center`
    Ripples {
        center: DVec3,
        frequency: f64,
        amplitude: f64,
    },
}

impl NormalPerturbation {
    pub fn sine_wave() -> Self {
        Self::SineWave {
            frequency: 10.0,
            amplitude: 0.1,
        }
    }

    pub fn quilted() -> Self {
        Self::Quilted {
            frequency: 5.0,
            amplitude: 0.15,
        }
    }

    pub fn noise() -> Self {
        Self::Noise {
            frequency: 5.0,
            amplitude: 0.1,
        }
    }

    pub fn ripples(center: DVec3) -> Self {
        Self::Ripples {
            center,
            frequency: 10.0,
            amplitude: 0.1,
        }
    }

    /// Offset to add to the normal at `point`.
    pub fn perturb(&self, point: DVec3) -> DVec3 {
        match *self {
            Self::SineWave {
                frequency,
                amplitude,
            } => DVec3::new(
                (point.y * frequency).sin() * amplitude,
                (point.z * frequency).sin() * amplitude,
                (point.x * frequency).sin() * amplitude,
            ),
            Self::Quilted {
                frequency,
                amplitude,
            } => {
                let u = (point.x * frequency).sin();
                let v = (point.z * frequency).sin();
                DVec3::new(0.0, u * v * amplitude, 0.0)
            }
            Self::Noise {
                frequency,
                amplitude,
            } => DVec3::new(
                (point.x * frequency + point.y * frequency * 0.7).sin() * amplitude,
                (point.y * frequency + point.z * frequency * 0.7).sin() * amplitude,
                (point.z * frequency + point.x * frequency * 0.7).sin() * amplitude,
            ),
            Self::Ripples {
                center,
                frequency,
                amplitude,
            } => {
                let dx = point.x - center.x;
                let dz = point.z - center.z;
                let distance = (dx * dx + dz * dz).sqrt();
                DVec3::new(0.0, (distance * frequency).sin() * amplitude, 0.0)
            }
        }
    }

    /// Perturb `normal` and renormalise.
    pub fn apply(&self, point: DVec3, normal: DVec3) -> DVec3 {
        (normal + self.perturb(point)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_unperturbed() {
        for p in [
            NormalPerturbation::sine_wave(),
            NormalPerturbation::quilted(),
            NormalPerturbation::noise(),
            NormalPerturbation::ripples(DVec3::ZERO),
        ] {
            assert_eq!(p.perturb(DVec3::ZERO), DVec3::ZERO);
        }
    }

    #[test]
    fn test_quilted_only_moves_y() {
        let offset = NormalPerturbation::quilted().perturb(DVec3::new(0.3, 9.0, 0.1));
        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.z, 0.0);
        let expected = (1.5f64).sin() * (0.5f64).sin() * 0.15;
        assert!((offset.y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ripples_depend_on_distance_from_center() {
        let p = NormalPerturbation::ripples(DVec3::new(1.0, 0.0, 1.0));
        let a = p.perturb(DVec3::new(1.1, 0.0, 1.0));
        let b = p.perturb(DVec3::new(1.0, 5.0, 0.9));
        assert!((a.y - b.y).abs() < 1e-12);
        assert!((a.y - (1.0f64).sin() * 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_apply_returns_unit_normal() {
        let n = NormalPerturbation::sine_wave()
            .apply(DVec3::new(0.2, 0.4, 0.6), DVec3::new(0.0, 1.0, 0.0));
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.y > 0.9);
    }
}
