use crate::math::Vec3;

/// A host-driven kinematic hinge.
///
/// Unlike the articulated joints this is not a solver constraint: it has no
/// attached body pair and never enters the world's constraint list. Its job
/// is to hold a pivot, an axis and a target angle that the host scripting
/// layer pushes each frame (e.g. for a motorized platform), keeping the
/// driver state out of the solve path entirely.
#[derive(Debug, Clone)]
pub struct HingeDriver {
    /// World-space pivot of the driven hinge
    pub pivot: Vec3,
    /// World-space hinge axis
    pub axis: Vec3,
    /// Spin rate in radians per second for continuously rotating drivers
    pub angular_velocity: f32,
    /// Whether the driver spins continuously
    pub is_rotating: bool,
    /// Angle pushed by the host, radians
    target_angle: f32,
}

impl HingeDriver {
    /// Creates a driver around a world-space pivot and axis
    pub fn new(pivot: Vec3, axis: Vec3, angular_velocity: f32, is_rotating: bool) -> Self {
        Self {
            pivot,
            axis,
            angular_velocity,
            is_rotating,
            target_angle: 0.0,
        }
    }

    /// Sets the target angle for this frame
    pub fn set_target_angle(&mut self, angle: f32) {
        self.target_angle = angle;
    }

    /// The most recently pushed target angle
    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_the_pushed_angle() {
        let mut driver = HingeDriver::new(Vec3::ZERO, Vec3::Y, 2.0, true);
        assert_eq!(driver.target_angle(), 0.0);

        driver.set_target_angle(1.25);
        assert_eq!(driver.target_angle(), 1.25);
        assert!(driver.is_rotating);
        assert_eq!(driver.angular_velocity, 2.0);
    }
}
