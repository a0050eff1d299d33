use super::InputEvent;

/// Unbounded cursor position built from relative motion.
///
/// A grabbed cursor stops producing useful absolute positions: a confined
/// cursor pins at the window edge and a locked one reports nothing. Raw
/// motion deltas keep arriving, so they are summed here and forwarded as
/// ordinary cursor samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualPointer {
    x: f64,
    y: f64,
}

impl VirtualPointer {
    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Jump to an absolute position, so motion continues from where the
    /// real cursor was last seen.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Add one raw motion delta and return the resulting cursor sample.
    pub fn accumulate(&mut self, dx: f64, dy: f64) -> InputEvent {
        self.x += dx;
        self.y += dy;
        InputEvent::CursorMoved {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::Camera;

    fn feed(camera: &mut Camera, event: &InputEvent) {
        if let InputEvent::CursorMoved { x, y } = *event {
            camera.apply_pointer_delta(x, y);
        }
    }

    #[test]
    fn deltas_sum_from_the_last_known_position() {
        let mut pointer = VirtualPointer::default();
        pointer.set_position(100.0, 50.0);
        let _ = pointer.accumulate(3.0, -2.0);
        let event = pointer.accumulate(-1.0, 4.0);
        assert_eq!(event, InputEvent::CursorMoved { x: 102.0, y: 52.0 });
        assert_eq!(pointer.position(), (102.0, 52.0));
    }

    #[test]
    fn sustained_motion_keeps_turning_past_the_window_edge() {
        let mut camera = Camera::new(Vec3::ZERO, -90.0, 0.0);
        let mut pointer = VirtualPointer::default();
        pointer.set_position(400.0, 300.0);
        feed(&mut camera, &pointer.accumulate(0.0, 0.0));

        // 2000 px of rightward motion, far wider than any window.
        for _ in 0..200 {
            feed(&mut camera, &pointer.accumulate(10.0, 0.0));
        }
        assert!(camera.yaw() + 90.0 > 80.0);
        assert!((camera.yaw() - 110.0).abs() < 1e-2);
        assert!(camera.pitch().abs() < 1e-6);
    }
}
