//! Canvas sizing and the aspect-preserving projection used by the shaders.

/// Backing store size in real device pixels for a canvas laid out at
/// `client_w` x `client_h` CSS pixels.
pub fn backing_size(client_w: f64, client_h: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let px = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scale = |v: f64| {
        if v.is_finite() && v > 0.0 {
            (v * px).round() as u32
        } else {
            0
        }
    };
    (scale(client_w), scale(client_h))
}

pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Mirrors the vertex shaders: fits the unit circle into the shorter side
/// of the viewport, scaled by `scale`.
pub fn project(point: [f32; 3], ratio: f32, scale: f32) -> [f32; 2] {
    if ratio > 1.0 {
        [point[0] / ratio * scale, point[1] * scale]
    } else {
        [point[0] * scale, point[1] * ratio * scale]
    }
}

/// Size of one device pixel in the blob shader's unit space.
pub fn pixel_size(width: u32, height: u32) -> f32 {
    let m = width.min(height).max(1) as f32;
    1.0 / (m * 0.75)
}

/// Tracks whether the canvas must be resized before the next frame.
#[derive(Debug)]
pub struct ResizeState {
    requested: bool,
    width: u32,
    height: u32,
}

impl Default for ResizeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeState {
    pub fn new() -> Self {
        // The first frame always sizes the canvas.
        ResizeState {
            requested: true,
            width: 0,
            height: 0,
        }
    }

    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Applies a pending resize. Returns the new size if one was requested
    /// and it differs from the current size. A zero-sized canvas has not
    /// been laid out yet, so the request stays pending.
    pub fn take(&mut self, size: (u32, u32)) -> Option<(u32, u32)> {
        if !self.requested || size.0 == 0 || size.1 == 0 {
            return None;
        }
        self.requested = false;

        if size == (self.width, self.height) {
            return None;
        }
        (self.width, self.height) = size;
        Some(size)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn ratio(&self) -> f32 {
        aspect_ratio(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_uses_device_pixels() {
        assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
        assert_eq!(backing_size(401.5, 300.0, 1.0), (402, 300));
    }

    #[test]
    fn test_backing_size_bad_ratio() {
        assert_eq!(backing_size(400.0, 300.0, 0.0), (400, 300));
        assert_eq!(backing_size(400.0, 300.0, f64::NAN), (400, 300));
        assert_eq!(backing_size(-1.0, 300.0, 1.0), (0, 300));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        assert_eq!(aspect_ratio(0, 1080), 1.0);
        assert_eq!(aspect_ratio(100, 0), 1.0);
    }

    fn approx_eq2(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn test_projection_fits_shorter_side() {
        let wide = 16.0 / 9.0;
        assert!(approx_eq2(project([1.0, 1.0, 0.0], wide, 0.8), [0.8 / wide, 0.8]));

        let tall = 9.0 / 16.0;
        assert!(approx_eq2(project([1.0, 1.0, 0.0], tall, 0.8), [0.8, 0.8 * tall]));

        assert_eq!(project([1.0, -1.0, 0.5], 1.0, 1.0), [1.0, -1.0]);
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(pixel_size(800, 600), 1.0 / 450.0);
        assert!(pixel_size(0, 0).is_finite());
    }

    #[test]
    fn test_resize_state() {
        let mut state = ResizeState::new();
        assert!(state.is_requested());
        assert_eq!(state.take((800, 600)), Some((800, 600)));
        assert_eq!(state.take((1024, 768)), None);

        state.request();
        assert_eq!(state.take((800, 600)), None);
        assert!(!state.is_requested());

        state.request();
        assert_eq!(state.take((400, 800)), Some((400, 800)));
        assert_eq!(state.ratio(), 0.5);
    }

    #[test]
    fn test_resize_waits_for_layout() {
        let mut state = ResizeState::new();
        assert_eq!(state.take(backing_size(0.0, 0.0, 2.0)), None);
        assert!(state.is_requested());
        assert_eq!(state.take(backing_size(400.0, 0.0, 2.0)), None);
        assert!(state.is_requested());

        assert_eq!(state.take(backing_size(400.0, 300.0, 2.0)), Some((800, 600)));
        assert!(!state.is_requested());
        assert_eq!(state.ratio(), 800.0 / 600.0);
    }
}
