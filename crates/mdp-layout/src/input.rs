// ABOUTME: Normalization of pointer and touch input to a single client-X value.
// ABOUTME: Touch lists are reduced to their first changed touch point.

/// Where a drag gesture's events come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// A touch point as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
}

/// Client-X of the first changed touch, if any
pub fn first_changed_touch(changed: &[TouchPoint]) -> Option<f32> {
    changed.first().map(|t| t.x)
}
