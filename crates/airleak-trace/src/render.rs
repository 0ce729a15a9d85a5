//! Drawing boundary: [`PathRenderer`], [`Camera`] and the recording
//! [`DrawCmd`] list.

use airleak_core::{Color, Vec3};

/// Draws lines and points in structure-local space.
///
/// The host implements this on top of whatever billboard or debug-draw
/// primitives it has.
pub trait PathRenderer {
    fn line(&mut self, from: Vec3, to: Vec3, color: Color, thickness: f32);
    fn point(&mut self, at: Vec3, color: Color, size: f32);
}

/// Viewer position and facing, expressed in structure-local space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub position: Vec3,
    /// View direction. Need not be normalized.
    pub forward: Vec3,
}

impl Camera {
    pub const fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Whether `p` is in front of the camera plane and within `max_distance`.
    pub fn sees(&self, p: Vec3, max_distance: f32) -> bool {
        let d = p - self.position;
        d.dot(self.forward) > 0.0 && d.length() <= max_distance
    }
}

/// One recorded draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Line {
        from: Vec3,
        to: Vec3,
        color: Color,
        thickness: f32,
    },
    Point {
        at: Vec3,
        color: Color,
        size: f32,
    },
}

/// Collects draw calls so a host can batch them or replay them later.
impl PathRenderer for Vec<DrawCmd> {
    fn line(&mut self, from: Vec3, to: Vec3, color: Color, thickness: f32) {
        self.push(DrawCmd::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn point(&mut self, at: Vec3, color: Color, size: f32) {
        self.push(DrawCmd::Point { at, color, size });
    }
}
