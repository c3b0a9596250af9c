//! Projection Module
//!
//! The two projection kinds a scene step can ask for, as a tagged variant.
//! Exactly one is active at a time; switching replaces the whole value.

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Default near clip plane.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clip plane.
pub const DEFAULT_FAR: f32 = 2000.0;
/// Half the visible height of the orthographic frustum at zoom 1.
pub const DEFAULT_ORTHO_HALF_HEIGHT: f32 = 60.0;

/// Which projection a camera intent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicParams {
    /// Half of the frustum height before zoom is applied
    pub half_height: f32,
    pub aspect: f32,
    /// Larger values show less of the scene
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
}

/// The active projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective(PerspectiveParams),
    Orthographic(OrthographicParams),
}

impl Projection {
    pub fn perspective(fov_deg: f32, aspect: f32) -> Self {
        Projection::Perspective(PerspectiveParams {
            fov_deg,
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        })
    }

    pub fn orthographic(zoom: f32, aspect: f32) -> Self {
        Projection::Orthographic(OrthographicParams {
            half_height: DEFAULT_ORTHO_HALF_HEIGHT,
            aspect,
            zoom: zoom.max(f32::EPSILON),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        })
    }

    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Perspective(_) => ProjectionKind::Perspective,
            Projection::Orthographic(_) => ProjectionKind::Orthographic,
        }
    }

    /// Field of view in degrees, for perspective projections.
    pub fn fov_deg(&self) -> Option<f32> {
        match self {
            Projection::Perspective(p) => Some(p.fov_deg),
            Projection::Orthographic(_) => None,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        match self {
            Projection::Perspective(p) => p.aspect = aspect,
            Projection::Orthographic(o) => o.aspect = aspect,
        }
    }

    /// Right-handed projection matrix with depth range [0, 1].
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective(p) => {
                Mat4::perspective_rh(p.fov_deg.to_radians(), p.aspect, p.near, p.far)
            }
            Projection::Orthographic(o) => {
                let half_h = o.half_height / o.zoom;
                let half_w = half_h * o.aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, o.near, o.far)
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::perspective(50.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_fov() {
        let p = Projection::perspective(65.0, 1.5);
        assert_eq!(p.kind(), ProjectionKind::Perspective);
        assert_eq!(p.fov_deg(), Some(65.0));

        let o = Projection::orthographic(2.0, 1.5);
        assert_eq!(o.kind(), ProjectionKind::Orthographic);
        assert_eq!(o.fov_deg(), None);
    }

    #[test]
    fn test_orthographic_zoom_shrinks_frustum() {
        let wide = Projection::orthographic(1.0, 1.0).matrix();
        let close = Projection::orthographic(2.0, 1.0).matrix();
        // Scale on X doubles when the zoom doubles
        assert!((close.x_axis.x - 2.0 * wide.x_axis.x).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect() {
        let mut p = Projection::perspective(50.0, 1.0);
        p.set_aspect(2.0);
        match p {
            Projection::Perspective(params) => assert_eq!(params.aspect, 2.0),
            Projection::Orthographic(_) => panic!("kind changed"),
        }
    }

    #[test]
    fn test_zero_zoom_is_clamped() {
        let o = Projection::orthographic(0.0, 1.0);
        assert!(o.matrix().is_finite());
    }
}
