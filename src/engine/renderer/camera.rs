// Screen-space camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Orthographic camera that maps window pixels (origin top-left, y down) to
/// clip space, so the game draws in the same coordinates it lays out in.
#[derive(Debug, Clone)]
pub struct Camera {
    viewport_width: f32,
    viewport_height: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // bottom and top swapped so y grows downward
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width.max(1.0),
            self.viewport_height.max(1.0),
            0.0,
            -1.0,
            1.0,
        );
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec2, Vec3};

    fn to_clip(camera: &Camera, screen: Vec2) -> Vec3 {
        camera
            .view_proj_matrix()
            .project_point3(screen.extend(0.0))
    }

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = Camera::new(800.0, 600.0);

        let top_left = to_clip(&camera, Vec2::ZERO);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let bottom_right = to_clip(&camera, Vec2::new(800.0, 600.0));
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);

        let centre = to_clip(&camera, Vec2::new(400.0, 300.0));
        assert_relative_eq!(centre.x, 0.0);
        assert_relative_eq!(centre.y, 0.0);
        assert!((0.0..=1.0).contains(&centre.z));
    }

    #[test]
    fn test_resize_rescales() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.resize(1600.0, 900.0);

        let bottom_right = to_clip(&camera, Vec2::new(1600.0, 900.0));
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
        assert_eq!(
            camera.uniform().view_proj,
            camera.view_proj_matrix().to_cols_array_2d()
        );
    }
}
