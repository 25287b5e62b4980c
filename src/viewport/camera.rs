//! Perspective camera with orbit-style navigation and screen/world mapping

use egui::{Pos2, Rect};
use glam::{Mat4, Vec3, Vec4};

use crate::constants::camera;

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Distance along the ray to an axis-aligned box, using the slab method.
    ///
    /// Returns `None` when the box is missed, lies behind the origin, or has
    /// non-finite bounds.
    pub fn intersect_box(&self, min: Vec3, max: Vec3) -> Option<f32> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let inv = self.direction.recip();
        let t1 = (min - self.origin) * inv;
        let t2 = (max - self.origin) * inv;

        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

/// 3D camera orbiting around a target point
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(camera::POSITION),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: camera::FOV_DEGREES.to_radians(),
            near: camera::NEAR,
            far: camera::FAR,
            aspect: 1.0,
        }
    }
}

impl Camera3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Rotate the eye around the target; angles in radians
    pub fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < f32::EPSILON {
            return;
        }

        let mut theta = offset.z.atan2(offset.x);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += delta_azimuth;
        phi += delta_polar;

        // Keep away from the poles so `up` stays valid
        phi = phi.clamp(0.01, std::f32::consts::PI - 0.01);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        );
        self.position = self.target + new_offset;
    }

    /// Move eye and target together so the scene follows the pointer
    pub fn pan(&mut self, screen_delta_x: f32, screen_delta_y: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let fov_height = 2.0 * self.distance() * (self.fov / 2.0).tan();
        let world_per_point = fov_height / viewport_height;

        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let offset = -right * screen_delta_x * world_per_point + up * screen_delta_y * world_per_point;
        self.position += offset;
        self.target += offset;
    }

    /// Scale the eye distance; `factor < 1` moves closer
    pub fn dolly(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).max(camera::MIN_DISTANCE);
        self.position = self.target + offset.normalize() * distance;
    }

    /// Ray from the eye through a point of the viewport rectangle
    pub fn screen_ray(&self, pos: Pos2, rect: Rect) -> Ray {
        let ndc_x = (pos.x - rect.left()) / rect.width() * 2.0 - 1.0;
        let ndc_y = 1.0 - (pos.y - rect.top()) / rect.height() * 2.0;

        let inv_view_proj = self.build_view_projection_matrix().inverse();
        let near_point = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far_point = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near_point, far_point - near_point)
    }

    /// Project a world point into the viewport rectangle.
    ///
    /// Returns `None` for points behind the eye.
    pub fn world_to_screen(&self, point: Vec3, rect: Rect) -> Option<Pos2> {
        let clip = self.build_view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Pos2::new(
            rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
            rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
        ))
    }
}
