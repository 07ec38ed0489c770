//! Field camera
//!
//! Orbit camera over the tile field with eased framing: gameplay retargets
//! `field_center`/`field_distance`, and `update` pulls the live values
//! toward them with an exponential ease, so the view glides instead of
//! snapping. Direct user control (pinch) skips the easing until the next
//! reset.

use macroquad::prelude::{vec3, Camera3D, Vec2, Vec3};

use crate::config::FieldCameraConfig;

pub struct FieldCamera {
    /// Pitch (x) and yaw (y), radians.
    rotation: Vec2,
    distance: f32,
    target: Vec3,

    // Where easing is pulling toward.
    field_center: Vec3,
    field_distance: f32,

    distance_range: Vec2,
    ease_base: f64,
    ease_speed: f64,
    initial_ease: (f64, f64),
    skip_easing: bool,

    fov: f32,

    initial_rotation: Vec2,
    initial_distance: f32,
    initial_target: Vec3,
}

impl FieldCamera {
    pub fn new(config: &FieldCameraConfig) -> Self {
        let rotation = Vec2::new(
            config.rotation[0].to_radians(),
            config.rotation[1].to_radians(),
        );
        let target = vec3(config.target[0], config.target[1], config.target[2]);
        Self {
            rotation,
            distance: config.distance,
            target,
            field_center: target,
            field_distance: config.distance,
            distance_range: Vec2::new(config.distance_range[0], config.distance_range[1]),
            ease_base: config.ease_rate[0],
            ease_speed: config.ease_rate[1],
            initial_ease: (config.ease_rate[0], config.ease_rate[1]),
            skip_easing: false,
            fov: config.fov,
            initial_rotation: rotation,
            initial_distance: config.distance,
            initial_target: target,
        }
    }

    /// Ease position and distance toward their field targets.
    pub fn update(&mut self, delta_time: f64) {
        let k = (1.0 - self.ease_base.powf(delta_time * self.ease_speed)) as f32;
        self.target += (self.field_center - self.target) * k;
        self.distance += (self.field_distance - self.distance) * k;
    }

    pub fn add_yaw(&mut self, r: f32) {
        self.rotation.y += r;
    }

    /// Pinch zoom: scale the distance by `rate` within the clamp range.
    /// Counts as a manual move, so framing stops retargeting until the
    /// next `reset`.
    pub fn pinch_distance(&mut self, rate: f32) {
        self.distance = (self.distance / rate).clamp(self.distance_range.x, self.distance_range.y);
        self.field_distance = self.distance;
        self.skip_easing = true;
    }

    /// Frame the whole field: keep the target over its center and back
    /// off far enough that a circle of `radius` fits the view. Ignored
    /// while a manual move is in effect.
    pub fn fit_view(&mut self, center: Vec3, radius: f32) {
        if self.skip_easing {
            return;
        }
        self.field_center.x = center.x;
        self.field_center.z = center.z;

        let half_fov = (self.fov * 0.5).to_radians();
        let mut distance = radius / half_fov.sin();
        // The camera looks down at the field; pull back in a bit for it.
        distance -= (radius / self.rotation.x.cos()) * 0.75;

        self.field_distance = distance
            .max(self.distance)
            .clamp(self.distance_range.x, self.distance_range.y);
    }

    /// Back to the initial framing, keeping the user's rotation.
    pub fn reset(&mut self) {
        self.field_center = self.initial_target;
        self.field_distance = self.initial_distance;
        self.skip_easing = false;
    }

    pub fn reset_all(&mut self) {
        self.reset();
        self.rotation = self.initial_rotation;
        self.distance = self.initial_distance;
        self.target = self.initial_target;
    }

    pub fn set_ease_rate(&mut self, base: f64, speed: f64) {
        self.ease_base = base;
        self.ease_speed = speed;
    }

    pub fn restore_ease_rate(&mut self) {
        self.ease_base = self.initial_ease.0;
        self.ease_speed = self.initial_ease.1;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// The macroquad camera for this frame.
    pub fn camera3d(&self, aspect: f32) -> Camera3D {
        let (sin_yaw, cos_yaw) = self.rotation.y.sin_cos();
        let (sin_pitch, cos_pitch) = self.rotation.x.sin_cos();
        let eye = self.target
            + vec3(
                self.distance * cos_pitch * sin_yaw,
                -self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            );
        Camera3D {
            position: eye,
            target: self.target,
            up: vec3(0.0, 1.0, 0.0),
            fovy: fov_for_aspect(self.fov, aspect),
            aspect: Some(aspect),
            ..Default::default()
        }
    }
}

/// Vertical fov in degrees for a window aspect. Landscape keeps the
/// configured value; portrait widens it so the same horizontal extent
/// stays in frame.
fn fov_for_aspect(fov_deg: f32, aspect: f32) -> f32 {
    if aspect >= 1.0 {
        return fov_deg;
    }
    let half_w = (fov_deg.to_radians() * 0.5).tan();
    let half_h = half_w / aspect;
    2.0 * half_h.atan().to_degrees()
}
