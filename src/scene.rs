//! Scene: fixed object list, camera, lights, per-frame transform
//! composition, and fixed-substep animation.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use crate::camera::Camera;
use crate::params::{AnimationParams, RenderConfig};
use crate::terrain::TerrainMesh;
use crate::texture::Texture;

/// Hard cap on lights consumed by the shader; longer lists are truncated
pub const MAX_LIGHTS: usize = 8;

/// Phong-Blinn material
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub shininess: f32,
}

/// Light source; a homogeneous position with w = 0 encodes a directional
/// light at infinity, w = 1 a finite point light.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub ambient: Vec3,
    pub emitted: Vec3,
    pub position: Vec4,
}

/// Shader variant an object renders with.
///
/// A tagged variant rather than a trait object: exactly one case exists
/// today, and adding another stays a local enum change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Phong,
}

/// Drawable object: shared shader/material/texture/geometry plus its own
/// transform
pub struct SceneObject {
    pub shader: ShaderKind,
    pub material: Material,
    pub texture: Arc<Texture>,
    pub geometry: Arc<TerrainMesh>,
    pub scale: Vec3,
    pub translation: Vec3,
    pub rotation_axis: Vec3,
    pub rotation_angle: f32,
}

impl SceneObject {
    pub fn new(
        shader: ShaderKind,
        material: Material,
        texture: Arc<Texture>,
        geometry: Arc<TerrainMesh>,
    ) -> Self {
        Self {
            shader,
            material,
            texture,
            geometry,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
            rotation_axis: Vec3::Z,
            rotation_angle: 0.0,
        }
    }

    /// Model matrix (scale, then rotate, then translate) and its inverse,
    /// composed from the inverse factors in reverse order
    pub fn modeling_transform(&self) -> (Mat4, Mat4) {
        let model = Mat4::from_translation(self.translation)
            * Mat4::from_axis_angle(self.rotation_axis, self.rotation_angle)
            * Mat4::from_scale(self.scale);
        let model_inv = Mat4::from_scale(self.scale.recip())
            * Mat4::from_axis_angle(self.rotation_axis, -self.rotation_angle)
            * Mat4::from_translation(-self.translation);
        (model, model_inv)
    }
}

/// Everything the shader boundary consumes for one draw
pub struct RenderState {
    pub mvp: Mat4,
    pub model: Mat4,
    pub model_inv: Mat4,
    pub view: Mat4,
    pub proj: Mat4,
    pub material: Material,
    pub lights: Vec<Light>,
    pub texture: Arc<Texture>,
    pub eye: Vec3,
}

/// Fixed collection of drawable objects, a camera, and a light list.
///
/// Built once; nothing is added or removed afterwards. Per-frame state
/// (transforms, MVP) is recomputed, never persisted.
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub camera: Camera,
    pub lights: Vec<Light>,
    animation: AnimationParams,
}

impl Scene {
    /// Build the demo scene: one spinning terrain object, three directional
    /// lights, and a fixed camera looking down at the surface.
    pub fn build(
        geometry: Arc<TerrainMesh>,
        texture: Arc<Texture>,
        config: &RenderConfig,
        animation: AnimationParams,
    ) -> Self {
        let material = Material {
            diffuse: Vec3::new(0.5, 0.25, 0.1),
            specular: Vec3::new(0.2, 0.2, 0.2),
            ambient: Vec3::ZERO,
            shininess: 1.0,
        };

        let mut terrain = SceneObject::new(ShaderKind::Phong, material, texture, geometry);
        terrain.translation = Vec3::new(0.0, -3.0, 0.0);
        terrain.scale = Vec3::splat(0.3);
        terrain.rotation_axis = Vec3::Y;

        let camera = Camera::new(
            Vec3::new(0.0, -1.0, 4.0),
            Vec3::new(0.0, -2.3, 0.0),
            Vec3::Y,
            config,
        );

        let lights = vec![
            Light {
                ambient: Vec3::new(0.1, 0.1, 1.0),
                emitted: Vec3::new(1.2, 1.0, 0.7),
                position: Vec4::new(5.0, 5.0, 4.0, 0.0),
            },
            Light {
                ambient: Vec3::new(0.2, 0.2, 0.2),
                emitted: Vec3::new(0.8, 0.8, 1.1),
                position: Vec4::new(5.0, 10.0, 20.0, 0.0),
            },
            Light {
                ambient: Vec3::new(0.1, 0.1, 0.1),
                emitted: Vec3::new(0.8, 0.8, 0.9),
                position: Vec4::new(-5.0, 5.0, 5.0, 0.0),
            },
        ];

        Self {
            objects: vec![terrain],
            camera,
            lights,
            animation,
        }
    }

    /// Compose one render state per object for the current frame
    pub fn frame_states(&self) -> Vec<RenderState> {
        let view = self.camera.view();
        let proj = self.camera.projection();

        if self.lights.len() > MAX_LIGHTS {
            log::warn!(
                "scene has {} lights, shader consumes at most {}; truncating",
                self.lights.len(),
                MAX_LIGHTS
            );
        }
        let lights: Vec<Light> = self.lights.iter().take(MAX_LIGHTS).copied().collect();

        self.objects
            .iter()
            .map(|object| {
                let (model, model_inv) = object.modeling_transform();
                RenderState {
                    mvp: proj * view * model,
                    model,
                    model_inv,
                    view,
                    proj,
                    material: object.material,
                    lights: lights.clone(),
                    texture: Arc::clone(&object.texture),
                    eye: self.camera.eye,
                }
            })
            .collect()
    }

    /// Advance the scene's animation state to `t_end`.
    ///
    /// The rotation angle is a direct function of the end time, not an
    /// accumulation, so sub-stepping cannot drift.
    pub fn animate(&mut self, _t_start: f32, t_end: f32) {
        let rate = self.animation.spin_rate_rad_per_s;
        for object in &mut self.objects {
            object.rotation_angle = rate * t_end;
        }
    }

    /// Advance from `t_start` to `t_end` in fixed time slices, clamping the
    /// final partial step to the remaining interval. Returns the number of
    /// sub-steps taken.
    pub fn advance(&mut self, t_start: f32, t_end: f32) -> usize {
        let dt = self.animation.time_slice_s;
        let mut steps = 0;
        let mut t = t_start;
        while t < t_end {
            let step = dt.min(t_end - t);
            self.animate(t, t + step);
            t += step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MeshParams, TerrainParams};
    use crate::terrain::HeightField;

    fn demo_scene() -> Scene {
        let field = HeightField::new(TerrainParams {
            max_frequency: 4,
            ..TerrainParams::default()
        });
        let mesh = TerrainMesh::build(
            &field,
            &MeshParams {
                resolution_u: 4,
                resolution_v: 4,
                footprint_m: 15.0,
            },
        );
        Scene::build(
            Arc::new(mesh),
            Arc::new(Texture::checkerboard(20, 20)),
            &RenderConfig::default(),
            AnimationParams::default(),
        )
    }

    #[test]
    fn test_model_inverse_roundtrip() {
        let mut scene = demo_scene();
        scene.objects[0].rotation_angle = 1.3;
        let (model, model_inv) = scene.objects[0].modeling_transform();

        let product = model * model_inv;
        for (a, b) in product
            .to_cols_array()
            .iter()
            .zip(Mat4::IDENTITY.to_cols_array().iter())
        {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_animate_sets_angle_from_end_time() {
        let mut scene = demo_scene();
        scene.animate(0.0, 1.5);
        assert!((scene.objects[0].rotation_angle - 1.2).abs() < 1e-6);

        // Direct function of t_end: repeating the same call changes nothing
        scene.animate(1.0, 1.5);
        assert!((scene.objects[0].rotation_angle - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_advance_substeps_with_clamped_tail() {
        let mut scene = demo_scene();

        // 0 -> 0.25 at dt = 0.1: steps 0->0.1, 0.1->0.2, 0.2->0.25
        let steps = scene.advance(0.0, 0.25);
        assert_eq!(steps, 3);
        assert!((scene.objects[0].rotation_angle - 0.8 * 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_advance_empty_interval_takes_no_steps() {
        let mut scene = demo_scene();
        assert_eq!(scene.advance(0.5, 0.5), 0);
    }

    #[test]
    fn test_frame_states_cover_all_objects() {
        let scene = demo_scene();
        let states = scene.frame_states();
        assert_eq!(states.len(), scene.objects.len());

        let state = &states[0];
        assert_eq!(state.lights.len(), 3);
        assert_eq!(state.eye, scene.camera.eye);

        // MVP composes projection * view * model
        let expected = state.proj * state.view * state.model;
        assert_eq!(state.mvp, expected);
    }

    #[test]
    fn test_lights_truncated_to_shader_cap() {
        let mut scene = demo_scene();
        let extra = scene.lights[0];
        while scene.lights.len() < MAX_LIGHTS + 3 {
            scene.lights.push(extra);
        }

        let states = scene.frame_states();
        assert_eq!(states[0].lights.len(), MAX_LIGHTS);
    }

    #[test]
    fn test_directional_lights_have_zero_w() {
        let scene = demo_scene();
        for light in &scene.lights {
            assert_eq!(light.position.w, 0.0);
        }
    }
}
