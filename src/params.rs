//! Parameter definitions with physical units and documented semantics.
//!
//! All reference constants from the demo live here with:
//! - Physical units (meters, seconds, radians, etc.)
//! - Documented ranges and meanings
//! - `Default` impls carrying the reference values

/// Terrain heightfield synthesis parameters
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Highest frequency index in the cosine sum (inclusive).
    /// The phase table holds (max_frequency + 1)^2 entries.
    /// Reference value: 35
    pub max_frequency: u32,

    /// Global amplitude scale applied as A / sqrt(i^2 + j^2) per term
    /// Reference value: 0.5
    pub amplitude_scale: f64,

    /// Upper bound (exclusive) for random phase offsets
    /// Reference value: 500.0
    pub phase_range: f64,

    /// Seed for the phase table RNG (same seed => same terrain)
    pub seed: u64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            max_frequency: 35,
            amplitude_scale: 0.5,
            phase_range: 500.0,
            seed: 42,
        }
    }
}

/// Mesh tessellation parameters
#[derive(Debug, Clone)]
pub struct MeshParams {
    /// Columns per strip row (M); each strip emits 2 * (M + 1) vertices
    /// Reference value: 200
    pub resolution_u: u32,

    /// Number of strip rows (N)
    /// Reference value: 200
    pub resolution_v: u32,

    /// World-space footprint of the terrain, centered at the origin (meters)
    /// Reference value: 15.0 (x and z span -7.5..7.5)
    pub footprint_m: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            resolution_u: 200,
            resolution_v: 200,
            footprint_m: 15.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// Reference value: 75
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    /// Reference value: 1.0
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    /// Reference value: 20.0
    pub far_plane_m: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            fov_degrees: 75.0,
            near_plane_m: 1.0,
            far_plane_m: 20.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

/// Animation pacing parameters
#[derive(Debug, Clone)]
pub struct AnimationParams {
    /// Fixed time slice for animation sub-stepping (seconds).
    /// Fast frames still advance in deterministic dt-sized steps.
    /// Reference value: 0.1
    pub time_slice_s: f32,

    /// Terrain spin rate; rotation angle = spin_rate * elapsed time
    /// Reference value: 0.8
    pub spin_rate_rad_per_s: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            time_slice_s: 0.1,
            spin_rate_rad_per_s: 0.8,
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for captured frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let terrain = TerrainParams::default();
        assert_eq!(terrain.max_frequency, 35);
        assert_eq!(terrain.amplitude_scale, 0.5);

        let mesh = MeshParams::default();
        assert_eq!(mesh.resolution_u, 200);
        assert_eq!(mesh.footprint_m, 15.0);

        let anim = AnimationParams::default();
        assert_eq!(anim.time_slice_s, 0.1);
        assert_eq!(anim.spin_rate_rad_per_s, 0.8);
    }

    #[test]
    fn test_recording_frame_count() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert_eq!(config.frames_dir(), "recording/frames");
    }
}
