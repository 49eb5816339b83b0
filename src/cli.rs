//! Command-line argument parsing.

use anyhow::Context;
use clap::Parser;

use crate::params::{MeshParams, RecordingConfig, TerrainParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Ridgeline")]
#[command(about = "Procedural terrain rendering demo", long_about = None)]
pub struct Args {
    /// Tessellation resolution (grid cells per side)
    #[arg(long, value_name = "CELLS", default_value = "200")]
    pub resolution: u32,

    /// Seed for the terrain phase table (same seed => same terrain)
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u64,

    /// Highest frequency index in the terrain synthesis
    #[arg(long, value_name = "N", default_value = "35")]
    pub max_frequency: u32,

    /// Record frames to disk (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

impl Args {
    /// Terrain synthesis parameters from the command line
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            max_frequency: self.max_frequency,
            seed: self.seed,
            ..TerrainParams::default()
        }
    }

    /// Mesh tessellation parameters from the command line
    pub fn mesh_params(&self) -> MeshParams {
        MeshParams {
            resolution_u: self.resolution,
            resolution_v: self.resolution,
            ..MeshParams::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> anyhow::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);
        std::fs::create_dir_all(config.frames_dir())
            .with_context(|| format!("failed to create {}", config.frames_dir()))?;
        Ok(Some(config))
    }
}
