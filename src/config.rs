//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`DRIFT_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use drift2d_core::IndexConfig;
use drift2d_math::Vec2;
use drift2d_physics::{BoundaryPolicy, PhysicsConfig};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame bounds configuration
    #[serde(default)]
    pub bounds: BoundsConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsSettings,
    /// Quadtree configuration
    #[serde(default)]
    pub quadtree: QuadtreeConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Simulation loop configuration
    #[serde(default)]
    pub sim: SimConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsConfig::default(),
            physics: PhysicsSettings::default(),
            quadtree: QuadtreeConfig::default(),
            scene: SceneConfig::default(),
            sim: SimConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`DRIFT_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // DRIFT_PHYSICS__GRAVITY_Y=2.0 -> physics.gravity_y = 2.0
        figment = figment.merge(Env::prefixed("DRIFT_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Frame bounds configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Frame width in world units
    pub width: f32,
    /// Frame height in world units
    pub height: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl BoundsConfig {
    /// The bounds as a vector
    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Horizontal gravity per frame
    pub gravity_x: f32,
    /// Vertical gravity per frame (positive = down)
    pub gravity_y: f32,
    /// Horizontal friction decay factor per frame
    pub friction_x: f32,
    /// Vertical friction decay factor per frame
    pub friction_y: f32,
    /// Per-axis speed ceiling; exceeding it snaps the component to zero.
    /// Zero or negative disables the ceiling.
    pub max_velocity: f32,
    /// Velocity components below this snap to zero
    pub velocity_epsilon: f32,
    /// Containment policy at the frame edge ("clamp" or "revert")
    pub boundary: BoundaryPolicy,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: 1.0,
            friction_x: 0.9,
            friction_y: 0.9,
            max_velocity: 100.0,
            velocity_epsilon: 0.3,
            boundary: BoundaryPolicy::Clamp,
        }
    }
}

impl PhysicsSettings {
    /// Convert to the engine's configuration type
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: Vec2::new(self.gravity_x, self.gravity_y),
            friction: Vec2::new(self.friction_x, self.friction_y),
            max_velocity: (self.max_velocity > 0.0).then_some(self.max_velocity),
            velocity_epsilon: self.velocity_epsilon,
            boundary: self.boundary,
            ..PhysicsConfig::default()
        }
    }
}

/// Quadtree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// Bodies per node before subdividing
    pub capacity: usize,
    /// Minimum node edge length
    pub min_size: f32,
    /// Outer margin around the bounds
    pub margin: f32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            min_size: 10.0,
            margin: 5.0,
        }
    }
}

impl QuadtreeConfig {
    /// Convert to the world's index configuration type
    pub fn to_index_config(&self) -> IndexConfig {
        IndexConfig {
            capacity: self.capacity,
            min_size: self.min_size,
            margin: self.margin,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the scene file (RON); empty falls back to a generated scene
    pub path: String,
    /// Fallback scene: number of scattered boxes
    pub fallback_count: usize,
    /// Fallback scene: smallest box edge
    pub fallback_min_size: f32,
    /// Fallback scene: largest box edge
    pub fallback_max_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/boxes.ron".to_string(),
            fallback_count: 200,
            fallback_min_size: 15.0,
            fallback_max_size: 25.0,
        }
    }
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Target frames per second
    pub frame_rate: u32,
    /// Number of frames to run; zero runs until interrupted
    pub frames: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            frames: 600,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log frame statistics while running
    pub show_stats: bool,
    /// Frames between statistics lines
    pub stats_every: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_stats: true,
            stats_every: 30,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bounds.width, 1280.0);
        assert_eq!(config.physics.gravity_y, 1.0);
        assert_eq!(config.physics.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.quadtree.capacity, 4);
        assert_eq!(config.sim.frame_rate, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("gravity_y"));
        assert!(toml.contains("min_size"));
        assert!(toml.contains("boundary"));
    }

    #[test]
    fn test_to_physics_config() {
        let mut settings = PhysicsSettings::default();
        settings.gravity_y = 2.5;
        settings.max_velocity = 0.0;

        let config = settings.to_physics_config();
        assert_eq!(config.gravity, Vec2::new(0.0, 2.5));
        assert_eq!(config.max_velocity, None);
        assert_eq!(config.friction, Vec2::new(0.9, 0.9));
    }

    #[test]
    fn test_boundary_policy_parses_lowercase() {
        let settings: PhysicsSettings =
            toml::from_str("gravity_x = 0.0\ngravity_y = 1.5\nfriction_x = 0.9\nfriction_y = 0.9\nmax_velocity = 100.0\nvelocity_epsilon = 0.3\nboundary = \"revert\"")
                .unwrap();
        assert_eq!(settings.boundary, BoundaryPolicy::Revert);
    }

    #[test]
    fn test_load_from_missing_dir_gives_defaults() {
        let config = AppConfig::load_from("definitely/not/here").unwrap();
        assert_eq!(config.bounds.width, AppConfig::default().bounds.width);
    }
}
