//! Scene serialization
//!
//! Provides the Scene struct for loading/saving scenes from RON files.
//! A scene holds spawn templates plus optional physics overrides, and
//! instantiates into a populated [`World`].

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use drift2d_math::Vec2;
use drift2d_physics::{Body, PhysicsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::compose::DEFAULT_CELL;
use crate::spawn::{layout_text, scatter_boxes};
use crate::world::{IndexConfig, World};

fn default_cell() -> f32 {
    DEFAULT_CELL
}

/// A serializable spawn instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpawnTemplate {
    /// Random box particles scattered across the bounds
    Scatter {
        count: usize,
        min_size: f32,
        max_size: f32,
    },
    /// A block of text laid out as falling glyph particles
    Text {
        text: String,
        #[serde(default = "default_cell")]
        cell: f32,
    },
    /// One explicit body
    Body {
        position: Vec2,
        size: Vec2,
        #[serde(default)]
        velocity: Vec2,
        #[serde(default)]
        frozen: bool,
        #[serde(default)]
        glyph: Option<char>,
    },
}

/// A serializable scene: spawn templates plus physics overrides
///
/// Scenes are loaded from RON files and contain all the data needed to
/// populate a world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Spawn templates, instantiated in order
    pub spawns: Vec<SpawnTemplate>,
    /// Gravity override `[x, y]` (positive y = down)
    #[serde(default)]
    pub gravity: Option<[f32; 2]>,
    /// RNG seed for reproducible instantiation
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawns: Vec::new(),
            gravity: None,
            seed: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a spawn template to this scene
    pub fn add_spawn(&mut self, spawn: SpawnTemplate) {
        self.spawns.push(spawn);
    }

    /// Set the gravity override for this scene
    pub fn with_gravity(mut self, gravity_x: f32, gravity_y: f32) -> Self {
        self.gravity = Some([gravity_x, gravity_y]);
        self
    }

    /// Set the RNG seed for this scene
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a populated world from this scene
    ///
    /// The scene's gravity override, when present, replaces the gravity in
    /// `physics`. Instantiation is deterministic for a given seed.
    pub fn instantiate(
        &self,
        bounds: Vec2,
        mut physics: PhysicsConfig,
        index: IndexConfig,
    ) -> World {
        if let Some([gx, gy]) = self.gravity {
            physics.gravity = Vec2::new(gx, gy);
        }

        let mut world = World::with_engine(bounds, physics).with_index(index);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.unwrap_or(0));

        for spawn in &self.spawns {
            match spawn {
                SpawnTemplate::Scatter {
                    count,
                    min_size,
                    max_size,
                } => {
                    scatter_boxes(&mut world, &mut rng, *count, *min_size, *max_size);
                }
                SpawnTemplate::Text { text, cell } => {
                    layout_text(&mut world, &mut rng, text, *cell);
                }
                SpawnTemplate::Body {
                    position,
                    size,
                    velocity,
                    frozen,
                    glyph,
                } => {
                    let mut body = match glyph {
                        Some(ch) => Body::glyph(*ch, *position, *size),
                        None => Body::new(*position, *size),
                    };
                    body.velocity = *velocity;
                    body.frozen = *frozen;
                    world.add_body(body);
                }
            }
        }

        log::info!(
            "instantiated scene '{}' with {} bodies",
            self.name,
            world.body_count()
        );
        world
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
