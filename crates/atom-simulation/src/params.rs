//! Simulation parameters for runtime tuning
//!
//! Everything tunable lives in [`SimulationParams`], which round-trips through
//! JSON so a run can be reproduced from a file.

use atom_physics::{
    ParticleSpec, WorldSettings, CENTER_SPIN, ELECTRON_SHELL_DISTANCE, ELECTRON_SIZE,
    ELECTRON_START_SPEED, NUCLEON_DAMPING, NUCLEON_SIZE, RING_BASE_RADIUS, RING_GAP,
    RING_SPIN_BASE, RING_SPIN_FALLOFF, RING_TUBE_RADIUS, TIMESTEP,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const GREY: [f32; 3] = [0.373, 0.373, 0.373];

/// How electrons are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationMode {
    /// Electrons are free bodies held on a shell by pull/push forces
    #[serde(rename = "free")]
    FreeElectrons,
    /// Electrons sit on rotating rings, one ring per occupied shell
    Rings,
}

/// Physical properties plus render style for one particle kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleParams {
    #[serde(flatten)]
    pub spec: ParticleSpec,
    pub visual_radius: f32,
    pub color: [f32; 3],
}

/// Geometry and spin schedule of the electron rings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingLayout {
    pub base_radius: f32,
    pub gap: f32,
    pub tube_radius: f32,
    /// Spin of shell 0, radians per frame
    pub spin_base: f32,
    /// Spin lost per shell index
    pub spin_falloff: f32,
    pub ring_color: [f32; 3],
}

impl RingLayout {
    pub fn ring_radius(&self, shell_index: usize) -> f32 {
        self.base_radius + self.gap * shell_index as f32
    }

    /// Per-frame spin of a ring; outer shells turn slower
    pub fn spin_rate(&self, shell_index: usize) -> f32 {
        (self.spin_base - self.spin_falloff * shell_index as f32).max(0.0)
    }
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            base_radius: RING_BASE_RADIUS,
            gap: RING_GAP,
            tube_radius: RING_TUBE_RADIUS,
            spin_base: RING_SPIN_BASE,
            spin_falloff: RING_SPIN_FALLOFF,
            ring_color: GREY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Element name as spelled in the dataset
    pub element: String,
    pub mode: VisualizationMode,
    /// Fixed physics timestep
    pub timestep: f32,
    pub world: WorldSettings,
    pub proton: ParticleParams,
    pub neutron: ParticleParams,
    pub electron: ParticleParams,
    /// Velocity scale applied to nucleons every tick (1 = none, 0 = full stop)
    pub nucleon_damping: f32,
    /// Velocity scale for free electrons; `None` leaves them undamped
    pub electron_damping: Option<f32>,
    /// Radius of the electron equilibrium shell
    pub electron_shell_distance: f32,
    /// Scale of the tangential impulse given to free electrons at build
    pub electron_start_speed: f32,
    /// Axis crossed with the radial direction to get the impulse direction
    pub impulse_axis: Vec3,
    /// Spin of the atom center about +Y, radians per frame
    pub center_spin: f32,
    pub rings: RingLayout,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl SimulationParams {
    /// Free electrons orbiting a loosely packed, damped nucleus
    pub fn free_electrons(element: &str) -> Self {
        Self {
            element: element.to_string(),
            mode: VisualizationMode::FreeElectrons,
            timestep: TIMESTEP,
            world: WorldSettings::default(),
            proton: ParticleParams {
                spec: ParticleSpec::nucleon(),
                visual_radius: NUCLEON_SIZE,
                color: RED,
            },
            neutron: ParticleParams {
                spec: ParticleSpec::nucleon(),
                visual_radius: NUCLEON_SIZE,
                color: BLUE,
            },
            electron: ParticleParams {
                spec: ParticleSpec::electron(),
                visual_radius: ELECTRON_SIZE,
                color: GREEN,
            },
            nucleon_damping: NUCLEON_DAMPING,
            electron_damping: None,
            electron_shell_distance: ELECTRON_SHELL_DISTANCE,
            electron_start_speed: ELECTRON_START_SPEED,
            impulse_axis: Vec3::Z,
            center_spin: CENTER_SPIN,
            rings: RingLayout::default(),
            seed: None,
        }
    }

    /// Tightly packed nucleus with electrons drawn on spinning rings
    pub fn rings(element: &str) -> Self {
        let free = Self::free_electrons(element);
        Self {
            mode: VisualizationMode::Rings,
            proton: ParticleParams {
                spec: ParticleSpec::ring_nucleon(),
                ..free.proton
            },
            neutron: ParticleParams {
                spec: ParticleSpec::ring_nucleon(),
                ..free.neutron
            },
            electron: ParticleParams {
                color: YELLOW,
                ..free.electron
            },
            nucleon_damping: 0.0,
            ..free
        }
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        let params: Self = serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.element.trim().is_empty() {
            return Err(ConfigError::invalid("element", "must name an element"));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(ConfigError::invalid("timestep", "must be positive"));
        }
        if self.world.solver_iterations == 0 {
            return Err(ConfigError::invalid("world.solver_iterations", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.world.restitution) {
            return Err(ConfigError::invalid("world.restitution", "must lie in [0, 1]"));
        }
        if !(self.world.friction >= 0.0) {
            return Err(ConfigError::invalid("world.friction", "must not be negative"));
        }

        for (field, particle) in [
            ("proton", &self.proton),
            ("neutron", &self.neutron),
            ("electron", &self.electron),
        ] {
            let spec = &particle.spec;
            if !(spec.mass > 0.0) {
                return Err(ConfigError::invalid(field, "mass must be positive"));
            }
            if !(spec.collision_radius > 0.0) || !(particle.visual_radius > 0.0) {
                return Err(ConfigError::invalid(field, "radii must be positive"));
            }
            if !(spec.spawn_inner >= 0.0 && spec.spawn_inner <= spec.spawn_outer) {
                return Err(ConfigError::invalid(
                    field,
                    "spawn band needs 0 <= spawn_inner <= spawn_outer",
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.nucleon_damping) {
            return Err(ConfigError::invalid("nucleon_damping", "must lie in [0, 1]"));
        }
        if let Some(factor) = self.electron_damping {
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::invalid("electron_damping", "must lie in [0, 1]"));
            }
        }
        if !(self.electron_shell_distance >= 0.0) {
            return Err(ConfigError::invalid("electron_shell_distance", "must not be negative"));
        }
        if !self.impulse_axis.is_finite() {
            return Err(ConfigError::invalid("impulse_axis", "must be finite"));
        }
        if !(self.rings.base_radius > 0.0 && self.rings.gap >= 0.0) {
            return Err(ConfigError::invalid(
                "rings",
                "base_radius must be positive and gap not negative",
            ));
        }
        Ok(())
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::free_electrons("Helium")
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
    /// A value is outside the range the simulation accepts
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &str) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
            ConfigError::Invalid { field, reason } => {
                write!(formatter, "Invalid config value '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
            ConfigError::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
        assert!(SimulationParams::rings("Uranium").validate().is_ok());
    }

    #[test]
    fn default_config() {
        let params = SimulationParams::default();
        assert_eq!(params.element, "Helium");
        assert_eq!(params.mode, VisualizationMode::FreeElectrons);
        assert!((params.timestep - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(params.world.solver_iterations, 5);
        assert!((params.electron_shell_distance - 10.0).abs() < f32::EPSILON);
        assert!((params.nucleon_damping - 0.95).abs() < f32::EPSILON);
        assert_eq!(params.electron_damping, None);
    }

    #[test]
    fn ring_preset_packs_the_nucleus() {
        let params = SimulationParams::rings("Uranium");
        assert_eq!(params.mode, VisualizationMode::Rings);
        assert_eq!(params.proton.spec.mass, 0.5);
        assert_eq!(params.proton.spec.spawn_outer, 0.2);
        assert_eq!(params.nucleon_damping, 0.0);
        assert_eq!(params.proton.color, RED);
    }

    #[test]
    fn ring_geometry() {
        let layout = RingLayout::default();
        assert!((layout.ring_radius(0) - 8.0).abs() < f32::EPSILON);
        assert!((layout.ring_radius(1) - 10.0).abs() < f32::EPSILON);
        assert!(layout.spin_rate(0) > layout.spin_rate(1));
        assert!(layout.spin_rate(6) > 0.0);
        assert!((layout.spin_rate(0) - 0.014).abs() < 1e-6);
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let mut params = SimulationParams::rings("Neon");
        params.seed = Some(99);
        let json = serde_json::to_string(&params).unwrap();
        let back: SimulationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: SimulationParams =
            serde_json::from_str(r#"{"element": "Lithium", "mode": "rings"}"#).unwrap();
        assert_eq!(params.element, "Lithium");
        assert_eq!(params.mode, VisualizationMode::Rings);
        assert_eq!(params.world.solver_iterations, 5);
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut params = SimulationParams::default();
        params.nucleon_damping = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Invalid { field: "nucleon_damping", .. })
        ));

        let mut params = SimulationParams::default();
        params.electron.spec.spawn_inner = 12.0;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::default();
        params.timestep = 0.0;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::default();
        params.world.solver_iterations = 0;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::default();
        params.world.friction = -0.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!("atom-params-{}.json", std::process::id()));
        let mut params = SimulationParams::rings("Neon");
        params.seed = Some(99);
        params.world.friction = 0.8;

        params.to_file(&path).unwrap();
        let loaded = SimulationParams::from_file(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), params);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulationParams::from_file("/nonexistent/atom.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
