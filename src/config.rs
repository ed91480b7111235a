use crate::error::{Error, Result};
use crate::{DEFAULT_DRONE_SPEED, DEFAULT_GRID_SIZE, DEFAULT_OBSTACLE_DENSITY, MAX_GRID_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of a simulation episode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SimulationConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Fraction of the cells drawn as obstacles. Draws may repeat, so the realised density can
    /// be lower.
    pub obstacle_density: f64,
    /// Drone speed in cells per tick.
    pub drone_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            obstacle_density: DEFAULT_OBSTACLE_DENSITY,
            drone_speed: DEFAULT_DRONE_SPEED,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 || self.grid_size > MAX_GRID_SIZE {
            // Distinct start and goal cells need at least two cells.
            return Err(Error::InvalidSize(self.grid_size));
        }
        if !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(Error::InvalidConfig(format!(
                "obstacle density {} is not within [0, 1]",
                self.obstacle_density
            )));
        }
        validate_drone_speed(self.drone_speed)
    }

    /// Number of random obstacle draws for one episode.
    pub fn obstacle_draws(&self) -> usize {
        (self.grid_size as f64 * self.grid_size as f64 * self.obstacle_density) as usize
    }
}

/// A drone speed must be positive and finite for the drone to make progress towards its target.
pub fn validate_drone_speed(speed: f32) -> Result<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "drone speed {} must be positive",
            speed
        )))
    }
}
