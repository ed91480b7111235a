use crate::path::Path;
use crate::Cell;

/// Continuous position in cell units; cell `(x, y)` sits at `Vec2 { x, y }`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }
    pub fn distance(&self, other: &Vec2) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<Cell> for Vec2 {
    fn from(cell: Cell) -> Vec2 {
        Vec2::new(cell.x as f32, cell.y as f32)
    }
}

/// A marker that follows the waypoints of a [Path] at a fixed speed in cells per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Drone {
    pub position: Vec2,
    /// Index of the last waypoint reached, [None] when there is no path to follow.
    pub current_waypoint: Option<usize>,
    pub speed: f32,
}

impl Drone {
    pub fn new(path: &Path, speed: f32) -> Drone {
        Drone {
            position: path.first().map(Vec2::from).unwrap_or_default(),
            current_waypoint: if path.is_empty() { None } else { Some(0) },
            speed,
        }
    }

    /// The waypoint the drone is heading to.
    pub fn target(&self, path: &Path) -> Option<Cell> {
        self.current_waypoint.and_then(|i| path.get(i + 1))
    }

    /// Advances one tick: once the drone is closer than `speed` to its target, the target counts
    /// as reached and the next waypoint becomes the target. Otherwise the drone moves `speed`
    /// towards the target, which cannot carry it past the target.
    pub fn update(&mut self, path: &Path) {
        let (Some(index), Some(target)) = (self.current_waypoint, self.target(path)) else {
            return;
        };
        let target = Vec2::from(target);
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let dist = self.position.distance(&target);
        if dist < self.speed {
            self.current_waypoint = Some(index + 1);
        } else {
            self.position.x += dx / dist * self.speed;
            self.position.y += dy / dist * self.speed;
        }
    }

    pub fn is_finished(&self, path: &Path) -> bool {
        self.target(path).is_none()
    }
}
