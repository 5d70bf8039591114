//! Enumeration types used throughout the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Facing of a tank or bullet. Movement and fire are always aligned
/// to one of the four grid axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

/// Terrain occupying one grid cell. A cell holding `None` is open ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Destructible wall. Blocks tanks and bullets; bullets demolish it.
    Brick,
    /// Indestructible wall. Blocks tanks and bullets.
    Stone,
    /// Blocks tanks (unless rafted) but not bullets.
    Water,
    /// Passable; tanks that drive over it keep sliding after steering stops.
    Ice,
    /// Passable and hides tanks; only piercing shots mow it down.
    Bush,
}

/// Power-up category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Destroys every enemy currently on the field.
    Grenade,
    /// Temporary shield for the collecting tank.
    Helmet,
    /// Freezes all enemies in place for a while.
    Clock,
    /// Rebuilds the base perimeter in stone for a while.
    Shovel,
    /// Extra life.
    Tank,
    /// One weapon upgrade step.
    Star,
    /// Jumps straight to the top weapon tier.
    Weapon,
    /// Lets the tank cross water.
    Boat,
}

/// Round lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Level banner shown, combat not yet running.
    #[default]
    LevelIntro,
    /// Combat in progress.
    Active,
    /// Frozen mid-combat; resumes into Active.
    Paused,
    /// All enemies destroyed, outro delay before the next level.
    LevelCleared,
    /// Eagle destroyed or every player out of lives; defeat crawl.
    Lost,
    /// Final level cleared.
    Won,
}

/// Which seat a player tank belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

/// Side a tank or bullet fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Timed condition applied to a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Immune to bullets.
    Shield,
    /// Cannot move or fire.
    Frozen,
    /// Sliding on ice: keeps moving in the current facing, steering ignored.
    Slipping,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Final level cleared.
    Won,
    /// Eagle destroyed or all players fell.
    Lost,
    /// Player quit back to the menu.
    Aborted,
}

impl Direction {
    /// Unit vector of this facing in pixel space (y grows South).
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

impl BonusKind {
    pub const ALL: [BonusKind; 8] = [
        BonusKind::Grenade,
        BonusKind::Helmet,
        BonusKind::Clock,
        BonusKind::Shovel,
        BonusKind::Tank,
        BonusKind::Star,
        BonusKind::Weapon,
        BonusKind::Boat,
    ];
}

impl PlayerSlot {
    /// Zero-based index for slot-keyed arrays (spawn points, key maps).
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<PlayerSlot> {
        match index {
            0 => Some(PlayerSlot::One),
            1 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}
