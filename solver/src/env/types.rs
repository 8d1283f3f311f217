use std::fmt;

use crate::ledger::Departures;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Right,
    Down,
    Left,
}

impl MoveDirection {
    /// scan order shared by every decision the solver makes
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// the flag recording a departure in this direction
    pub fn departure(self) -> Departures {
        match self {
            Self::Up => Departures::UP,
            Self::Right => Departures::RIGHT,
            Self::Down => Departures::DOWN,
            Self::Left => Departures::LEFT,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SensorState {
    Blocked,
    Free,
}

impl SensorState {
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl From<bool> for SensorState {
    fn from(walkable: bool) -> Self {
        if walkable { Self::Free } else { Self::Blocked }
    }
}

/// what the robot senses around the cell it currently occupies
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Surroundings {
    pub up: SensorState,
    pub right: SensorState,
    pub down: SensorState,
    pub left: SensorState,
}

impl Surroundings {
    pub fn from_fn(mut sense: impl FnMut(MoveDirection) -> SensorState) -> Self {
        Self {
            up: sense(MoveDirection::Up),
            right: sense(MoveDirection::Right),
            down: sense(MoveDirection::Down),
            left: sense(MoveDirection::Left),
        }
    }

    pub fn get(&self, direction: MoveDirection) -> SensorState {
        match direction {
            MoveDirection::Up => self.up,
            MoveDirection::Right => self.right,
            MoveDirection::Down => self.down,
            MoveDirection::Left => self.left,
        }
    }

    pub fn is_open(&self, direction: MoveDirection) -> bool {
        self.get(direction).is_free()
    }

    pub fn open_directions(&self) -> impl Iterator<Item = MoveDirection> + '_ {
        MoveDirection::ALL
            .into_iter()
            .filter(|&direction| self.is_open(direction))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveResponse {
    pub success: bool,
}
