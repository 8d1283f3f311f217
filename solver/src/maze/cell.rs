#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Blocked,
    Target,
    Robot,
}

impl Cell {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Free),
            '#' => Some(Self::Blocked),
            'E' => Some(Self::Target),
            'S' => Some(Self::Robot),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Free => '.',
            Self::Blocked => '#',
            Self::Target => 'E',
            Self::Robot => 'S',
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Free | Self::Target | Self::Robot)
    }
}
