//! Domain types shared between the policy engine and the game engine
//!
//! Positions, directions and the observations the external game loop hands
//! to an agent, plus the key types used by the value table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Grid coordinate of a piece on the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Stands in for the adversary when the engine reports none.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A move the agent can request from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four movement directions, in the engine's enumeration order.
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn is_stop(self) -> bool {
        self == Direction::Stop
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        }
    }

    /// Grid offset produced by moving one cell in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "stop" => Ok(Direction::Stop),
            _ => Err(Error::ParseDirection {
                input: s.to_string(),
            }),
        }
    }
}

/// Public lookup triple into the value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub agent: Position,
    pub adversary: Position,
    pub action: Direction,
}

impl StateKey {
    pub fn new(agent: Position, adversary: Position, action: Direction) -> Self {
        Self {
            agent,
            adversary,
            action,
        }
    }
}

/// Key space of the value table
///
/// Besides ordinary decision triples, the table holds entries that can never
/// be reached through [`StateKey`] lookups: the `NoPrevious` sentinel written
/// by the first update of every episode, and decision points where no
/// movement action was available (`action: None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKey {
    NoPrevious,
    Decision {
        agent: Position,
        adversary: Position,
        action: Option<Direction>,
    },
}

impl From<StateKey> for TableKey {
    fn from(key: StateKey) -> Self {
        TableKey::Decision {
            agent: key.agent,
            adversary: key.adversary,
            action: Some(key.action),
        }
    }
}

/// Result of a finished episode from the agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    Win,
    Loss,
}

/// What the game engine reports at each decision point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub agent: Position,
    /// First tracked adversary, if the maze has one.
    pub adversary: Option<Position>,
    /// Running game score at this frame.
    pub score: f64,
    /// Legal moves as reported by the engine; may include `Stop`.
    pub legal_actions: Vec<Direction>,
}

impl Observation {
    pub fn new(agent: impl Into<Position>, score: f64) -> Self {
        Self {
            agent: agent.into(),
            adversary: None,
            score,
            legal_actions: Vec::new(),
        }
    }

    pub fn with_adversary(mut self, adversary: impl Into<Position>) -> Self {
        self.adversary = Some(adversary.into());
        self
    }

    pub fn with_legal_actions(mut self, actions: impl IntoIterator<Item = Direction>) -> Self {
        self.legal_actions = actions.into_iter().collect();
        self
    }

    /// Adversary position with the origin substituted when absent.
    pub fn adversary_or_origin(&self) -> Position {
        self.adversary.unwrap_or(Position::ORIGIN)
    }
}

/// What the game engine reports once the episode is over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalObservation {
    pub score: f64,
    pub outcome: EpisodeOutcome,
}

impl FinalObservation {
    pub fn new(score: f64, outcome: EpisodeOutcome) -> Self {
        Self { score, outcome }
    }
}
