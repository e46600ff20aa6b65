use serde::{Deserialize, Serialize};

pub const WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 450.0;
pub const PADDLE_HEIGHT: f64 = 75.0;
pub const PADDLE_STEP: f64 = 16.0;
pub const BALL_SPEED: f64 = 1.5;
pub const GOAL_LINE: f64 = 30.0;
pub const TICK_MS: u64 = 16;

/// Authoritative game state. Serialized verbatim as the per-tick broadcast
/// payload, so the field names are part of the wire contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub ball_x: f64,
    pub ball_y: f64,
    pub ball_vel_x: f64,
    pub ball_vel_y: f64,
    pub paddle1_y: f64,
    pub paddle2_y: f64,
    pub score1: u32,
    pub score2: u32,
}

impl GameState {
    /// Starting state: ball at the center moving down-right, paddles
    /// centered, no score.
    pub fn new() -> Self {
        Self {
            ball_x: WIDTH / 2.0,
            ball_y: HEIGHT / 2.0,
            ball_vel_x: BALL_SPEED,
            ball_vel_y: BALL_SPEED,
            paddle1_y: HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            paddle2_y: HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            score1: 0,
            score2: 0,
        }
    }

    /// Moves the named paddle one step and clamps it to the playfield.
    pub fn move_paddle(&mut self, paddle: PaddleSide, direction: Direction) {
        let y = match paddle {
            PaddleSide::One => &mut self.paddle1_y,
            PaddleSide::Two => &mut self.paddle2_y,
        };
        match direction {
            Direction::Up => *y -= PADDLE_STEP,
            Direction::Down => *y += PADDLE_STEP,
        }
        *y = y.clamp(0.0, HEIGHT - PADDLE_HEIGHT);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Which paddle a command addresses. Encoded as the integer 1 or 2 on the
/// wire; any other value fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaddleSide {
    One,
    Two,
}

impl TryFrom<u8> for PaddleSide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PaddleSide::One),
            2 => Ok(PaddleSide::Two),
            other => Err(format!("invalid paddle {}", other)),
        }
    }
}

impl From<PaddleSide> for u8 {
    fn from(side: PaddleSide) -> u8 {
        match side {
            PaddleSide::One => 1,
            PaddleSide::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Control messages accepted from clients.
///
/// Decoding fails closed: a wrong `type`, a missing field, or a field of the
/// wrong type or value is a decode error, and the server disconnects the
/// sender rather than guessing at intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Move {
        paddle: PaddleSide,
        direction: Direction,
    },
}
