//! Game messages
//!
//! The server speaks plain text frames. Inbound frames are parsed once
//! here into a [`ServerMessage`] so nothing downstream has to inspect
//! raw strings again. The verbatim payload is always kept for display.

use std::fmt;

use crate::ws::DisplayRegion;

/// Frames starting with this literal announce the connected client count.
pub const CLIENT_COUNT_PREFIX: &str = "Connected clients:";

/// A move the player can make.
///
/// The game server reads choices as integers, so the wire form of a move
/// is its numeric code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn wire(self) -> &'static str {
        match self {
            Move::Rock => "0",
            Move::Paper => "1",
            Move::Scissors => "2",
        }
    }

    pub fn from_wire(code: &str) -> Option<Move> {
        match code.trim() {
            "0" => Some(Move::Rock),
            "1" => Some(Move::Paper),
            "2" => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.wire().to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

/// A result announcement.
///
/// Only `text` is guaranteed. The other fields are filled in when the
/// text follows the server's `Result: <outcome> (You: N, Server: M)` shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub text: String,
    pub outcome: Option<Outcome>,
    pub player: Option<Move>,
    pub server: Option<Move>,
}

impl GameResult {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();

        let outcome = if text.contains("You win!") {
            Some(Outcome::Win)
        } else if text.contains("You lose!") {
            Some(Outcome::Lose)
        } else if text.contains("It's a tie!") {
            Some(Outcome::Tie)
        } else {
            None
        };

        let player = field_after(&text, "You:").and_then(Move::from_wire);
        let server = field_after(&text, "Server:").and_then(Move::from_wire);

        Self {
            text,
            outcome,
            player,
            server,
        }
    }
}

/// Value of `label` up to the next `,` or `)`.
fn field_after<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let end = rest.find([',', ')']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// An inbound text frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMessage {
    ClientCount { count: Option<u32>, text: String },
    Result(GameResult),
}

impl ServerMessage {
    pub fn parse(payload: impl Into<String>) -> Self {
        let text = payload.into();
        match text.strip_prefix(CLIENT_COUNT_PREFIX) {
            Some(rest) => {
                let count = rest.trim().parse().ok();
                ServerMessage::ClientCount { count, text }
            }
            None => ServerMessage::Result(GameResult::parse(text)),
        }
    }

    /// The verbatim payload.
    pub fn text(&self) -> &str {
        match self {
            ServerMessage::ClientCount { text, .. } => text,
            ServerMessage::Result(result) => &result.text,
        }
    }

    pub fn region(&self) -> DisplayRegion {
        match self {
            ServerMessage::ClientCount { .. } => DisplayRegion::ClientCount,
            ServerMessage::Result(_) => DisplayRegion::Result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_count_prefix_is_recognised() {
        let message = ServerMessage::parse("Connected clients: 3");
        assert_eq!(
            message,
            ServerMessage::ClientCount {
                count: Some(3),
                text: "Connected clients: 3".to_string(),
            }
        );
        assert_eq!(message.region(), DisplayRegion::ClientCount);
    }

    #[test]
    fn client_count_without_number_still_routes_to_count_region() {
        let message = ServerMessage::parse("Connected clients: many");
        assert!(matches!(
            message,
            ServerMessage::ClientCount { count: None, .. }
        ));
        assert_eq!(message.text(), "Connected clients: many");
        assert_eq!(message.region(), DisplayRegion::ClientCount);
    }

    #[test]
    fn prefix_must_be_at_the_start() {
        let message = ServerMessage::parse(" Connected clients: 3");
        assert_eq!(message.region(), DisplayRegion::Result);
        assert_eq!(message.text(), " Connected clients: 3");
    }

    #[test]
    fn anything_else_is_a_result() {
        let message = ServerMessage::parse("You win!");
        assert_eq!(message.region(), DisplayRegion::Result);
        assert_eq!(message.text(), "You win!");
        let ServerMessage::Result(result) = message else {
            panic!("expected a result");
        };
        assert_eq!(result.outcome, Some(Outcome::Win));
        assert_eq!(result.player, None);
    }

    #[test]
    fn server_result_line_is_fully_parsed() {
        let result = GameResult::parse("Result: You lose! (You: 2, Server: 0)");
        assert_eq!(result.outcome, Some(Outcome::Lose));
        assert_eq!(result.player, Some(Move::Scissors));
        assert_eq!(result.server, Some(Move::Rock));
        assert_eq!(result.text, "Result: You lose! (You: 2, Server: 0)");
    }

    #[test]
    fn tie_and_unknown_outcomes() {
        assert_eq!(
            GameResult::parse("Result: It's a tie! (You: 1, Server: 1)").outcome,
            Some(Outcome::Tie)
        );
        let odd = GameResult::parse("server restarting");
        assert_eq!(odd.outcome, None);
        assert_eq!(odd.server, None);
    }

    #[test]
    fn moves_use_numeric_wire_codes() {
        assert_eq!(String::from(Move::Rock), "0");
        assert_eq!(String::from(Move::Paper), "1");
        assert_eq!(String::from(Move::Scissors), "2");
        for mv in Move::ALL {
            assert_eq!(Move::from_wire(mv.wire()), Some(mv));
        }
        assert_eq!(Move::from_wire("rock"), None);
    }
}
