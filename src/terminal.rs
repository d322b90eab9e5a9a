//! Hot-seat chopsticks in the terminal.
//!
//! Reads one command per line and always acts for the current player.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::games::chopsticks::{Board, ChopsticksGame, Player};

const HELP: &str = "Commands: move <from> <to> | swap <hand> <fingers> | board | reset | help | quit";

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move from one of your hands to the opponent's hand.
    Move {
        /// Your hand.
        from: String,
        /// Opponent's hand.
        to: String,
    },
    /// Move fingers between your own hands.
    Swap {
        /// Source hand.
        hand: String,
        /// Finger count.
        fingers: String,
    },
    /// Print the board.
    Board,
    /// Start over.
    Reset,
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

impl Command {
    /// Parses one input line. Returns `None` for blank lines.
    ///
    /// # Errors
    ///
    /// Returns a usage message for unknown commands or wrong argument counts.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => return Ok(None),
            ["move", from, to] => Command::Move {
                from: (*from).to_string(),
                to: (*to).to_string(),
            },
            ["swap", hand, fingers] => Command::Swap {
                hand: (*hand).to_string(),
                fingers: (*fingers).to_string(),
            },
            ["board"] => Command::Board,
            ["reset"] => Command::Reset,
            ["help"] => Command::Help,
            ["quit"] | ["exit"] => Command::Quit,
            _ => return Err(format!("Unrecognized command '{}'. {}", line.trim(), HELP)),
        };
        Ok(Some(command))
    }
}

/// Renders the board and whose turn it is.
pub fn render(board: &Board, current: Player) -> String {
    let mut out = String::new();
    for player in Player::ALL {
        let hands = board.hands(player);
        let marker = if player == current { '>' } else { ' ' };
        out.push_str(&format!(
            "{} Player {}: left {} | right {}\n",
            marker,
            player.number(),
            hands.left,
            hands.right
        ));
    }
    if let Some(winner) = board.winner {
        out.push_str(&format!("Player {} wins!\n", winner.number()));
    }
    out
}

/// Runs the command loop until `quit` or end of input.
///
/// Rule violations are printed and the loop continues.
///
/// # Errors
///
/// Returns an error on I/O failure or if the store fails.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(game: &mut ChopsticksGame, input: R, mut output: W) -> Result<()> {
    info!("Starting terminal game");
    writeln!(output, "{}", HELP)?;
    write!(output, "{}", render(&game.board()?, game.current_player()))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                writeln!(output, "{}", usage)?;
                continue;
            }
        };
        debug!(?command, "Command received");

        let actor = game.current_player().index().to_string();
        let result = match command {
            Command::Move { from, to } => game.make_move(&actor, &from, &to).map(|_| ()),
            Command::Swap { hand, fingers } => game.swap(&actor, &hand, &fingers).map(|_| ()),
            Command::Reset => game.initialize(),
            Command::Board => Ok(()),
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(()) => write!(output, "{}", render(&game.board()?, game.current_player()))?,
            Err(err) if err.is_validation() => writeln!(output, "{}", err)?,
            Err(err) => return Err(err).context("Game storage failed"),
        }
    }

    info!("Terminal game finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn play(script: &str) -> (ChopsticksGame, String) {
        let mut game = ChopsticksGame::new(Box::new(MemoryStore::new())).expect("new game");
        let mut out = Vec::new();
        run(&mut game, script.as_bytes(), &mut out).expect("run");
        (game, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(
            Command::parse("move left right"),
            Ok(Some(Command::Move {
                from: "left".to_string(),
                to: "right".to_string()
            }))
        );
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert!(Command::parse("move left").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_moves_alternate_players() {
        let (game, out) = play("move left left\nmove left right\nquit\nmove left left\n");
        assert_eq!(game.current_player(), Player::First);
        let board = game.board().expect("board");
        assert_eq!(board.second.left, 2);
        assert_eq!(board.first.right, 3);
        assert!(out.contains("> Player 1: left 1 | right 3"));
    }

    #[test]
    fn test_rule_violation_is_reported_and_game_continues() {
        let (game, out) = play("swap left 1\nmove sideways left\n");
        assert!(out.contains("Cannot swap all / more fingers than you have."));
        assert!(out.contains("Hand must be 'left' or 'right'"));
        assert_eq!(game.current_player(), Player::First);
    }
}
