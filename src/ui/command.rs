//! Interactive commands of the terminal front-end

use chess_rules::{parse_square, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `e2e4` or `e2 e4`
    Move(Square, Square),
    /// `select e2`: click-to-move
    Select(Square),
    Hint,
    /// Reveal the rest of the line
    Show,
    Board,
    Reset,
    Stats,
    /// Switch to another catalog training
    Load(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CommandError(String);

pub const HELP: &str = "\
Commands:
  e2e4 | e2 e4     move a piece (pawns promote to a queen)
  select <square>  click a square (select, deselect or move)
  hint             reveal the piece, then the square, of the next move (+30s each)
  show             play the rest of the line (counts as an error)
  board            redraw the board
  reset            start a new attempt
  stats            show statistics
  load <name>      switch to another training from the catalog
  help             this text
  quit             leave";

fn square(text: &str) -> Result<Square, CommandError> {
    parse_square(&text.to_ascii_lowercase()).map_err(|e| CommandError(e.to_string()))
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head.to_ascii_lowercase().as_str(), rest) {
        ("hint" | "h", []) => Command::Hint,
        ("show", []) => Command::Show,
        ("board" | "b", []) => Command::Board,
        ("reset" | "r", []) => Command::Reset,
        ("stats", []) => Command::Stats,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        ("select" | "s", [target]) => Command::Select(square(target)?),
        ("load", [_, ..]) => Command::Load(rest.join(" ")),
        (from, [to]) if from.len() == 2 => Command::Move(square(from)?, square(to)?),
        (mv, []) if mv.is_ascii() && (mv.len() == 4 || mv.len() == 5) => {
            // a fifth character (promotion piece) is accepted and ignored
            Command::Move(square(&mv[0..2])?, square(&mv[2..4])?)
        }
        _ => {
            return Err(CommandError(format!(
                "Unknown command '{}' (type 'help')",
                line.trim()
            )))
        }
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(parse_command("e2e4"), Ok(Some(Command::Move(Square::E2, Square::E4))));
        assert_eq!(parse_command(" g1 f3 "), Ok(Some(Command::Move(Square::G1, Square::F3))));
        assert_eq!(parse_command("e7e8q"), Ok(Some(Command::Move(Square::E7, Square::E8))));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("HINT"), Ok(Some(Command::Hint)));
        assert_eq!(parse_command("select e2"), Ok(Some(Command::Select(Square::E2))));
        assert_eq!(
            parse_command("load Italian Game"),
            Ok(Some(Command::Load("Italian Game".to_string())))
        );
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("castle").is_err());
        assert!(parse_command("z9z9").is_err(), "Squares must be on the board");
    }
}
