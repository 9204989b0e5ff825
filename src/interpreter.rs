//! Interpreter that turns lines of command text into robot actions.
//!
//! The entry point is [`CommandInterpreter`]. Build one from an
//! [`InterpreterConfig`], register keywords via [`CommandInterpreter::set_keyword`]
//! or [`CommandInterpreter::populate_standard_keywords`], then feed it lines with
//! [`CommandInterpreter::interpret`]. The free function [`interpret`] does the
//! same with the standard keyword set.

use crate::board::{Board, DEFAULT_BOARD_SIZE};
use crate::error::SimulatorError;
use crate::robot::{Heading, Robot, Turn};
use glam::IVec2;
use std::collections::HashMap;
use std::sync::LazyLock;

const PLACE_KEYWORD: &str = "PLACE";

/// Configuration for command interpretation.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    /// Side length of the board a session is played on. Default: 5.
    pub board_size: u32,
    /// Word that ends a session, matched case-insensitively. Default: `EXIT`.
    pub exit_word: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            exit_word: "EXIT".to_string(),
        }
    }
}

/// A parsed command line. Produced fresh per line and never stored.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Place { position: IVec2, heading: Heading },
    Move,
    Left,
    Right,
    Report,
    Exit,
    /// A PLACE whose arguments did not parse, with the reason.
    Invalid(SimulatorError),
    /// A word with no registered meaning.
    Unknown(String),
}

/// What a single line did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The session should stop.
    Terminate,
    /// REPORT output, `x,y,HEADING`.
    ReportText(String),
    /// The command was applied, or absorbed without effect (a blocked MOVE).
    Accepted,
    /// The command was refused; state is unchanged.
    Rejected(SimulatorError),
}

/// Parses and applies command lines against a board and a robot.
pub struct CommandInterpreter {
    keywords: HashMap<String, Command>,
    config: InterpreterConfig,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        let mut interpreter = Self::new(InterpreterConfig::default());
        interpreter.populate_standard_keywords();
        interpreter
    }
}

impl CommandInterpreter {
    /// Creates an interpreter with an empty keyword map.
    ///
    /// PLACE and the exit word are always recognised; every other word has to
    /// be registered with [`set_keyword`](Self::set_keyword) or
    /// [`populate_standard_keywords`](Self::populate_standard_keywords).
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            keywords: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Maps `word` (case-insensitive) to `command`, replacing any earlier mapping.
    pub fn set_keyword(&mut self, word: &str, command: Command) {
        self.keywords.insert(word.trim().to_ascii_uppercase(), command);
    }

    /// Registers MOVE, LEFT, RIGHT and REPORT.
    pub fn populate_standard_keywords(&mut self) {
        let mappings = [
            ("MOVE", Command::Move),
            ("LEFT", Command::Left),
            ("RIGHT", Command::Right),
            ("REPORT", Command::Report),
        ];

        for (word, command) in mappings {
            self.set_keyword(word, command);
        }
    }

    /// Creates a board sized according to the configuration.
    pub fn new_board(&self) -> Result<Board, SimulatorError> {
        Board::new(self.config.board_size)
    }

    /// Parses one line. Never fails; a malformed PLACE becomes
    /// [`Command::Invalid`] and any other unrecognised text [`Command::Unknown`].
    pub fn parse(&self, line: &str) -> Command {
        let upper = line.trim().to_ascii_uppercase();

        if upper == self.config.exit_word.trim().to_ascii_uppercase() {
            return Command::Exit;
        }
        if upper.contains(PLACE_KEYWORD) {
            return parse_place(&upper);
        }
        match self.keywords.get(&upper) {
            Some(command) => command.clone(),
            None => Command::Unknown(line.trim().to_string()),
        }
    }

    /// Parses `line` and applies it to `robot` on `board`.
    ///
    /// # Placement rule
    ///
    /// Until the robot has been placed, everything except PLACE and the exit
    /// word is ignored and reported as [`SimulatorError::NotPlaced`]. Once
    /// placed, commands against any board other than the robot's own are
    /// refused with [`SimulatorError::ForeignBoard`].
    ///
    /// # Moves
    ///
    /// A MOVE that would step off the board (or onto an occupied tile) is
    /// absorbed: the robot stays put and the outcome is still
    /// [`Outcome::Accepted`].
    pub fn interpret(&self, line: &str, board: &mut Board, robot: &mut Robot) -> Outcome {
        let command = self.parse(line);

        let outcome = match command {
            Command::Exit => Outcome::Terminate,
            Command::Place { position, heading } => match robot.place(position, heading, board) {
                Ok(()) => Outcome::Accepted,
                Err(err) => Outcome::Rejected(err),
            },
            Command::Invalid(err) => Outcome::Rejected(err),
            _ if !robot.is_placed() => Outcome::Rejected(SimulatorError::NotPlaced),
            _ if !robot.is_on(board) => Outcome::Rejected(SimulatorError::ForeignBoard),
            Command::Unknown(word) => Outcome::Rejected(SimulatorError::MalformedCommand(format!(
                "unknown command '{word}'"
            ))),
            Command::Left => {
                robot.rotate(Turn::Left);
                Outcome::Accepted
            }
            Command::Right => {
                robot.rotate(Turn::Right);
                Outcome::Accepted
            }
            Command::Move => {
                if let Err(err) = robot.move_forward(board) {
                    tracing::debug!(%err, "move blocked");
                }
                Outcome::Accepted
            }
            Command::Report => match robot.report() {
                Some(text) => {
                    for row in board.state() {
                        tracing::debug!(?row, "board");
                    }
                    Outcome::ReportText(text)
                }
                None => Outcome::Rejected(SimulatorError::NotPlaced),
            },
        };

        if let Outcome::Rejected(err) = &outcome {
            tracing::warn!(command = line.trim(), %err, "command rejected");
        }
        outcome
    }
}

static STANDARD: LazyLock<CommandInterpreter> = LazyLock::new(CommandInterpreter::default);

/// Interprets `line` with the standard keyword set and default exit word.
pub fn interpret(line: &str, board: &mut Board, robot: &mut Robot) -> Outcome {
    STANDARD.interpret(line, board, robot)
}

/// `upper` is the upper-cased line. All whitespace and the word PLACE are
/// removed; what remains must be exactly `x,y,F`.
fn parse_place(upper: &str) -> Command {
    let compact: String = upper.chars().filter(|c| !c.is_whitespace()).collect();
    let args = compact.replace(PLACE_KEYWORD, "");
    let fields: Vec<&str> = args.split(',').collect();

    let [x, y, f] = fields.as_slice() else {
        return Command::Invalid(SimulatorError::MalformedCommand(format!(
            "PLACE expects x,y,F but got '{args}'"
        )));
    };

    let parsed = parse_coordinate(x).and_then(|x| {
        let y = parse_coordinate(y)?;
        let heading: Heading = f.parse()?;
        Ok((IVec2::new(x, y), heading))
    });

    match parsed {
        Ok((position, heading)) => Command::Place { position, heading },
        Err(err) => Command::Invalid(err),
    }
}

/// Accepts only ASCII digits. Values too large for `i32` saturate, which puts
/// them off any board.
fn parse_coordinate(field: &str) -> Result<i32, SimulatorError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SimulatorError::MalformedCommand(format!(
            "'{field}' is not a non-negative integer"
        )));
    }
    Ok(field.parse::<i32>().unwrap_or(i32::MAX))
}
