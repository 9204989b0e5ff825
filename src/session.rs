//! Line-at-a-time driver that feeds a text source into the interpreter.

use crate::board::Board;
use crate::interpreter::{CommandInterpreter, Outcome};
use crate::robot::Robot;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Please enter command: ";

/// How the session talks to its output.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    /// Print the prompt before each read.
    pub interactive: bool,
    /// Print the welcome banner and command list before the first read.
    pub banner: bool,
}

/// Tally of what a session processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub reports: usize,
    /// True if the session ended on the exit word rather than end of input.
    pub terminated: bool,
}

/// Reads commands from `input` until the exit word or end of input.
///
/// REPORT text goes to `output`, one line each. Rejected commands, including
/// lines that are not valid UTF-8, are counted and otherwise ignored; only
/// I/O errors end the session early.
pub fn run_session<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    interpreter: &CommandInterpreter,
    board: &mut Board,
    robot: &mut Robot,
    options: SessionOptions,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    if options.banner {
        write_banner(&mut output, board.side_length(), &interpreter.config().exit_word)?;
    }

    let mut buf = Vec::new();
    loop {
        if options.interactive {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.lines += 1;
        // Bytes that are not UTF-8 become U+FFFD and the line is rejected as unknown.
        let line = String::from_utf8_lossy(&buf);

        match interpreter.interpret(&line, board, robot) {
            Outcome::Terminate => {
                summary.terminated = true;
                break;
            }
            Outcome::ReportText(text) => {
                summary.reports += 1;
                writeln!(output, "{text}")?;
            }
            Outcome::Accepted => summary.accepted += 1,
            Outcome::Rejected(_) => summary.rejected += 1,
        }
    }

    output.flush()?;
    tracing::debug!(?summary, "session finished");
    Ok(summary)
}

fn write_banner<W: Write>(output: &mut W, board_size: u32, exit_word: &str) -> io::Result<()> {
    writeln!(output, "Welcome to the toy robot simulator!")?;
    writeln!(output, "Board: {board_size}x{board_size}, origin 0,0 at the south-west corner.")?;
    writeln!(output)?;
    writeln!(output, "Commands:")?;
    writeln!(output, "  PLACE x,y,F   place or reposition the robot, F is NORTH, EAST, SOUTH or WEST")?;
    writeln!(output, "  MOVE          move one tile in the direction the robot faces")?;
    writeln!(output, "  LEFT          rotate 90 degrees to the left")?;
    writeln!(output, "  RIGHT         rotate 90 degrees to the right")?;
    writeln!(output, "  REPORT        print the robot's position as x,y,F")?;
    writeln!(output, "  {:<13} quit", exit_word.to_ascii_uppercase())?;
    writeln!(output)
}
