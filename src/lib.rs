//! # tabletop-robot
//!
//! A toy robot on a square tabletop, driven by a small text command language:
//! `PLACE x,y,F`, `MOVE`, `LEFT`, `RIGHT`, `REPORT` and `EXIT`.
//!
//! The [`Board`] tracks which tiles are occupied, the [`Robot`] owns its pose
//! and the movement rules, and the [`CommandInterpreter`] turns each line of
//! input into an [`Outcome`] without ever failing hard. [`run_session`] wires
//! the interpreter to any line-oriented reader and writer.

pub mod board;
pub mod error;
pub mod interpreter;
pub mod robot;
pub mod session;

pub use board::*;
pub use error::*;
pub use interpreter::*;
pub use robot::*;
pub use session::*;
