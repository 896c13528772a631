/*!
Typed errors for the fatal boundaries of the crate: argument validation
and maze-string parsing.

Per-candidate failures inside the search (`Unsolvable`, depth-cap
exhaustion, user interruption) are not represented here — they are data,
not exceptions, and are carried as plain values through the solver and
search orchestrator (see `solver` and `search::orchestrator`).
*/

use thiserror::Error;

/// Fatal errors: reported to the caller and, in the CLI, cause an exit
/// with status 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError
{
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("failed to parse maze string: {0}")]
	ParseFailure(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
