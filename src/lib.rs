/*!
repeated-maze
=====

A "busy beaver" search engine over a family of finite, periodically
repeated mazes. A maze is described by a *port configuration*: the
wiring of a single repeating tile, instantiated over an infinite grid
in three flavours (`normal`, `nx`, `ny`) depending on which edge of the
grid a tile instance sits on. This crate finds the port configuration
whose induced infinite directed graph maximises the shortest-path
length between two fixed states, `start` and `goal`.

# Usage

This crate is `repeated-maze`. To use it as a library add it to your
dependencies:

```toml
[dependencies]
repeated-maze = "0.1"
```

The `maze-search` binary built alongside it exposes the same
functionality from the command line; see its `--help` output or
`src/bin/maze-search.rs`.

# Public interface

* [`port_config`] — the maze itself: three boolean port arrays with
  typed, flat-index, and bulk access.
* [`normalize`] — canonical form under the two index symmetries (E/W,
  N/S), used to deduplicate equivalent mazes.
* [`reach`] — a cheap abstract-graph reachability filter used to reject
  dead configurations before paying for a full solve.
* [`solver`] — shortest start-to-goal path length (BFS or IDDFS) in the
  infinite graph induced by a port configuration.
* [`search`] — the three candidate generators (exhaustive enumeration,
  random sampling, top-down best-first) sharing one evaluation pipeline
  ([`search::orchestrator`]).
* [`format`] — the maze string grammar (parse/print) and pretty-printers
  used by the CLI.
* [`state`] — canonical states and terminal directions.
* [`rng`] — the xorshift64 generator backing the random sampler.
* [`error`] — [`error::MazeError`], the crate's fatal-boundary error type.

# Non-goals

Graph features beyond the fixed three-block model; infinite-length
paths (`solver::MAX_DEPTH` is a hard cap); parallel or distributed
search; disk-backed persistence. Command-line argument parsing,
signal installation, and verbose path annotation live at the CLI
boundary (`cli`, `src/bin/maze-search.rs`), not in the core above.
*/

pub mod cli;
pub mod error;
pub mod format;
pub mod normalize;
pub mod port_config;
pub mod reach;
pub mod rng;
pub mod search;
pub mod solver;
pub mod state;
