/*!
The solver (spec §4.D): shortest start-to-goal path length in the
infinite graph induced by a port configuration, in two equivalent
modes.

* [`SolveMode::Bfs`] — full breadth-first search, a state->parent map
  keyed by canonical state.
* [`SolveMode::Iddfs`] — iterative deepening DFS with a transposition
  table (the default, because it bounds memory to `O(depth)` instead of
  `O(reachable states)`).

Both share the same neighbour enumeration ([`neighbors`]), which fixes
tie-breaking order deterministically (destination flat-index order),
and both respect the same `MAX_DEPTH` cap: beyond it a configuration is
treated as unsolvable, indistinguishable from a genuine dead end.

The transposition table here is `std::collections::HashMap<State, i64>`
rather than the hand-rolled open-addressing table of the original
implementation — Rust's standard hasher already gives the amortized
O(1) probe/resize behaviour the original hand-rolled it for. See
DESIGN.md for this call.
*/

use std::collections::{HashMap, VecDeque};

use crate::port_config::PortConfig;
use crate::state::{goal, start, CanonicalDir, State, TermDir};

/// Hard cap on IDDFS depth and on BFS levels explored. Matches spec §4.D.
pub const MAX_DEPTH: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveMode
{
	Bfs,
	Iddfs,
}

/// Outcome of a [`solve`]/[`solve_from`] call.
///
/// `length == -1` means no path was found within the depth cap — either
/// genuinely unsolvable or merely deeper than `MAX_DEPTH`; callers must
/// not try to distinguish the two (spec §4.D "Failure semantics").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveResult
{
	pub length: i64,
	pub path: Option<Vec<State>>,
}

impl SolveResult
{
	fn not_found() -> SolveResult
	{
		SolveResult { length: -1, path: None }
	}
}

/// Convert a block-local terminal `(bx, by, tdir, tidx)` to its canonical
/// state, or `None` if that would require a negative coordinate (a W
/// terminal of a block at `bx == 0`, or an S terminal of a block at
/// `by == 0`).
fn to_canonical(bx: i64, by: i64, tdir: TermDir, tidx: usize) -> Option<State>
{
	match tdir
	{
		TermDir::E => Some(State::new(bx, by, CanonicalDir::E, tidx)),
		TermDir::W => if bx >= 1 { Some(State::new(bx - 1, by, CanonicalDir::E, tidx)) } else { None },
		TermDir::N => Some(State::new(bx, by, CanonicalDir::N, tidx)),
		TermDir::S => if by >= 1 { Some(State::new(bx, by - 1, CanonicalDir::N, tidx)) } else { None },
	}
}

fn emit_normal(pc: &PortConfig, bx: i64, by: i64, sd: TermDir, si: usize, out: &mut Vec<State>)
{
	let n = pc.nterm();
	for dd in TermDir::ALL
	{
		for di in 0..n
		{
			if !pc.get_normal(sd, si, dd, di)
			{
				continue;
			}
			if let Some(ns) = to_canonical(bx, by, dd, di)
			{
				if ns.x >= 0 && ns.y >= 0
				{
					out.push(ns);
				}
			}
		}
	}
}

fn emit_nx(pc: &PortConfig, by: i64, si: usize, out: &mut Vec<State>)
{
	let n = pc.nterm();
	for dj in 0..n
	{
		if dj == si
		{
			continue;
		}
		if pc.get_nx(si, dj).expect("dj != si checked above")
		{
			out.push(State::new(0, by, CanonicalDir::E, dj));
		}
	}
}

fn emit_ny(pc: &PortConfig, bx: i64, si: usize, out: &mut Vec<State>)
{
	let n = pc.nterm();
	for dj in 0..n
	{
		if dj == si
		{
			continue;
		}
		if pc.get_ny(si, dj).expect("dj != si checked above")
		{
			out.push(State::new(bx, 0, CanonicalDir::N, dj));
		}
	}
}

/// Enumerate all states directly reachable from `s` by one port
/// traversal, in deterministic (destination flat-index) order.
pub fn neighbors(pc: &PortConfig, s: State) -> Vec<State>
{
	let mut out = Vec::new();
	match s.dir
	{
		CanonicalDir::E => {
			let (bx, by) = (s.x, s.y);
			if by > 0
			{
				if bx > 0
				{
					emit_normal(pc, bx, by, TermDir::E, s.idx, &mut out);
				}
				else
				{
					emit_nx(pc, by, s.idx, &mut out);
				}
			}
			let (bx2, by2) = (s.x + 1, s.y);
			if bx2 > 0 && by2 > 0
			{
				emit_normal(pc, bx2, by2, TermDir::W, s.idx, &mut out);
			}
		}
		CanonicalDir::N => {
			let (bx, by) = (s.x, s.y);
			if bx > 0
			{
				if by > 0
				{
					emit_normal(pc, bx, by, TermDir::N, s.idx, &mut out);
				}
				else
				{
					emit_ny(pc, bx, s.idx, &mut out);
				}
			}
			let (bx2, by2) = (s.x, s.y + 1);
			if bx2 > 0 && by2 > 0
			{
				emit_normal(pc, bx2, by2, TermDir::S, s.idx, &mut out);
			}
		}
	}
	out
}

/// `true` if `v` should be (re-)explored at `depth`, updating the
/// transposition table as a side effect.
fn tt_should_explore(tt: &mut HashMap<State, i64>, v: State, depth: i64) -> bool
{
	match tt.get_mut(&v)
	{
		Some(stored) if depth < *stored => {
			*stored = depth;
			true
		}
		Some(_) => false,
		None => {
			tt.insert(v, depth);
			true
		}
	}
}

/// Depth-limited DFS. Returns `true` (leaving `stack` holding the found
/// path) iff `goal` is reached at or below `limit`.
fn dfs(pc: &PortConfig, cur: State, depth: usize, limit: usize, tt: &mut HashMap<State, i64>, goal_state: State, stack: &mut Vec<State>) -> bool
{
	if cur == goal_state
	{
		stack.push(cur);
		return true;
	}
	if depth >= limit
	{
		return false;
	}
	stack.push(cur);
	for v in neighbors(pc, cur)
	{
		if tt_should_explore(tt, v, (depth + 1) as i64) && dfs(pc, v, depth + 1, limit, tt, goal_state, stack)
		{
			return true;
		}
	}
	stack.pop();
	false
}

fn solve_iddfs(pc: &PortConfig, min_limit: usize, want_path: bool) -> SolveResult
{
	let start_state = start();
	let goal_state = goal();
	let mut last_count = 0usize;

	for limit in min_limit..=MAX_DEPTH
	{
		let mut tt: HashMap<State, i64> = HashMap::new();
		tt.insert(start_state, 0);
		let mut stack = Vec::new();

		if dfs(pc, start_state, 0, limit, &mut tt, goal_state, &mut stack)
		{
			let length = (stack.len() - 1) as i64;
			return SolveResult { length, path: if want_path { Some(stack) } else { None } };
		}

		if tt.len() == last_count
		{
			break;
		}
		last_count = tt.len();
	}
	SolveResult::not_found()
}

fn solve_bfs(pc: &PortConfig, want_path: bool) -> SolveResult
{
	let start_state = start();
	let goal_state = goal();

	let mut parent: HashMap<State, Option<State>> = HashMap::new();
	parent.insert(start_state, None);
	let mut queue: VecDeque<(State, usize)> = VecDeque::new();
	queue.push_back((start_state, 0));

	while let Some((cur, depth)) = queue.pop_front()
	{
		if cur == goal_state
		{
			let mut path = vec![cur];
			let mut node = cur;
			while let Some(Some(p)) = parent.get(&node)
			{
				path.push(*p);
				node = *p;
			}
			path.reverse();
			let length = (path.len() - 1) as i64;
			return SolveResult { length, path: if want_path { Some(path) } else { None } };
		}
		if depth >= MAX_DEPTH
		{
			continue;
		}
		for v in neighbors(pc, cur)
		{
			if !parent.contains_key(&v)
			{
				parent.insert(v, Some(cur));
				queue.push_back((v, depth + 1));
			}
		}
	}
	SolveResult::not_found()
}

/// Solve from the fixed start to the fixed goal, in the given mode.
pub fn solve(pc: &PortConfig, mode: SolveMode, want_path: bool) -> SolveResult
{
	solve_from(pc, mode, 0, want_path)
}

/// Like [`solve`], but for [`SolveMode::Iddfs`] starts the outer
/// depth-limit loop at `min_limit` instead of 0. Used by the top-down
/// driver: removing a port from a parent can only lengthen or
/// invalidate the shortest path, never shorten it, so re-solving a
/// child never needs to consider limits below the parent's own length.
/// `min_limit` is ignored in BFS mode (a full BFS always explores every
/// depth from 0).
pub fn solve_from(pc: &PortConfig, mode: SolveMode, min_limit: usize, want_path: bool) -> SolveResult
{
	match mode
	{
		SolveMode::Bfs => solve_bfs(pc, want_path),
		SolveMode::Iddfs => solve_iddfs(pc, min_limit, want_path),
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::state::TermDir::*;

	#[test]
	fn empty_maze_is_unsolvable()
	{
		let pc = PortConfig::create(2).unwrap();
		assert_eq!(solve(&pc, SolveMode::Iddfs, false).length, -1);
		assert_eq!(solve(&pc, SolveMode::Bfs, false).length, -1);
	}

	#[test]
	fn only_start_exit_is_unsolvable()
	{
		let mut pc = PortConfig::create(3).unwrap();
		pc.set_nx(0, 2, true).unwrap(); // leaves start's class but never reaches goal
		assert_eq!(solve(&pc, SolveMode::Iddfs, false).length, -1);
	}

	#[test]
	fn direct_normal_port_gives_length_one()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(W, 0, W, 1, true);
		let result = solve(&pc, SolveMode::Iddfs, true);
		assert_eq!(result.length, 1);
		let path = result.path.unwrap();
		assert_eq!(path, vec![crate::state::start(), crate::state::goal()]);
	}

	#[test]
	fn bfs_and_iddfs_agree_on_short_paths()
	{
		let mut pc = PortConfig::create(3).unwrap();
		pc.set_nx(0, 2, true).unwrap();
		pc.set_normal(W, 2, W, 1, true);
		let bfs = solve(&pc, SolveMode::Bfs, false);
		let iddfs = solve(&pc, SolveMode::Iddfs, false);
		assert_eq!(bfs.length, iddfs.length);
		assert_eq!(bfs.length, 2);
	}

	#[test]
	fn path_endpoints_and_edges_are_valid()
	{
		let mut pc = PortConfig::create(3).unwrap();
		pc.set_nx(0, 2, true).unwrap();
		pc.set_normal(W, 2, W, 1, true);
		let result = solve(&pc, SolveMode::Iddfs, true);
		let path = result.path.unwrap();
		assert_eq!(*path.first().unwrap(), start());
		assert_eq!(*path.last().unwrap(), goal());
		for w in path.windows(2)
		{
			assert!(neighbors(&pc, w[0]).contains(&w[1]));
		}
	}

	#[test]
	fn solve_from_with_higher_min_limit_still_finds_the_true_length()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(W, 0, W, 1, true);
		// Starting the outer loop above the true shortest length only skips
		// wasted early iterations; the depth-limited DFS at limit=5 still
		// discovers the goal at its true depth of 1.
		let result = solve_from(&pc, SolveMode::Iddfs, 5, false);
		assert_eq!(result.length, 1);
	}
}
