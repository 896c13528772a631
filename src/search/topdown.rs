/*!
Top-down best-first driver (spec §4.G).

Starts from the fully-connected configuration and removes one port at a
time, preferring to expand descendants of mazes with long paths first:
an array of `PRIO_MAX` stacks, indexed by *parent* path length (not the
child's, which is unknown until it is popped and re-solved — see the
open question recorded in DESIGN.md). A visited set of canonical flat
snapshots prevents revisiting the same configuration reached by two
different removal orders.
*/

use std::collections::HashSet;

use crate::error::Result;
use crate::normalize::normalize;
use crate::port_config::PortConfig;
use crate::reach::abstract_reach;
use crate::search::orchestrator::{evaluate, SearchOutcome};
use crate::solver::SolveMode;

/// Number of priority stacks; indices `>= PRIO_MAX - 1` collapse onto
/// the last stack.
pub const PRIO_MAX: usize = 1000;

fn priority_of(length: i64) -> usize
{
	(length.max(0) as usize).min(PRIO_MAX - 1)
}

fn queue_state(stacks: &[Vec<Vec<bool>>]) -> String
{
	let total: usize = stacks.iter().map(|s| s.len()).sum();
	let top = stacks.iter().rposition(|s| !s.is_empty()).unwrap_or(0);
	format!("{} queued, top priority {}", total, top)
}

/// Run the top-down search until every stack empties, the target
/// length is reached, or `interrupted` becomes true (checked once per
/// pop). Returns the accumulated [`SearchOutcome`].
pub fn topdown_search(n: usize, mode: SolveMode, target_length: Option<i64>, interrupted: &dyn Fn() -> bool) -> Result<SearchOutcome>
{
	let mut outcome = SearchOutcome::new();
	let mut visited: HashSet<Vec<bool>> = HashSet::new();
	let mut stacks: Vec<Vec<Vec<bool>>> = vec![Vec::new(); PRIO_MAX];

	let mut seed = PortConfig::create(n)?;
	for i in seed.candidate_indices()
	{
		seed.flat_set(i, true);
	}
	let seed = normalize(&seed);
	visited.insert(seed.to_snapshot());
	stacks[1].push(seed.to_snapshot());

	while !interrupted()
	{
		let prio = match stacks.iter().rposition(|s| !s.is_empty())
		{
			Some(p) => p,
			None => break,
		};
		let snapshot = stacks[prio].pop().expect("priority index chosen from a nonempty stack");

		let mut pc = PortConfig::create(n)?;
		pc.set_from_slice(&snapshot);

		let length = evaluate(&pc, mode, prio, true, &mut outcome, &queue_state(&stacks));
		if length < 0
		{
			continue;
		}
		if outcome.target_reached(target_length)
		{
			break;
		}

		let child_priority = priority_of(length);
		for i in pc.active_indices()
		{
			let mut child = pc.clone();
			child.flat_set(i, false);
			let child = normalize(&child);
			let snap = child.to_snapshot();
			if visited.contains(&snap)
			{
				continue;
			}
			if !abstract_reach(&child)
			{
				outcome.pruned += 1;
				continue;
			}
			visited.insert(snap.clone());
			stacks[child_priority].push(snap);
		}
	}

	Ok(outcome)
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn terminates_and_reports_some_best_for_small_n()
	{
		let result = topdown_search(2, SolveMode::Iddfs, Some(1), &|| false).unwrap();
		assert!(result.best_length >= 1);
		assert!(result.best_pc.is_some());
	}

	#[test]
	fn an_interrupt_flag_set_before_the_first_pop_yields_no_best()
	{
		let result = topdown_search(2, SolveMode::Iddfs, None, &|| true).unwrap();
		assert_eq!(result.best_pc, None);
		assert_eq!(result.evaluated, 0);
	}

	#[test]
	fn priority_of_clamps_into_range()
	{
		assert_eq!(priority_of(-1), 0);
		assert_eq!(priority_of(0), 0);
		assert_eq!(priority_of(5), 5);
		assert_eq!(priority_of(100_000), PRIO_MAX - 1);
	}
}
