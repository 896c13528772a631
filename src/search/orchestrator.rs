/*!
Search orchestrator (spec §4.H): the evaluation pipeline shared by the
enumerator, random sampler, and top-down driver.

For every candidate: filter abstractly, solve, update the global best,
report progress. Progress lines go to stderr and the final result to
stdout — this separation is load-bearing for piping (spec §6) — which
is why this module, like the rest of the search core, writes directly
with `eprintln!` rather than introducing a logging facade: matching the
teacher's own plain `println!`/`eprintln!` diagnostics.
*/

use crate::port_config::PortConfig;
use crate::reach::abstract_reach;
use crate::solver::{self, SolveMode};
use crate::state::State;

/// Emit a progress line every this many evaluations.
pub const PROGRESS_EVERY: u64 = 10_000;

/// Running state of a search: the global best found so far plus
/// counters for progress reporting.
#[derive(Debug, Clone)]
pub struct SearchOutcome
{
	pub best_pc: Option<PortConfig>,
	pub best_length: i64,
	pub best_path: Option<Vec<State>>,
	pub evaluated: u64,
	pub solved: u64,
	pub pruned: u64,
}

impl SearchOutcome
{
	pub fn new() -> SearchOutcome
	{
		SearchOutcome { best_pc: None, best_length: -1, best_path: None, evaluated: 0, solved: 0, pruned: 0 }
	}

	/// `true` once `best_length` reaches `target`, if one was given.
	pub fn target_reached(&self, target: Option<i64>) -> bool
	{
		target.map_or(false, |t| self.best_length >= t)
	}
}

impl Default for SearchOutcome
{
	fn default() -> Self
	{
		SearchOutcome::new()
	}
}

fn timestamp() -> String
{
	chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn report_progress(outcome: &SearchOutcome, queue_state: &str)
{
	if outcome.evaluated % PROGRESS_EVERY == 0
	{
		eprintln!(
			"[{}] progress: evaluated={} solved={} pruned={} best={}{}",
			timestamp(),
			outcome.evaluated,
			outcome.solved,
			outcome.pruned,
			outcome.best_length,
			if queue_state.is_empty() { String::new() } else { format!(" queue={}", queue_state) }
		);
	}
}

/// Run the common pipeline on one candidate: abstract filter, solve,
/// update the global best, report progress.
///
/// Returns the solver's raw length (`-1` if pruned or unsolvable), so
/// callers that need it (the top-down driver, to prioritise children)
/// don't have to re-solve.
pub fn evaluate(
	pc: &PortConfig,
	mode: SolveMode,
	min_limit: usize,
	want_path: bool,
	outcome: &mut SearchOutcome,
	queue_state: &str,
) -> i64
{
	outcome.evaluated += 1;

	if !abstract_reach(pc)
	{
		outcome.pruned += 1;
		report_progress(outcome, queue_state);
		return -1;
	}

	let result = solver::solve_from(pc, mode, min_limit, want_path);
	if result.length > 0
	{
		outcome.solved += 1;
	}

	if result.length > outcome.best_length
	{
		outcome.best_length = result.length;
		outcome.best_pc = Some(pc.clone());
		outcome.best_path = result.path.clone();
		eprintln!("[{}] new best: length {}", timestamp(), outcome.best_length);
		eprintln!("  {}", crate::format::print(pc));
	}

	report_progress(outcome, queue_state);
	result.length
}
