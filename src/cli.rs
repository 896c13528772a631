/*!
Command-line glue for the `maze-search` binary (spec §4.I/§6/§4.K).

Subcommand dispatch, flag parsing (via `getopts`, the teacher's CLI
dependency), and rendering of results follow the original program's
`main.c` one-to-one: `solve`, `search`, `norm`, `--version`. Everything
here is a thin adapter over [`crate::format`], [`crate::solver`] and
[`crate::search`] — no algorithmic logic lives in this module.
*/

use std::sync::atomic::{AtomicBool, Ordering};

use getopts::Options;

use crate::error::{MazeError, Result};
use crate::rng::Xorshift64;
use crate::search::{enumerate, orchestrator, random, topdown, SearchOutcome};
use crate::solver::{self, SolveMode};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage()
{
	eprintln!("Usage:");
	eprintln!("  maze-search solve <maze-string> [--bfs] [-v]");
	eprintln!("  maze-search search <n> --max-aport <K> [--min-aport <K>] [--max-len <L>] [--random <seed>] [--bfs] [-v]");
	eprintln!("  maze-search search <n> --topdown [--max-len <L>] [--bfs] [-v]");
	eprintln!("  maze-search norm <n> <maze-string>");
	eprintln!("  maze-search --version");
}

fn parse_usize(s: &str, what: &str) -> Result<usize>
{
	s.parse().map_err(|_| MazeError::InvalidArgument(format!("{} must be a non-negative integer, got {:?}", what, s)))
}

fn parse_i64(s: &str, what: &str) -> Result<i64>
{
	s.parse().map_err(|_| MazeError::InvalidArgument(format!("{} must be an integer, got {:?}", what, s)))
}

fn parse_u64(s: &str, what: &str) -> Result<u64>
{
	s.parse().map_err(|_| MazeError::InvalidArgument(format!("{} must be a non-negative integer, got {:?}", what, s)))
}

/// Entry point used by `src/bin/maze-search.rs`. Runs with a fresh,
/// never-raised interrupt flag — callers that want graceful
/// cancellation should use [`run_with_interrupt`] directly and set the
/// flag from a signal handler or other host mechanism.
pub fn run(args: &[String]) -> i32
{
	run_with_interrupt(args, &AtomicBool::new(false))
}

/// Like [`run`], but the caller supplies the interruption flag polled
/// by `search`'s random and top-down drivers (spec §5): the core never
/// installs a signal handler itself.
pub fn run_with_interrupt(args: &[String], interrupted: &AtomicBool) -> i32
{
	if args.is_empty()
	{
		usage();
		return 1;
	}
	match args[0].as_str()
	{
		"--version" | "-v" => {
			println!("maze-search v{}", VERSION);
			0
		}
		"solve" => cmd_solve(&args[1..]),
		"search" => cmd_search(&args[1..], interrupted),
		"norm" => cmd_norm(&args[1..]),
		_ => {
			usage();
			1
		}
	}
}

fn report_error(err: MazeError) -> i32
{
	eprintln!("{}", err);
	1
}

fn cmd_solve(args: &[String]) -> i32
{
	let mut opts = Options::new();
	opts.optflag("", "bfs", "use full BFS instead of IDDFS");
	opts.optflag("v", "verbose", "print annotated path transitions");
	let matches = match opts.parse(args)
	{
		Ok(m) => m,
		Err(e) => {
			eprintln!("{}", e);
			usage();
			return 1;
		}
	};
	if matches.free.is_empty()
	{
		usage();
		return 1;
	}
	let maze_str = &matches.free[0];
	let n = crate::format::detect_nterm(maze_str);
	let pc = match crate::format::parse(n, maze_str)
	{
		Ok(pc) => pc,
		Err(e) => return report_error(e),
	};

	println!("maze: {}", crate::format::print(&pc));
	let mode = if matches.opt_present("bfs") { SolveMode::Bfs } else { SolveMode::Iddfs };
	let result = solver::solve(&pc, mode, true);

	if result.length < 0
	{
		println!("no path found");
		return 0;
	}
	let path = result.path.expect("want_path was true");
	println!("path length: {}", result.length);
	println!("path: {}", crate::format::print_path(&path));
	println!();
	print!("{}", crate::format::print_table(&pc));
	println!();
	print!("{}", crate::format::print_path_grid(&path));
	if matches.opt_present("verbose")
	{
		println!();
		print!("{}", crate::format::print_path_verbose(&pc, &path));
	}
	0
}

fn cmd_norm(args: &[String]) -> i32
{
	if args.len() < 2
	{
		usage();
		return 1;
	}
	let n = match parse_usize(&args[0], "nterm")
	{
		Ok(n) => n,
		Err(e) => return report_error(e),
	};
	let pc = match crate::format::parse(n, &args[1])
	{
		Ok(pc) => pc,
		Err(e) => return report_error(e),
	};
	println!("original: {}", crate::format::print(&pc));
	let normalized = crate::normalize::normalize(&pc);
	println!("normalized: {}", crate::format::print(&normalized));
	0
}

fn report_outcome(outcome: &SearchOutcome, verbose: bool)
{
	match &outcome.best_pc
	{
		None => println!("no maze with a valid path found"),
		Some(pc) => {
			println!();
			println!("=== best result ===");
			println!("path length: {}", outcome.best_length);
			println!("maze: {}", crate::format::print(pc));
			println!();
			print!("{}", crate::format::print_table(pc));
			if let Some(path) = &outcome.best_path
			{
				println!();
				println!("path: {}", crate::format::print_path(path));
				print!("{}", crate::format::print_path_grid(path));
				if verbose
				{
					println!();
					print!("{}", crate::format::print_path_verbose(pc, path));
				}
			}
		}
	}
	println!("evaluated: {}  solved: {}  pruned: {}", outcome.evaluated, outcome.solved, outcome.pruned);
}

fn cmd_search(args: &[String], interrupted: &AtomicBool) -> i32
{
	let mut opts = Options::new();
	opts.optopt("", "max-aport", "maximum number of active ports", "N");
	opts.optopt("", "min-aport", "minimum number of active ports", "N");
	opts.optopt("", "max-len", "target path length for early exit", "L");
	opts.optopt("", "random", "random seed; selects the random sampler", "SEED");
	opts.optflag("", "topdown", "use the top-down best-first driver");
	opts.optflag("", "bfs", "use full BFS instead of IDDFS");
	opts.optflag("v", "verbose", "print annotated path transitions for the best maze");
	let matches = match opts.parse(args)
	{
		Ok(m) => m,
		Err(e) => {
			eprintln!("{}", e);
			usage();
			return 1;
		}
	};
	if matches.free.is_empty()
	{
		usage();
		return 1;
	}
	let n = match parse_usize(&matches.free[0], "nterm")
	{
		Ok(n) => n,
		Err(e) => return report_error(e),
	};
	let mode = if matches.opt_present("bfs") { SolveMode::Bfs } else { SolveMode::Iddfs };
	let verbose = matches.opt_present("verbose");

	let target_length = match matches.opt_str("max-len")
	{
		Some(s) => match parse_i64(&s, "--max-len")
		{
			Ok(v) => Some(v),
			Err(e) => return report_error(e),
		},
		None => None,
	};

	let run_result = if matches.opt_present("topdown")
	{
		topdown::topdown_search(n, mode, target_length, &|| interrupted.load(Ordering::Relaxed))
	}
	else if let Some(seed_str) = matches.opt_str("random")
	{
		cmd_search_random(n, mode, target_length, &matches, &seed_str, interrupted)
	}
	else
	{
		cmd_search_enumerate(n, mode, target_length, &matches, interrupted)
	};

	match run_result
	{
		Ok(outcome) => {
			report_outcome(&outcome, verbose);
			0
		}
		Err(e) => report_error(e),
	}
}

fn aport_range(matches: &getopts::Matches) -> Result<(usize, usize)>
{
	let min_k = match matches.opt_str("min-aport")
	{
		Some(s) => parse_usize(&s, "--min-aport")?,
		None => 0,
	};
	let max_k = match matches.opt_str("max-aport")
	{
		Some(s) => parse_usize(&s, "--max-aport")?,
		None => return Err(MazeError::InvalidArgument("--max-aport <N> is required".to_string())),
	};
	Ok((min_k, max_k))
}

fn cmd_search_random(
	n: usize,
	mode: SolveMode,
	target_length: Option<i64>,
	matches: &getopts::Matches,
	seed_str: &str,
	interrupted: &AtomicBool,
) -> Result<SearchOutcome>
{
	let (min_k, max_k) = aport_range(matches)?;
	let seed = parse_u64(seed_str, "--random")?;
	let mut rng = Xorshift64::new(seed);
	let mut outcome = SearchOutcome::new();
	random::random_search(n, min_k, max_k, &mut rng, |pc| {
		orchestrator::evaluate(pc, mode, 0, true, &mut outcome, "");
		!outcome.target_reached(target_length) && !interrupted.load(Ordering::Relaxed)
	})?;
	Ok(outcome)
}

fn cmd_search_enumerate(n: usize, mode: SolveMode, target_length: Option<i64>, matches: &getopts::Matches, interrupted: &AtomicBool) -> Result<SearchOutcome>
{
	let (min_k, max_k) = aport_range(matches)?;
	let mut outcome = SearchOutcome::new();
	enumerate::enumerate(n, min_k, max_k, |pc| {
		orchestrator::evaluate(pc, mode, 0, true, &mut outcome, "");
		!outcome.target_reached(target_length) && !interrupted.load(Ordering::Relaxed)
	})?;
	Ok(outcome)
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn version_flag_exits_zero()
	{
		assert_eq!(run(&["--version".to_string()]), 0);
	}

	#[test]
	fn no_arguments_exits_nonzero()
	{
		assert_eq!(run(&[]), 1);
	}

	#[test]
	fn unknown_subcommand_exits_nonzero()
	{
		assert_eq!(run(&["frobnicate".to_string()]), 1);
	}

	#[test]
	fn solve_with_a_malformed_maze_string_exits_nonzero()
	{
		assert_eq!(run(&["solve".to_string(), "not a maze".to_string()]), 1);
	}

	#[test]
	fn solve_with_a_direct_port_exits_zero()
	{
		assert_eq!(run(&["solve".to_string(), "normal: W0->W1; nx: (none); ny: (none)".to_string()]), 0);
	}

	#[test]
	fn norm_requires_two_free_arguments()
	{
		assert_eq!(run(&["norm".to_string(), "2".to_string()]), 1);
	}

	#[test]
	fn search_without_max_aport_or_topdown_exits_nonzero()
	{
		assert_eq!(run(&["search".to_string(), "2".to_string()]), 1);
	}

	#[test]
	fn search_with_topdown_and_a_target_length_exits_zero()
	{
		assert_eq!(run(&["search".to_string(), "2".to_string(), "--topdown".to_string(), "--max-len".to_string(), "1".to_string()]), 0);
	}

	#[test]
	fn an_already_raised_interrupt_flag_stops_the_search_immediately()
	{
		let flag = AtomicBool::new(true);
		let code = run_with_interrupt(
			&["search".to_string(), "2".to_string(), "--max-aport".to_string(), "4".to_string()],
			&flag,
		);
		assert_eq!(code, 0);
	}
}
