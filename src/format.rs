/*!
Maze string grammar (spec §6), verbatim:

```text
maze   := "normal:" ports  ";" "nx:" ports  ";" "ny:" ports
ports  := "(none)" | entry ("," entry)*
entry  := TERM "->" TERM
TERM   := direction integer
direction := 'E'|'W'|'N'|'S'    (case-insensitive)
```

Whitespace is ignored between tokens; a missing `;`-section is treated
as empty. `normal:` is required — parsing fails only if it is absent.
For `nx`/`ny` sections, entries with `si == di` or out-of-range indices
are silently dropped (they can never be valid edge-block ports).

This module is the external-interface boundary named by spec §1/§6: the
core (`solver`, `search`, `reach`, `normalize`) never calls into it.
It exists so the CLI's `solve`/`norm`/`search` subcommands, and the
round-trip tests in spec §8 Invariant 2, have somewhere to live.
*/

use std::collections::HashMap;

use crate::error::{MazeError, Result};
use crate::port_config::PortConfig;
use crate::state::{State, TermDir};

fn dir_name(d: TermDir) -> &'static str
{
	d.name()
}

fn parse_dir(c: char) -> Option<TermDir>
{
	match c.to_ascii_uppercase()
	{
		'E' => Some(TermDir::E),
		'W' => Some(TermDir::W),
		'N' => Some(TermDir::N),
		'S' => Some(TermDir::S),
		_ => None,
	}
}

struct Cursor
{
	chars: Vec<char>,
	pos: usize,
}

impl Cursor
{
	fn new(s: &str) -> Cursor
	{
		Cursor { chars: s.chars().collect(), pos: 0 }
	}

	fn peek(&self) -> Option<char>
	{
		self.chars.get(self.pos).copied()
	}

	fn skip_ws(&mut self)
	{
		while matches!(self.peek(), Some(c) if c.is_whitespace())
		{
			self.pos += 1;
		}
	}

	fn skip_str(&mut self, s: &str) -> bool
	{
		self.skip_ws();
		let rest: String = self.chars[self.pos..].iter().collect();
		if rest.starts_with(s)
		{
			self.pos += s.chars().count();
			true
		}
		else
		{
			false
		}
	}

	/// Parse a terminal like `E0` or `N12`. Does not advance on failure.
	fn parse_terminal(&mut self) -> Option<(TermDir, usize)>
	{
		self.skip_ws();
		let save = self.pos;
		let d = match self.peek().and_then(parse_dir)
		{
			Some(d) => d,
			None => return None,
		};
		self.pos += 1;
		let start = self.pos;
		while matches!(self.peek(), Some(c) if c.is_ascii_digit())
		{
			self.pos += 1;
		}
		if self.pos == start
		{
			self.pos = save;
			return None;
		}
		let digits: String = self.chars[start..self.pos].iter().collect();
		let idx: usize = digits.parse().expect("scanned only ascii digits");
		Some((d, idx))
	}
}

/// Detect `n` (`nterm`) from a maze string: one more than the maximum
/// terminal index observed, floored at 2.
pub fn detect_nterm(s: &str) -> usize
{
	let mut cur = Cursor::new(s);
	let mut max_idx = 0usize;
	let mut seen = false;
	loop
	{
		match cur.parse_terminal()
		{
			Some((_, idx)) => {
				seen = true;
				if idx > max_idx
				{
					max_idx = idx;
				}
			}
			None => {
				if cur.peek().is_none()
				{
					break;
				}
				cur.pos += 1;
			}
		}
	}
	if seen
	{
		(max_idx + 1).max(2)
	}
	else
	{
		2
	}
}

fn parse_ports_section<F: FnMut(TermDir, usize, TermDir, usize)>(cur: &mut Cursor, mut on_entry: F)
{
	cur.skip_ws();
	if cur.chars[cur.pos..].iter().collect::<String>().starts_with("(none)")
	{
		cur.pos += 6;
		return;
	}
	loop
	{
		let save = cur.pos;
		let src = match cur.parse_terminal()
		{
			Some(t) => t,
			None => {
				cur.pos = save;
				break;
			}
		};
		cur.skip_ws();
		if cur.peek() == Some('-')
		{
			cur.pos += 1;
		}
		if cur.peek() == Some('>')
		{
			cur.pos += 1;
		}
		let dst = match cur.parse_terminal()
		{
			Some(t) => t,
			None => break,
		};
		on_entry(src.0, src.1, dst.0, dst.1);
		cur.skip_ws();
		if cur.peek() == Some(',')
		{
			cur.pos += 1;
		}
		else
		{
			break;
		}
	}
}

/// Parse a maze from its string representation. Fails only when the
/// mandatory `normal:` prefix is absent; malformed or out-of-range
/// entries within a section are silently dropped.
pub fn parse(n: usize, s: &str) -> Result<PortConfig>
{
	let mut pc = PortConfig::create(n)?;
	let mut cur = Cursor::new(s);

	if !cur.skip_str("normal:")
	{
		return Err(MazeError::ParseFailure("missing required \"normal:\" section".to_string()));
	}
	parse_ports_section(&mut cur, |sd, si, dd, di| {
		if si < n && di < n
		{
			pc.set_normal(sd, si, dd, di, true);
		}
	});

	cur.skip_ws();
	if cur.peek() == Some(';')
	{
		cur.pos += 1;
	}
	if cur.skip_str("nx:")
	{
		parse_ports_section(&mut cur, |_sd, si, _dd, di| {
			if si != di && si < n && di < n
			{
				let _ = pc.set_nx(si, di, true);
			}
		});
	}

	cur.skip_ws();
	if cur.peek() == Some(';')
	{
		cur.pos += 1;
	}
	if cur.skip_str("ny:")
	{
		parse_ports_section(&mut cur, |_sd, si, _dd, di| {
			if si != di && si < n && di < n
			{
				let _ = pc.set_ny(si, di, true);
			}
		});
	}

	Ok(pc)
}

/// Print a maze's string representation: `"normal: ...; nx: ...; ny: ..."`.
/// Sections list active ports in flat-index order; an empty section
/// prints `(none)`.
pub fn print(pc: &PortConfig) -> String
{
	let n = pc.nterm();
	let mut out = String::new();

	out.push_str("normal:");
	let mut first = true;
	for sd in TermDir::ALL
	{
		for si in 0..n
		{
			for dd in TermDir::ALL
			{
				for di in 0..n
				{
					if pc.get_normal(sd, si, dd, di)
					{
						if !first
						{
							out.push(',');
						}
						out.push_str(&format!(" {}{}->{}{}", dir_name(sd), si, dir_name(dd), di));
						first = false;
					}
				}
			}
		}
	}
	if first
	{
		out.push_str(" (none)");
	}

	out.push_str("; nx:");
	first = true;
	for si in 0..n
	{
		for di in 0..n
		{
			if di != si && pc.get_nx(si, di).expect("di != si checked above")
			{
				if !first
				{
					out.push(',');
				}
				out.push_str(&format!(" E{}->E{}", si, di));
				first = false;
			}
		}
	}
	if first
	{
		out.push_str(" (none)");
	}

	out.push_str("; ny:");
	first = true;
	for si in 0..n
	{
		for di in 0..n
		{
			if di != si && pc.get_ny(si, di).expect("di != si checked above")
			{
				if !first
				{
					out.push(',');
				}
				out.push_str(&format!(" N{}->N{}", si, di));
				first = false;
			}
		}
	}
	if first
	{
		out.push_str(" (none)");
	}

	out
}

/// Render a path as `"(x, y, dir, idx) -> (x, y, dir, idx) -> ..."`.
pub fn print_path(path: &[State]) -> String
{
	path.iter().map(|s| format!("({}, {}, {:?}, {})", s.x, s.y, s.dir, s.idx)).collect::<Vec<_>>().join(" -> ")
}

/// Render the `normal` block's port matrix (`*` active, `.` absent) plus
/// the `nx`/`ny` port lists. A pretty-printer, not part of the solver's
/// contract — see spec §3 on `maze_print_table`.
pub fn print_table(pc: &PortConfig) -> String
{
	let n = pc.nterm();
	let mut out = String::new();

	out.push_str(&format!("normal block port table ({} terminals):\n", 4 * n));
	out.push_str("      ");
	for dd in TermDir::ALL
	{
		for di in 0..n
		{
			out.push_str(&format!(" {}{:<2}", dir_name(dd), di));
		}
	}
	out.push('\n');

	for sd in TermDir::ALL
	{
		for si in 0..n
		{
			out.push_str(&format!("  {}{:<2} ", dir_name(sd), si));
			for dd in TermDir::ALL
			{
				for di in 0..n
				{
					out.push_str(if pc.get_normal(sd, si, dd, di) { "  * " } else { "  . " });
				}
			}
			out.push('\n');
		}
	}

	let edge_list = |get: &dyn Fn(usize, usize) -> bool, letter: &str| -> String {
		let entries: Vec<String> = (0..n)
			.flat_map(|si| (0..n).filter(move |&di| di != si).map(move |di| (si, di)))
			.filter(|&(si, di)| get(si, di))
			.map(|(si, di)| format!("{}{}->{}{}", letter, si, letter, di))
			.collect();
		if entries.is_empty()
		{
			"(none)".to_string()
		}
		else
		{
			entries.join(", ")
		}
	};
	out.push_str("nx block ports: ");
	out.push_str(&edge_list(&|si, di| pc.get_nx(si, di).unwrap_or(false), "E"));
	out.push('\n');
	out.push_str("ny block ports: ");
	out.push_str(&edge_list(&|si, di| pc.get_ny(si, di).unwrap_or(false), "N"));
	out.push('\n');

	out
}

/// Render a path as a 2D grid of block positions, each cell listing the
/// step numbers of path states visited there (top = high y).
pub fn print_path_grid(path: &[State]) -> String
{
	if path.is_empty()
	{
		return String::new();
	}
	let min_x = path.iter().map(|s| s.x).min().unwrap();
	let max_x = path.iter().map(|s| s.x).max().unwrap();
	let min_y = path.iter().map(|s| s.y).min().unwrap();
	let max_y = path.iter().map(|s| s.y).max().unwrap();

	let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
	for (step, s) in path.iter().enumerate()
	{
		cells.entry((s.x, s.y)).or_default().push(step);
	}

	let mut out = String::new();
	for y in (min_y..=max_y).rev()
	{
		for x in min_x..=max_x
		{
			let cell = match cells.get(&(x, y))
			{
				Some(steps) => steps.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(","),
				None => ".".to_string(),
			};
			out.push_str(&format!("{:>5}", cell));
		}
		out.push('\n');
	}
	out
}

/// The up-to-two `(bx, by, tdir, idx)` block terminals sharing a
/// canonical state's physical point (spec §3).
fn block_terms(s: State) -> [(i64, i64, TermDir, usize); 2]
{
	use crate::state::CanonicalDir;
	match s.dir
	{
		CanonicalDir::E => [(s.x, s.y, TermDir::E, s.idx), (s.x + 1, s.y, TermDir::W, s.idx)],
		CanonicalDir::N => [(s.x, s.y, TermDir::N, s.idx), (s.x, s.y + 1, TermDir::S, s.idx)],
	}
}

/// Render each path transition annotated with the block and port that
/// realises it, mirroring `path_print_verbose` in the original program.
pub fn print_path_verbose(pc: &PortConfig, path: &[State]) -> String
{
	let mut out = String::new();
	out.push_str(&format!("path details ({} steps):\n", path.len().saturating_sub(1)));

	for w in path.windows(2)
	{
		let (s1, s2) = (w[0], w[1]);
		let mut line = None;
		'search: for &(bx, by, sd, si) in &block_terms(s1)
		{
			for &(bx2, by2, dd, di) in &block_terms(s2)
			{
				if bx != bx2 || by != by2
				{
					continue;
				}
				let active = if bx >= 1 && by >= 1
				{
					pc.get_normal(sd, si, dd, di)
				}
				else if bx == 0 && by >= 1 && sd == TermDir::E && dd == TermDir::E && si != di
				{
					pc.get_nx(si, di).unwrap_or(false)
				}
				else if bx >= 1 && by == 0 && sd == TermDir::N && dd == TermDir::N && si != di
				{
					pc.get_ny(si, di).unwrap_or(false)
				}
				else
				{
					false
				};
				if active
				{
					let kind = if bx >= 1 && by >= 1
					{
						"normal"
					}
					else if bx == 0
					{
						"nx"
					}
					else
					{
						"ny"
					};
					line = Some(format!(
						"  ({}, {}, {:?}, {}) -> ({}, {}, {:?}, {}): {} block ({}, {}) port {}{}->{}{}\n",
						s1.x, s1.y, s1.dir, s1.idx, s2.x, s2.y, s2.dir, s2.idx, kind, bx, by, dir_name(sd), si, dir_name(dd), di
					));
					break 'search;
				}
			}
		}
		out.push_str(&line.unwrap_or_else(|| format!("  ({:?}) -> ({:?}): <no connecting port found>\n", s1, s2)));
	}
	out
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::state::TermDir::*;

	#[test]
	fn missing_normal_section_fails()
	{
		assert!(parse(2, "nx: (none)").is_err());
	}

	#[test]
	fn empty_sections_print_none()
	{
		let pc = PortConfig::create(2).unwrap();
		assert_eq!(print(&pc), "normal: (none); nx: (none); ny: (none)");
	}

	#[test]
	fn round_trips_through_print_and_parse()
	{
		let n = 3;
		let mut pc = PortConfig::create(n).unwrap();
		pc.set_normal(N, 0, W, 1, true);
		pc.set_nx(0, 2, true).unwrap();
		pc.set_ny(1, 2, true).unwrap();
		let printed = print(&pc);
		let reparsed = parse(n, &printed).unwrap();
		assert_eq!(pc, reparsed);
	}

	#[test]
	fn out_of_range_and_self_loop_entries_are_dropped()
	{
		let n = 2;
		let pc = parse(n, "normal: (none); nx: E0->E0, E5->E1; ny: (none)").unwrap();
		assert!(pc.active_indices().is_empty());
	}

	#[test]
	fn nx_and_ny_sections_accept_entries_written_with_the_other_letter()
	{
		// The grammar (spec §6) does not require nx/ny entries to spell
		// their terminals with E/N; only si != di and in-range matter.
		let pc = parse(2, "normal: (none); nx: N0->N1; ny: (none)").unwrap();
		assert!(pc.get_nx(0, 1).unwrap());

		let pc = parse(2, "normal: (none); nx: (none); ny: E0->E1").unwrap();
		assert!(pc.get_ny(0, 1).unwrap());
	}

	#[test]
	fn detect_nterm_floors_at_two()
	{
		assert_eq!(detect_nterm("normal: (none); nx: (none); ny: (none)"), 2);
		assert_eq!(detect_nterm("normal: E0->N5"), 6);
	}

	#[test]
	fn case_insensitive_directions()
	{
		let pc = parse(2, "normal: w0->n1").unwrap();
		assert!(pc.get_normal(W, 0, N, 1));
	}

	#[test]
	fn print_table_marks_active_ports()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(W, 0, W, 1, true);
		let table = print_table(&pc);
		assert!(table.contains("normal block port table"));
		assert!(table.contains('*'));
	}

	#[test]
	fn print_path_renders_every_state()
	{
		let path = vec![crate::state::start(), crate::state::goal()];
		let rendered = print_path(&path);
		assert_eq!(rendered, "(0, 1, E, 0) -> (0, 1, E, 1)");
	}

	#[test]
	fn print_path_grid_places_start_and_goal_on_one_row()
	{
		let path = vec![crate::state::start(), crate::state::goal()];
		let grid = print_path_grid(&path);
		assert_eq!(grid.lines().count(), 1);
	}

	#[test]
	fn print_path_verbose_finds_the_connecting_normal_port()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(W, 0, W, 1, true);
		let path = vec![crate::state::start(), crate::state::goal()];
		let verbose = print_path_verbose(&pc, &path);
		assert!(verbose.contains("normal block (1, 1)"));
	}
}
