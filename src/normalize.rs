/*!
Canonical normalisation (spec §4.B).

A port configuration has two independent index symmetries:

* **EW symmetry** — indices 0 and 1 are fixed (they name start/goal);
  indices `[2, n)` may be permuted, applying the same permutation to
  both E and W terminals.
* **NS symmetry** — all of `[0, n)` may be permuted freely, applying the
  same permutation to both N and S terminals.

`normalize` picks the representative of a configuration's symmetry
orbit by renaming indices in first-appearance order while scanning
active ports in a fixed total order (normal, then nx, then ny; within
each, by flat index — source terminal inspected before destination).
*/

use crate::port_config::PortConfig;
use crate::state::TermDir;

const UNMAPPED: usize = usize::MAX;

fn is_ew(d: TermDir) -> bool
{
	matches!(d, TermDir::E | TermDir::W)
}

/// Assign `idx` the next free image in `map` if not already mapped.
fn touch(map: &mut [usize], next_free: &mut usize, idx: usize)
{
	if map[idx] == UNMAPPED
	{
		map[idx] = *next_free;
		*next_free += 1;
	}
}

/// Compute the `(ew_map, ns_map)` renaming for `pc`, without applying it.
fn build_maps(pc: &PortConfig) -> (Vec<usize>, Vec<usize>)
{
	let n = pc.nterm();
	let mut ew_map = vec![UNMAPPED; n];
	let mut ns_map = vec![UNMAPPED; n];
	// Indices 0 and 1 name start/goal and are always fixed.
	ew_map[0] = 0;
	ew_map[1] = 1;
	let mut ew_next = 2usize;
	let mut ns_next = 0usize;

	// normal ports, scanned by flat index order (src*4n+dst).
	for sd in TermDir::ALL
	{
		for si in 0..n
		{
			for dd in TermDir::ALL
			{
				for di in 0..n
				{
					if !pc.get_normal(sd, si, dd, di)
					{
						continue;
					}
					if is_ew(sd)
					{
						touch(&mut ew_map, &mut ew_next, si);
					}
					else
					{
						touch(&mut ns_map, &mut ns_next, si);
					}
					if is_ew(dd)
					{
						touch(&mut ew_map, &mut ew_next, di);
					}
					else
					{
						touch(&mut ns_map, &mut ns_next, di);
					}
				}
			}
		}
	}

	// nx ports: E[si] -> E[di], si != di.
	for si in 0..n
	{
		for di in 0..n
		{
			if si == di
			{
				continue;
			}
			if pc.get_nx(si, di).unwrap()
			{
				touch(&mut ew_map, &mut ew_next, si);
				touch(&mut ew_map, &mut ew_next, di);
			}
		}
	}

	// ny ports: N[si] -> N[di], si != di.
	for si in 0..n
	{
		for di in 0..n
		{
			if si == di
			{
				continue;
			}
			if pc.get_ny(si, di).unwrap()
			{
				touch(&mut ns_map, &mut ns_next, si);
				touch(&mut ns_map, &mut ns_next, di);
			}
		}
	}

	// Any index never touched by an active port still needs an image,
	// assigned in natural order.
	for i in 0..n
	{
		touch(&mut ew_map, &mut ew_next, i);
		touch(&mut ns_map, &mut ns_next, i);
	}

	(ew_map, ns_map)
}

/// Produce the canonical representative of `pc`'s symmetry orbit.
pub fn normalize(pc: &PortConfig) -> PortConfig
{
	let n = pc.nterm();
	let (ew_map, ns_map) = build_maps(pc);
	let mut out = PortConfig::create(n).expect("nterm already validated by source PortConfig");

	let rename = |d: TermDir, i: usize| -> usize {
		if is_ew(d)
		{
			ew_map[i]
		}
		else
		{
			ns_map[i]
		}
	};

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
						out.set_normal(sd, rename(sd, si), dd, rename(dd, di), true);
					}
				}
			}
		}
	}
	for si in 0..n
	{
		for di in 0..n
		{
			if si == di
			{
				continue;
			}
			if pc.get_nx(si, di).unwrap()
			{
				out.set_nx(ew_map[si], ew_map[di], true).expect("renamed indices stay distinct");
			}
			if pc.get_ny(si, di).unwrap()
			{
				out.set_ny(ns_map[si], ns_map[di], true).expect("renamed indices stay distinct");
			}
		}
	}
	out
}

/// `true` iff `pc` is already the canonical representative of its orbit.
pub fn is_canonical(pc: &PortConfig) -> bool
{
	normalize(pc) == *pc
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::state::TermDir::*;

	#[test]
	fn normalize_is_idempotent()
	{
		let mut pc = PortConfig::create(4).unwrap();
		pc.set_normal(N, 3, W, 2, true);
		pc.set_nx(3, 1, true).unwrap();
		let once = normalize(&pc);
		let twice = normalize(&once);
		assert_eq!(once, twice);
	}

	#[test]
	fn empty_maze_is_canonical()
	{
		let pc = PortConfig::create(3).unwrap();
		assert!(is_canonical(&pc));
	}

	#[test]
	fn fixes_start_goal_indices()
	{
		// normal: N0->W1 ; nothing else. n=2 so only NS index 0 and EW index 1
		// (already fixed) appear; normalization must not alter the maze.
		let n = 2;
		let mut pc = PortConfig::create(n).unwrap();
		pc.set_normal(N, 0, W, 1, true);
		let normalized = normalize(&pc);
		assert_eq!(normalized, pc);
	}

	#[test]
	fn relabels_unused_high_indices_by_first_appearance()
	{
		let n = 3;
		let mut pc = PortConfig::create(n).unwrap();
		// Uses EW index 2 before anything establishes index order; should stay
		// put since it's the first (and only) non-fixed EW index seen.
		pc.set_normal(E, 0, W, 2, true);
		let normalized = normalize(&pc);
		assert!(normalized.get_normal(E, 0, W, 2));
	}

	#[test]
	fn permuting_ns_indices_normalizes_to_same_representative()
	{
		let n = 3;
		let mut a = PortConfig::create(n).unwrap();
		a.set_normal(N, 0, S, 1, true);
		let mut b = PortConfig::create(n).unwrap();
		// swap NS roles of 0 and 1: same shape, different raw labelling.
		b.set_normal(N, 1, S, 0, true);
		assert_eq!(normalize(&a), normalize(&b));
	}
}
