/*!
Abstract reachability filter (spec §4.C).

Any real path in the infinite grid projects onto a walk in a small
quotient graph with `2*nterm` vertices: one class per EW terminal index
and one per NS terminal index. Unreachability in this quotient implies
unreachability in the concrete infinite graph, so it is used to reject
dead port configurations before paying for a full solve.

For `nterm <= 32` the quotient has at most 64 vertices and the frontier
expansion is done with plain `u64` bitmasks (no heap allocation per
call); larger `nterm` transparently falls back to a multi-word bitset of
the same shape.
*/

use crate::port_config::PortConfig;

/// Above this many vertices (`nterm > 32`), a single `u64` mask can no
/// longer hold the quotient graph and [`abstract_reach_general`] takes
/// over. Real searches stay well under this.
const FAST_VERTEX_LIMIT: usize = 64;

/// Vertex id for EW-class terminal `i`.
fn ew_vertex(i: usize) -> usize
{
	i
}

/// Vertex id for NS-class terminal `i`.
fn ns_vertex(n: usize, i: usize) -> usize
{
	n + i
}

/// Build the `2n`-vertex adjacency as one `u64` bitmask per vertex, for
/// `bits <= 64`. Entirely stack-resident: no allocation per call.
fn build_adjacency_fast(pc: &PortConfig) -> [u64; FAST_VERTEX_LIMIT]
{
	let n = pc.nterm();
	let mut adj = [0u64; FAST_VERTEX_LIMIT];

	use crate::state::TermDir::*;
	for sd in [E, W, N, S]
	{
		for si in 0..n
		{
			for dd in [E, W, N, S]
			{
				for di in 0..n
				{
					if !pc.get_normal(sd, si, dd, di)
					{
						continue;
					}
					let src = if matches!(sd, E | W) { ew_vertex(si) } else { ns_vertex(n, si) };
					let dst = if matches!(dd, E | W) { ew_vertex(di) } else { ns_vertex(n, di) };
					adj[src] |= 1u64 << dst;
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
			if pc.get_nx(si, di).expect("si != di checked above")
			{
				adj[ew_vertex(si)] |= 1u64 << ew_vertex(di);
			}
			if pc.get_ny(si, di).expect("si != di checked above")
			{
				adj[ns_vertex(n, si)] |= 1u64 << ns_vertex(n, di);
			}
		}
	}
	adj
}

/// BFS frontier expansion over a `u64`-bitmask adjacency. `reachable` and
/// `frontier` start with only bit 0 (the start class) set; bit 1 is the
/// goal class. Pure register/stack state, no heap allocation.
fn abstract_reach_fast(pc: &PortConfig) -> bool
{
	let adj = build_adjacency_fast(pc);

	let mut reachable: u64 = 1;
	let mut frontier: u64 = 1;

	loop
	{
		if reachable & 0b10 != 0
		{
			return true;
		}
		let mut next: u64 = 0;
		let mut f = frontier;
		while f != 0
		{
			let v = f.trailing_zeros() as usize;
			f &= f - 1;
			next |= adj[v];
		}
		let merged = reachable | next;
		if merged == reachable
		{
			return reachable & 0b10 != 0;
		}
		frontier = merged & !reachable;
		reachable = merged;
	}
}

/// A growable bitset over `[0, bits)`, backed by `u64` words. Only used
/// by [`abstract_reach_general`], the `nterm > 32` fallback.
struct Bitset
{
	words: Vec<u64>,
}

impl Bitset
{
	fn new(bits: usize) -> Bitset
	{
		Bitset { words: vec![0u64; (bits + 63) / 64] }
	}

	fn set(&mut self, i: usize)
	{
		self.words[i / 64] |= 1u64 << (i % 64);
	}

	fn get(&self, i: usize) -> bool
	{
		(self.words[i / 64] >> (i % 64)) & 1 == 1
	}

	/// ORs `other` into `self`, reporting whether anything new was added.
	fn or_assign_changed(&mut self, other: &Bitset) -> bool
	{
		let mut changed = false;
		for (a, b) in self.words.iter_mut().zip(other.words.iter())
		{
			let merged = *a | *b;
			if merged != *a
			{
				changed = true;
			}
			*a = merged;
		}
		changed
	}
}

/// Build the `2n`-vertex adjacency as a bitset per vertex.
fn build_adjacency_general(pc: &PortConfig) -> Vec<Bitset>
{
	let n = pc.nterm();
	let bits = 2 * n;
	let mut adj: Vec<Bitset> = (0..bits).map(|_| Bitset::new(bits)).collect();

	use crate::state::TermDir::*;
	for sd in [E, W, N, S]
	{
		for si in 0..n
		{
			for dd in [E, W, N, S]
			{
				for di in 0..n
				{
					if !pc.get_normal(sd, si, dd, di)
					{
						continue;
					}
					let src = if matches!(sd, E | W) { ew_vertex(si) } else { ns_vertex(n, si) };
					let dst = if matches!(dd, E | W) { ew_vertex(di) } else { ns_vertex(n, di) };
					adj[src].set(dst);
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
			if pc.get_nx(si, di).expect("si != di checked above")
			{
				adj[ew_vertex(si)].set(ew_vertex(di));
			}
			if pc.get_ny(si, di).expect("si != di checked above")
			{
				adj[ns_vertex(n, si)].set(ns_vertex(n, di));
			}
		}
	}
	adj
}

fn abstract_reach_general(pc: &PortConfig) -> bool
{
	let n = pc.nterm();
	let bits = 2 * n;
	let adj = build_adjacency_general(pc);

	let mut reachable = Bitset::new(bits);
	reachable.set(0);
	let mut frontier = Bitset::new(bits);
	frontier.set(0);

	loop
	{
		if reachable.get(1)
		{
			return true;
		}
		let mut next = Bitset::new(bits);
		for v in 0..bits
		{
			if !frontier.get(v)
			{
				continue;
			}
			next.or_assign_changed(&adj[v]);
		}
		// Only keep newly discovered vertices in the next frontier.
		let mut newly = Bitset::new(bits);
		for v in 0..bits
		{
			if next.get(v) && !reachable.get(v)
			{
				newly.set(v);
			}
		}
		if !reachable.or_assign_changed(&next)
		{
			return reachable.get(1);
		}
		frontier = newly;
	}
}

/// `true` iff the goal's abstract class (vertex 1, the EW class of
/// terminal index 1) is reachable from the start's abstract class
/// (vertex 0) in the quotient graph built from `pc`'s active ports.
///
/// For `nterm <= 32` (so the quotient has at most 64 vertices, the
/// common case), this runs with no heap allocation at all.
pub fn abstract_reach(pc: &PortConfig) -> bool
{
	if 2 * pc.nterm() <= FAST_VERTEX_LIMIT
	{
		abstract_reach_fast(pc)
	}
	else
	{
		abstract_reach_general(pc)
	}
}
