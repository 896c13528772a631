/*!
Port configuration (PC): the maze itself.

A maze is an infinite grid of three kinds of repeated blocks — `normal`,
`nx` and `ny` — sharing one port configuration across every instance of
their kind. This module stores that configuration as three boolean
arrays and provides typed, flat-index, and bulk access to them.

See spec §3/§4.A for the full data model and the port-array invariants.
*/

use crate::error::{MazeError, Result};
use crate::rng::Xorshift64;
use crate::state::TermDir;

/// A port configuration for a fixed terminal count `n` (`nterm`).
///
/// `normal[sd*n+si][dd*n+di]` flattened row-major is the port array for
/// `normal` blocks; `nx`/`ny` carry only same-direction, distinct-index
/// edges (`si != di`), flattened with [`edge_index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortConfig
{
	n: usize,
	normal: Vec<bool>,
	nx: Vec<bool>,
	ny: Vec<bool>,
}

/// `adjust(si, di)` folds the `n*(n-1)` off-diagonal pairs of a `n x n`
/// grid into a contiguous `[0, n-1)` range per source index, excluding
/// the `si == di` diagonal.
fn adjust(si: usize, di: usize) -> usize
{
	if di < si
	{
		di
	}
	else
	{
		di - 1
	}
}

fn edge_index(n: usize, si: usize, di: usize) -> usize
{
	si * (n - 1) + adjust(si, di)
}

fn normal_index(n: usize, sd: usize, si: usize, dd: usize, di: usize) -> usize
{
	let n4 = 4 * n;
	let src = sd * n + si;
	let dst = dd * n + di;
	src * n4 + dst
}

impl PortConfig
{
	/// Create an all-zero configuration for the given terminal count.
	/// `n` must be >= 2.
	pub fn create(n: usize) -> Result<PortConfig>
	{
		if n < 2
		{
			return Err(MazeError::InvalidArgument(format!("nterm must be >= 2, got {}", n)));
		}
		let n4 = 4 * n;
		Ok(PortConfig {
			n,
			normal: vec![false; n4 * n4],
			nx: vec![false; n * (n - 1)],
			ny: vec![false; n * (n - 1)],
		})
	}

	pub fn nterm(&self) -> usize
	{
		self.n
	}

	/// Total flat length `T = (4n)^2 + 2n(n-1)`.
	pub fn total_len(&self) -> usize
	{
		self.normal.len() + self.nx.len() + self.ny.len()
	}

	pub fn clear(&mut self)
	{
		self.normal.iter_mut().for_each(|b| *b = false);
		self.nx.iter_mut().for_each(|b| *b = false);
		self.ny.iter_mut().for_each(|b| *b = false);
	}

	// --- typed accessors -------------------------------------------------

	pub fn get_normal(&self, sd: TermDir, si: usize, dd: TermDir, di: usize) -> bool
	{
		self.normal[normal_index(self.n, sd.as_index(), si, dd.as_index(), di)]
	}

	pub fn set_normal(&mut self, sd: TermDir, si: usize, dd: TermDir, di: usize, val: bool)
	{
		let idx = normal_index(self.n, sd.as_index(), si, dd.as_index(), di);
		self.normal[idx] = val;
	}

	pub fn get_nx(&self, si: usize, di: usize) -> Result<bool>
	{
		if si == di
		{
			return Err(MazeError::InvalidArgument("nx port requires si != di".into()));
		}
		Ok(self.nx[edge_index(self.n, si, di)])
	}

	pub fn set_nx(&mut self, si: usize, di: usize, val: bool) -> Result<()>
	{
		if si == di
		{
			return Err(MazeError::InvalidArgument("nx port requires si != di".into()));
		}
		let idx = edge_index(self.n, si, di);
		self.nx[idx] = val;
		Ok(())
	}

	pub fn get_ny(&self, si: usize, di: usize) -> Result<bool>
	{
		if si == di
		{
			return Err(MazeError::InvalidArgument("ny port requires si != di".into()));
		}
		Ok(self.ny[edge_index(self.n, si, di)])
	}

	pub fn set_ny(&mut self, si: usize, di: usize, val: bool) -> Result<()>
	{
		if si == di
		{
			return Err(MazeError::InvalidArgument("ny port requires si != di".into()));
		}
		let idx = edge_index(self.n, si, di);
		self.ny[idx] = val;
		Ok(())
	}

	// --- flat accessors ----------------------------------------------------
	// Layout: [normal | nx | ny].

	pub fn flat_get(&self, i: usize) -> bool
	{
		if i < self.normal.len()
		{
			return self.normal[i];
		}
		let i = i - self.normal.len();
		if i < self.nx.len()
		{
			return self.nx[i];
		}
		self.ny[i - self.nx.len()]
	}

	pub fn flat_set(&mut self, i: usize, val: bool)
	{
		if i < self.normal.len()
		{
			self.normal[i] = val;
			return;
		}
		let i = i - self.normal.len();
		if i < self.nx.len()
		{
			self.nx[i] = val;
			return;
		}
		self.ny[i - self.nx.len()] = val;
	}

	pub fn flat_flip(&mut self, i: usize)
	{
		let cur = self.flat_get(i);
		self.flat_set(i, !cur);
	}

	/// Convert a flat normal-block index into its `(sd, si, dd, di)` terminal
	/// quadruple. Panics if `i` does not address the normal section.
	pub fn decode_normal(&self, i: usize) -> (TermDir, usize, TermDir, usize)
	{
		let n = self.n;
		let n4 = 4 * n;
		assert!(i < n4 * n4, "index {} is not within the normal section", i);
		let src = i / n4;
		let dst = i % n4;
		(TermDir::from_index(src / n), src % n, TermDir::from_index(dst / n), dst % n)
	}

	/// `true` iff flat index `i` addresses a normal-block port whose source
	/// terminal equals its destination terminal. nx/ny ports never are (they
	/// exclude `si == di` by construction).
	pub fn classify_self_loop(&self, i: usize) -> bool
	{
		if i >= self.normal.len()
		{
			return false;
		}
		let (sd, si, dd, di) = self.decode_normal(i);
		sd == dd && si == di
	}

	/// Bulk-overwrite all ports from a flat boolean slice of length
	/// `total_len()`.
	pub fn set_from_slice(&mut self, data: &[bool])
	{
		assert_eq!(data.len(), self.total_len());
		let (normal, rest) = data.split_at(self.normal.len());
		let (nx, ny) = rest.split_at(self.nx.len());
		self.normal.copy_from_slice(normal);
		self.nx.copy_from_slice(nx);
		self.ny.copy_from_slice(ny);
	}

	/// Snapshot all ports as a flat boolean vector, in `[normal | nx | ny]`
	/// order. Used by the top-down driver's visited set and stacks.
	pub fn to_snapshot(&self) -> Vec<bool>
	{
		let mut v = Vec::with_capacity(self.total_len());
		v.extend_from_slice(&self.normal);
		v.extend_from_slice(&self.nx);
		v.extend_from_slice(&self.ny);
		v
	}

	/// Each port independently set with 50% probability.
	pub fn randomize(&mut self, rng: &mut Xorshift64)
	{
		for i in 0..self.total_len()
		{
			self.flat_set(i, rng.next_bool());
		}
	}

	/// All candidate flat indices: every port that is not a normal-block
	/// self-loop. nx/ny ports are always candidates.
	pub fn candidate_indices(&self) -> Vec<usize>
	{
		(0..self.total_len()).filter(|&i| !self.classify_self_loop(i)).collect()
	}

	/// Indices of every currently-active port.
	pub fn active_indices(&self) -> Vec<usize>
	{
		(0..self.total_len()).filter(|&i| self.flat_get(i)).collect()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::state::TermDir::*;

	#[test]
	fn create_rejects_small_n()
	{
		assert!(PortConfig::create(1).is_err());
		assert!(PortConfig::create(0).is_err());
	}

	#[test]
	fn total_len_matches_formula()
	{
		let n = 3;
		let pc = PortConfig::create(n).unwrap();
		let expected = (4 * n) * (4 * n) + 2 * n * (n - 1);
		assert_eq!(pc.total_len(), expected);
	}

	#[test]
	fn flat_typed_equivalence_normal()
	{
		let n = 3;
		let mut pc = PortConfig::create(n).unwrap();
		for sd in TermDir::ALL
		{
			for si in 0..n
			{
				for dd in TermDir::ALL
				{
					for di in 0..n
					{
						pc.set_normal(sd, si, dd, di, true);
						let flat = normal_index(n, sd.as_index(), si, dd.as_index(), di);
						assert!(pc.flat_get(flat));
						assert!(pc.get_normal(sd, si, dd, di));
						pc.set_normal(sd, si, dd, di, false);
					}
				}
			}
		}
	}

	#[test]
	fn flat_typed_equivalence_nx_ny()
	{
		let n = 4;
		let mut pc = PortConfig::create(n).unwrap();
		let normal_len = (4 * n) * (4 * n);
		for si in 0..n
		{
			for di in 0..n
			{
				if si == di
				{
					continue;
				}
				pc.set_nx(si, di, true).unwrap();
				let flat = normal_len + edge_index(n, si, di);
				assert!(pc.flat_get(flat));
				assert!(pc.get_nx(si, di).unwrap());
				pc.set_nx(si, di, false).unwrap();

				pc.set_ny(si, di, true).unwrap();
				let flat = normal_len + n * (n - 1) + edge_index(n, si, di);
				assert!(pc.flat_get(flat));
				assert!(pc.get_ny(si, di).unwrap());
				pc.set_ny(si, di, false).unwrap();
			}
		}
	}

	#[test]
	fn nx_ny_reject_self_loop()
	{
		let mut pc = PortConfig::create(2).unwrap();
		assert!(pc.set_nx(0, 0, true).is_err());
		assert!(pc.get_ny(1, 1).is_err());
	}

	#[test]
	fn classify_self_loop_only_flags_normal_diagonal()
	{
		let n = 2;
		let pc = PortConfig::create(n).unwrap();
		let idx = normal_index(n, E.as_index(), 0, E.as_index(), 0);
		assert!(pc.classify_self_loop(idx));
		let idx2 = normal_index(n, E.as_index(), 0, W.as_index(), 0);
		assert!(!pc.classify_self_loop(idx2));
		// nx/ny section never classifies as self loop.
		let nx_first = (4 * n) * (4 * n);
		assert!(!pc.classify_self_loop(nx_first));
	}

	#[test]
	fn clone_and_clear_roundtrip()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(E, 0, N, 1, true);
		let cloned = pc.clone();
		assert_eq!(cloned, pc);
		pc.clear();
		assert_ne!(cloned, pc);
		assert!(pc.active_indices().is_empty());
	}

	#[test]
	fn flip_toggles()
	{
		let mut pc = PortConfig::create(2).unwrap();
		assert!(!pc.flat_get(0));
		pc.flat_flip(0);
		assert!(pc.flat_get(0));
		pc.flat_flip(0);
		assert!(!pc.flat_get(0));
	}

	#[test]
	fn snapshot_round_trips()
	{
		let mut pc = PortConfig::create(2).unwrap();
		pc.set_normal(E, 0, N, 1, true);
		let snap = pc.to_snapshot();
		let mut pc2 = PortConfig::create(2).unwrap();
		pc2.set_from_slice(&snap);
		assert_eq!(pc, pc2);
	}
}
