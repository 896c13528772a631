/*!
Combinatorial enumerator (spec §4.E): every `k`-subset of the candidate
ports, for `k` in `[min_k, max_k]`, in lexicographic order.
*/

use crate::error::{MazeError, Result};
use crate::port_config::PortConfig;

/// Advance `combo` (a sorted index array into `[0, total)`) to the next
/// combination in lexicographic order. Returns `false` once exhausted.
fn next_combination(combo: &mut [usize], total: usize) -> bool
{
	let k = combo.len();
	if k == 0
	{
		return false;
	}
	let mut i = k - 1;
	loop
	{
		if combo[i] < total - k + i
		{
			combo[i] += 1;
			for j in i + 1..k
			{
				combo[j] = combo[j - 1] + 1;
			}
			return true;
		}
		if i == 0
		{
			return false;
		}
		i -= 1;
	}
}

/// Enumerate every `k`-subset of the candidate ports of an `n`-terminal
/// maze, for `k` from `min_k` to `max_k` (clamped to the candidate
/// count), building the corresponding [`PortConfig`] and calling
/// `visit` on it.
///
/// `visit` returns `true` to keep going, `false` to stop early (the
/// caller reached its target length or was interrupted).
pub fn enumerate<F: FnMut(&PortConfig) -> bool>(n: usize, min_k: usize, max_k: usize, mut visit: F) -> Result<()>
{
	if min_k > max_k
	{
		return Err(MazeError::InvalidArgument(format!("min_k ({}) must not exceed max_k ({})", min_k, max_k)));
	}
	let base = PortConfig::create(n)?;
	let candidates = base.candidate_indices();
	let total = candidates.len();
	let max_k = max_k.min(total);

	for k in min_k..=max_k
	{
		let mut combo: Vec<usize> = (0..k).collect();
		loop
		{
			let mut pc = PortConfig::create(n)?;
			for &ci in &combo
			{
				pc.flat_set(candidates[ci], true);
			}
			if !visit(&pc)
			{
				return Ok(());
			}
			if !next_combination(&mut combo, total)
			{
				break;
			}
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn rejects_inverted_range()
	{
		assert!(enumerate(2, 3, 1, |_| true).is_err());
	}

	#[test]
	fn k_zero_visits_exactly_the_empty_config()
	{
		let mut seen = 0;
		enumerate(2, 0, 0, |pc| {
			seen += 1;
			assert!(pc.active_indices().is_empty());
			true
		})
		.unwrap();
		assert_eq!(seen, 1);
	}

	#[test]
	fn agrees_with_itertools_combinations_for_a_single_k()
	{
		use itertools::Itertools;
		let n = 3;
		let base = PortConfig::create(n).unwrap();
		let candidates = base.candidate_indices();
		let k = 2;
		let expected: Vec<Vec<usize>> = candidates.iter().copied().combinations(k).collect();

		let mut seen = Vec::new();
		enumerate(n, k, k, |pc| {
			seen.push(pc.active_indices());
			true
		})
		.unwrap();

		itertools::assert_equal(seen, expected);
	}

	#[test]
	fn counts_match_binomial_coefficients()
	{
		let n = 2;
		let base = PortConfig::create(n).unwrap();
		let total = base.candidate_indices().len();
		let mut seen = 0;
		enumerate(n, 0, total, |_| {
			seen += 1;
			true
		})
		.unwrap();
		let expected: u64 = (0..=total as u64).map(|k| binomial(total as u64, k)).sum();
		assert_eq!(seen, expected);
	}

	#[test]
	fn every_visited_config_has_exactly_k_active_ports()
	{
		enumerate(2, 2, 2, |pc| {
			assert_eq!(pc.active_indices().len(), 2);
			true
		})
		.unwrap();
	}

	#[test]
	fn stopping_early_honours_the_visit_callback()
	{
		let mut seen = 0;
		enumerate(2, 0, 4, |_| {
			seen += 1;
			seen < 3
		})
		.unwrap();
		assert_eq!(seen, 3);
	}

	fn binomial(n: u64, k: u64) -> u64
	{
		if k > n
		{
			return 0;
		}
		let k = k.min(n - k);
		let mut result = 1u64;
		for i in 0..k
		{
			result = result * (n - i) / (i + 1);
		}
		result
	}
}
