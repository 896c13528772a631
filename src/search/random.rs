/*!
Random sampler (spec §4.F): each trial picks a uniform `k` in
`[min_k, max_k]` and `k` distinct candidate ports via a partial
Fisher-Yates shuffle, then hands the resulting [`PortConfig`] to the
caller.
*/

use crate::error::{MazeError, Result};
use crate::port_config::PortConfig;
use crate::rng::Xorshift64;

/// Run trials until `visit` returns `false` (target length reached, or
/// the host's interrupt flag was observed).
pub fn random_search<F: FnMut(&PortConfig) -> bool>(n: usize, min_k: usize, max_k: usize, rng: &mut Xorshift64, mut visit: F) -> Result<()>
{
	if min_k > max_k
	{
		return Err(MazeError::InvalidArgument(format!("min_k ({}) must not exceed max_k ({})", min_k, max_k)));
	}
	let base = PortConfig::create(n)?;
	let mut candidates = base.candidate_indices();
	let total = candidates.len();
	let max_k = max_k.min(total);

	loop
	{
		let k = min_k + rng.next_below(max_k - min_k + 1);
		// Partial Fisher-Yates: shuffle the first k slots into a random
		// selection drawn without replacement from the whole candidate list.
		for i in 0..k
		{
			let j = i + rng.next_below(total - i);
			candidates.swap(i, j);
		}

		let mut pc = PortConfig::create(n)?;
		for &ci in &candidates[0..k]
		{
			pc.flat_set(ci, true);
		}

		if !visit(&pc)
		{
			return Ok(());
		}
	}
}
