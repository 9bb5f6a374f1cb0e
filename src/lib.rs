pub mod node;

pub use node::*;

use log::debug;

use node::error::PruneError;
use node::raster::Pixel;

impl node::ImgTreeNode {
	/// Counts the leaves below this node whose color is within `tol` of `reference`.
	pub fn count_tolerant_leaves(&self, reference: &Pixel, tol: f64) -> usize {
		match self.children {
			Some(ref sects) => sects.iter().map(|s| s.count_tolerant_leaves(reference, tol)).sum(),
			None => (reference.dist(&self.avg) <= tol) as usize,
		}
	}

	/// "Prunes" the subtree by collapsing near-uniform branches into leaves.
	///
	/// A branch is collapsed when at least `pct` percent of its leaves are
	/// within `tol` of its own average; otherwise each child is considered
	/// against its own average in turn.
	pub fn prune(&mut self, pct: f64, tol: f64) {
		let collapse = match self.children {
			Some(_) => {
				let tolerant = self.count_tolerant_leaves(&self.avg, tol);
				tolerant as f64 / self.count_leaves() as f64 * 100. >= pct
			},
			None => return,
		};
		if collapse {
			self.children = None;
		} else if let Some(ref mut sects) = self.children {
			sects.iter_mut().for_each(|s| s.prune(pct, tol));
		}
	}
}

impl node::ImgTree {
	/// Trims the tree as high up as possible; see `ImgTreeNode::prune`.
	///
	/// Meant for trees that have not been pruned before. Pruning an empty
	/// tree does nothing.
	pub fn prune(&mut self, pct: f64, tol: f64) -> Result<(), PruneError> {
		if !(0. ..=100.).contains(&pct) {
			return Err(PruneError::PercentOutOfRange(pct));
		}
		if tol.is_nan() {
			return Err(PruneError::InvalidTolerance(tol));
		}
		let before = self.count_leaves();
		if let Some(root) = self.root_mut() {
			root.prune(pct, tol);
		}
		debug!("pruned at {}% within {}: {} leaves down to {}", pct, tol, before, self.count_leaves());
		Ok(())
	}
}
