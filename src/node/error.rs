use thiserror::Error;

/// Reason why a tree couldn't be rendered to a raster.
#[derive(Debug, Error, PartialEq)]
pub enum DrawError {
	/// The tree has no nodes to paint.
	#[error("cannot render an empty tree")]
	EmptyTree,
	/// A scale of zero would produce an empty raster.
	#[error("render scale must be at least 1")]
	ZeroScale,
	/// The scaled output wouldn't fit in `u32` dimensions.
	#[error("rendering {width}x{height} at scale {scale} exceeds the maximum raster size")]
	TooLarge {
		width: u32,
		height: u32,
		scale: u32,
	},
	/// The target raster doesn't have the scaled dimensions of the tree.
	#[error("target raster is {actual_width}x{actual_height}, expected {width}x{height}")]
	DimensionMismatch {
		width: u32,
		height: u32,
		actual_width: u32,
		actual_height: u32,
	},
}

/// Reason why an image couldn't be turned into a tree.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyzeError {
	/// The image has no pixels.
	#[error("image dimensions cannot be zero, got {0}x{1}")]
	ZeroDimension(u32, u32),
}

/// Reason why a tree couldn't be pruned.
#[derive(Debug, Error, PartialEq)]
pub enum PruneError {
	/// The leaf percentage isn't within `0..=100`.
	#[error("prune percentage must be between 0 and 100, got {0}")]
	PercentOutOfRange(f64),
	/// The color tolerance is not a number.
	#[error("prune tolerance must be a number, got {0}")]
	InvalidTolerance(f64),
}
