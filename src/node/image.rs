use log::debug;

use super::error::*;
use super::raster::{PixelGrid, Raster, RasterMut};
use super::stats::RegionStats;
use super::{ImgTree, ImgTreeNode, Rect};

impl ImgTreeNode {
	/// Paints every leaf below this node into `img`, each source pixel
	/// becoming a `scale` by `scale` block.
	///
	/// Branch nodes paint nothing themselves.
	pub fn paint<R: RasterMut + ?Sized>(&self, img: &mut R, scale: u32) {
		match self.children {
			Some(ref sects) => {
				for section in sects.iter() {
					section.paint(img, scale);
				}
			},
			None => {
				let r = &self.rect;
				for row in (r.upper * scale)..((r.lower + 1) * scale) {
					for col in (r.left * scale)..((r.right + 1) * scale) {
						img.set_pixel(col, row, self.avg);
					}
				}
			},
		}
	}
}

impl ImgTree {
	/// Analyzes a raster into a tree with one leaf per pixel.
	///
	/// The prefix statistics are only kept for the duration of the build.
	pub fn from_raster<R: Raster + ?Sized>(img: &R) -> Result<Self, AnalyzeError> {
		let (width, height) = (img.width(), img.height());
		if width == 0 || height == 0 {
			return Err(AnalyzeError::ZeroDimension(width, height));
		}
		let stats = RegionStats::new(img);
		let root = ImgTreeNode::build(&stats, Rect::new(0, 0, height - 1, width - 1));
		let tree = ImgTree { root: Some(root), width, height };
		debug!("built tree over {}x{} image: {} nodes, depth {}",
			width, height, tree.count_nodes(), tree.depth());
		Ok(tree)
	}

	/// Renders the tree into a new grid `scale` times the size of the
	/// source image.
	///
	/// May be called on pruned trees.
	pub fn render(&self, scale: u32) -> Result<PixelGrid, DrawError> {
		self.render_as(scale)
	}

	/// Like `render`, but allocates any kind of `RasterMut`.
	pub fn render_as<R: RasterMut>(&self, scale: u32) -> Result<R, DrawError> {
		if scale == 0 {
			return Err(DrawError::ZeroScale);
		}
		let (width, height) = self.scaled_size(scale)?;
		let mut img = R::blank(width, height);
		self.render_into(&mut img, scale)?;
		Ok(img)
	}

	/// Output dimensions at `scale`, if they fit in a `u32`.
	fn scaled_size(&self, scale: u32) -> Result<(u32, u32), DrawError> {
		match (self.width.checked_mul(scale), self.height.checked_mul(scale)) {
			(Some(w), Some(h)) => Ok((w, h)),
			_ => Err(DrawError::TooLarge { width: self.width, height: self.height, scale }),
		}
	}

	/// Paints the tree's leaves into an existing raster, which must be
	/// exactly `scale` times the size of the source image.
	pub fn render_into<R: RasterMut + ?Sized>(&self, img: &mut R, scale: u32) -> Result<(), DrawError> {
		if scale == 0 {
			return Err(DrawError::ZeroScale);
		}
		let (width, height) = self.scaled_size(scale)?;
		if img.width() != width || img.height() != height {
			return Err(DrawError::DimensionMismatch {
				width,
				height,
				actual_width: img.width(),
				actual_height: img.height(),
			});
		}
		match self.root {
			Some(ref root) => root.paint(img, scale),
			None => return Err(DrawError::EmptyTree),
		}
		debug!("rendered {} leaves into {}x{} raster", self.count_leaves(), width, height);
		Ok(())
	}
}
