pub mod error;
pub mod image;
pub mod raster;
pub mod stats;

use raster::Pixel;
use stats::RegionStats;

/// An axis-aligned rectangle of pixels with inclusive bounds.
///
/// `upper`/`lower` are rows and `left`/`right` are columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
	pub upper: u32,
	pub left: u32,
	pub lower: u32,
	pub right: u32,
}

impl Rect {
	pub const fn new(upper: u32, left: u32, lower: u32, right: u32) -> Self {
		Rect { upper, left, lower, right }
	}

	pub fn width(&self) -> u32 {
		self.right - self.left + 1
	}

	pub fn height(&self) -> u32 {
		self.lower - self.upper + 1
	}

	pub fn area(&self) -> u64 {
		self.width() as u64 * self.height() as u64
	}

	pub fn is_pixel(&self) -> bool {
		self.upper == self.lower && self.left == self.right
	}

	/// Splits into the first (upper or left) and second halves.
	///
	/// The split coordinate is the last row or column of the first half.
	pub fn split(&self, split: Split) -> (Rect, Rect) {
		match split {
			Split::Vertical(i) => {
				debug_assert!(self.left <= i && i < self.right);
				(Rect { right: i, ..*self }, Rect { left: i + 1, ..*self })
			},
			Split::Horizontal(i) => {
				debug_assert!(self.upper <= i && i < self.lower);
				(Rect { lower: i, ..*self }, Rect { upper: i + 1, ..*self })
			},
		}
	}

	/// Mirrors the columns about the centerline of an image `width` wide.
	fn mirror(&mut self, width: u32) {
		let (left, right) = (width - 1 - self.right, width - 1 - self.left);
		self.left = left;
		self.right = right;
	}
}

/// A dividing line through a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
	/// Left half ends at this column.
	Vertical(u32),
	/// Upper half ends at this row.
	Horizontal(u32),
}

/// Node in a binary partition tree for storing an image.
///
/// May contain two subnodes (branch node) or none (leaf node). The subnodes'
/// rectangles exactly partition this node's rectangle.
///
/// It always carries the average color of its own rectangle, computed from
/// the source pixels rather than from the children, so any node can be
/// turned into a leaf without drift.
#[derive(Clone, Debug, PartialEq)]
pub struct ImgTreeNode {
	pub rect: Rect,
	pub avg: Pixel,
	pub children: Option<Box<[ImgTreeNode; 2]>>,
}

impl ImgTreeNode {
	pub fn leaf(rect: Rect, avg: Pixel) -> Self {
		ImgTreeNode { rect, avg, children: None }
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_none()
	}

	/// First (upper or left) child.
	pub fn a(&self) -> Option<&ImgTreeNode> {
		self.children.as_ref().map(|c| &c[0])
	}

	/// Second (lower or right) child.
	pub fn b(&self) -> Option<&ImgTreeNode> {
		self.children.as_ref().map(|c| &c[1])
	}

	/// Recursively builds the subtree covering `rect`.
	pub fn build(stats: &RegionStats, rect: Rect) -> Self {
		let mut node = Self::leaf(rect, stats.average(&rect));
		if !rect.is_pixel() {
			let (a, b) = rect.split(best_split(stats, &rect));
			node.children = Some(Box::new([Self::build(stats, a), Self::build(stats, b)]));
		}
		node
	}

	pub fn count_leaves(&self) -> usize {
		match self.children {
			Some(ref c) => c.iter().map(ImgTreeNode::count_leaves).sum(),
			None => 1,
		}
	}

	pub fn count_nodes(&self) -> usize {
		1 + self.children.iter().flat_map(|c| c.iter()).map(ImgTreeNode::count_nodes).sum::<usize>()
	}

	/// Length of the longest path from this node to a leaf, in edges.
	pub fn depth(&self) -> usize {
		match self.children {
			Some(ref c) => 1 + c.iter().map(ImgTreeNode::depth).max().unwrap_or(0),
			None => 0,
		}
	}

	/// Mirrors this node and every descendant about the vertical centerline
	/// of an image `width` wide.
	pub fn flip_horizontal(&mut self, width: u32) {
		self.rect.mirror(width);
		if let Some(ref mut c) = self.children {
			c.iter_mut().for_each(|n| n.flip_horizontal(width));
		}
	}

	/// Calls `f` on every leaf below (or at) this node, left to right.
	pub fn for_each_leaf<F: FnMut(&ImgTreeNode)>(&self, f: &mut F) {
		match self.children {
			Some(ref c) => c.iter().for_each(|n| n.for_each_leaf(f)),
			None => f(self),
		}
	}
}

/// Picks the dividing line of `rect` with the smallest combined squared
/// deviation of its two halves.
///
/// Rectangles at least as wide as they are tall are cut vertically, others
/// horizontally. Equal scores go to the split with the smaller difference in
/// half areas, then to the smaller coordinate.
pub fn best_split(stats: &RegionStats, rect: &Rect) -> Split {
	let vertical = rect.width() >= rect.height();
	let candidates = if vertical { rect.left..rect.right } else { rect.upper..rect.lower };
	let mut best: Option<(Split, f64, u64)> = None;
	for i in candidates {
		let split = if vertical { Split::Vertical(i) } else { Split::Horizontal(i) };
		let (a, b) = rect.split(split);
		let score = stats.sum_squared_deviation(&a) + stats.sum_squared_deviation(&b);
		let unevenness = if a.area() > b.area() { a.area() - b.area() } else { b.area() - a.area() };
		let better = match best {
			None => true,
			Some((_, best_score, best_unevenness)) =>
				score < best_score || (score == best_score && unevenness < best_unevenness),
		};
		if better {
			best = Some((split, score, unevenness));
		}
	}
	match best {
		Some((split, _, _)) => split,
		None => panic!("no split candidates in single-pixel rectangle {:?}", rect),
	}
}

/// Binary partition tree over an image.
///
/// Owns its nodes exclusively; cloning copies the whole tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImgTree {
	root: Option<ImgTreeNode>,
	width: u32,
	height: u32,
}

impl ImgTree {
	/// An empty tree.
	pub fn new() -> Self {
		Default::default()
	}

	pub fn root(&self) -> Option<&ImgTreeNode> {
		self.root.as_ref()
	}

	pub fn root_mut(&mut self) -> Option<&mut ImgTreeNode> {
		self.root.as_mut()
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Width of the source image.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height of the source image.
	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn count_leaves(&self) -> usize {
		self.root.as_ref().map_or(0, ImgTreeNode::count_leaves)
	}

	pub fn count_nodes(&self) -> usize {
		self.root.as_ref().map_or(0, ImgTreeNode::count_nodes)
	}

	pub fn depth(&self) -> usize {
		self.root.as_ref().map_or(0, ImgTreeNode::depth)
	}

	/// Mirrors the tree so that it renders flipped left to right.
	///
	/// Child order is untouched; only rectangles move.
	pub fn flip_horizontal(&mut self) {
		let width = self.width;
		if let Some(ref mut root) = self.root {
			root.flip_horizontal(width);
		}
	}

	/// Drops every node, leaving an empty tree.
	pub fn clear(&mut self) {
		self.root = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::raster::PixelGrid;

	const RED: Pixel = Pixel::opaque(255, 0, 0);
	const BLUE: Pixel = Pixel::opaque(0, 0, 255);

	fn row(colors: &[Pixel]) -> PixelGrid {
		PixelGrid::from_fn(colors.len() as u32, 1, |x, _| colors[x as usize])
	}

	fn column(colors: &[Pixel]) -> PixelGrid {
		PixelGrid::from_fn(1, colors.len() as u32, |_, y| colors[y as usize])
	}

	fn root_split(img: &PixelGrid) -> Split {
		let stats = RegionStats::new(img);
		best_split(&stats, &Rect::new(0, 0, img_height(img) - 1, img_width(img) - 1))
	}

	fn img_width(img: &PixelGrid) -> u32 {
		raster::Raster::width(img)
	}

	fn img_height(img: &PixelGrid) -> u32 {
		raster::Raster::height(img)
	}

	#[test]
	fn rect_split_partitions() {
		let r = Rect::new(2, 3, 5, 9);
		let (a, b) = r.split(Split::Vertical(4));
		assert_eq!(a, Rect::new(2, 3, 5, 4));
		assert_eq!(b, Rect::new(2, 5, 5, 9));
		assert_eq!(a.area() + b.area(), r.area());
		let (a, b) = r.split(Split::Horizontal(2));
		assert_eq!(a, Rect::new(2, 3, 2, 9));
		assert_eq!(b, Rect::new(3, 3, 5, 9));
	}

	#[test]
	fn two_by_two_splits_into_monochrome_columns() {
		let img = PixelGrid::from_fn(2, 2, |x, _| if x == 0 { RED } else { BLUE });
		let stats = RegionStats::new(&img);
		let full = Rect::new(0, 0, 1, 1);
		assert_eq!(best_split(&stats, &full), Split::Vertical(0));
		let (a, b) = full.split(Split::Vertical(0));
		assert_eq!(stats.sum_squared_deviation(&a), 0.);
		assert_eq!(stats.sum_squared_deviation(&b), 0.);

		let root = ImgTreeNode::build(&stats, full);
		assert_eq!(root.a().map(|n| n.rect), Some(a));
		assert_eq!(root.b().map(|n| n.rect), Some(b));
		assert_eq!(root.a().map(|n| n.avg), Some(RED));
		assert_eq!(root.b().map(|n| n.avg), Some(BLUE));
	}

	#[test]
	fn tall_rectangles_split_horizontally() {
		let img = PixelGrid::from_fn(1, 3, |_, y| if y == 2 { BLUE } else { RED });
		assert_eq!(root_split(&img), Split::Horizontal(1));
	}

	#[test]
	fn tie_prefers_most_even_split() {
		assert_eq!(root_split(&row(&[RED; 4])), Split::Vertical(1));
		assert_eq!(root_split(&row(&[RED; 6])), Split::Vertical(2));
	}

	#[test]
	fn column_ties_split_horizontally_and_evenly() {
		assert_eq!(root_split(&column(&[RED; 4])), Split::Horizontal(1));
		assert_eq!(root_split(&column(&[BLUE; 5])), Split::Horizontal(1));
		assert_eq!(root_split(&column(&[RED, BLUE, RED, BLUE])), Split::Horizontal(0));
	}

	#[test]
	fn even_tie_prefers_smaller_coordinate() {
		// Candidates 1 and 2 are equally central.
		assert_eq!(root_split(&row(&[BLUE; 5])), Split::Vertical(1));
		// Candidates 0 and 2 share the lowest score and are equally uneven.
		assert_eq!(root_split(&row(&[RED, BLUE, RED, BLUE])), Split::Vertical(0));
	}

	#[test]
	fn lowest_score_beats_evenness() {
		assert_eq!(root_split(&row(&[RED, BLUE, BLUE, BLUE])), Split::Vertical(0));
	}

	fn check_averages(stats: &RegionStats, node: &ImgTreeNode) {
		assert_eq!(node.avg, stats.average(&node.rect));
		for child in node.children.iter().flat_map(|c| c.iter()) {
			check_averages(stats, child);
		}
	}

	#[test]
	fn averages_come_from_pixels_not_children() {
		// The right half of the root averages (1 + 2 + 2) / 3 = 1 while its
		// children average to 1 and 2.
		let img = row(&[
			Pixel::opaque(0, 0, 0),
			Pixel::opaque(0, 0, 0),
			Pixel::opaque(1, 0, 0),
			Pixel::opaque(2, 0, 0),
			Pixel::opaque(2, 0, 0),
		]);
		let stats = RegionStats::new(&img);
		let root = ImgTreeNode::build(&stats, Rect::new(0, 0, 0, 4));
		assert_eq!(root.avg.r, 1);
		check_averages(&stats, &root);
	}

	#[test]
	fn build_reaches_every_pixel() {
		let img = PixelGrid::from_fn(3, 2, |x, y| Pixel::opaque(x as u8 * 40, y as u8 * 90, 5));
		let stats = RegionStats::new(&img);
		let root = ImgTreeNode::build(&stats, Rect::new(0, 0, 1, 2));
		assert_eq!(root.count_leaves(), 6);
		assert_eq!(root.count_nodes(), 11);
		let mut seen = Vec::new();
		root.for_each_leaf(&mut |n| {
			assert!(n.rect.is_pixel());
			assert_eq!(n.avg, raster::Raster::pixel(&img, n.rect.left, n.rect.upper));
			seen.push((n.rect.left, n.rect.upper));
		});
		seen.sort();
		assert_eq!(seen, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
	}

	#[test]
	fn flip_mirrors_every_node() {
		let img = PixelGrid::from_fn(3, 1, |x, _| Pixel::opaque(x as u8, 0, 0));
		let stats = RegionStats::new(&img);
		let mut root = ImgTreeNode::build(&stats, Rect::new(0, 0, 0, 2));
		let before = root.clone();
		root.flip_horizontal(3);
		assert_eq!(root.rect, Rect::new(0, 0, 0, 2));
		let a_before = before.a().map(|n| n.rect);
		let a_after = root.a().map(|n| n.rect);
		assert_eq!(a_before.map(|mut r| { r.mirror(3); r }), a_after);
		root.flip_horizontal(3);
		assert_eq!(root, before);
	}

	#[test]
	fn empty_tree_is_inert() {
		let mut tree = ImgTree::new();
		assert!(tree.is_empty());
		assert_eq!(tree.count_leaves(), 0);
		assert_eq!(tree.depth(), 0);
		tree.flip_horizontal();
		tree.clear();
		assert!(tree.is_empty());
	}
}
