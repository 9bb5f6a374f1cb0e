use super::raster::{Pixel, Raster};
use super::Rect;

/// A color channel with integer prefix tables.
///
/// Alpha is kept apart because it is accumulated as a float.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
	Red,
	Green,
	Blue,
}

impl Channel {
	pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

	fn index(self) -> usize {
		match self {
			Channel::Red => 0,
			Channel::Green => 1,
			Channel::Blue => 2,
		}
	}

	fn of(self, p: &Pixel) -> u8 {
		match self {
			Channel::Red => p.r,
			Channel::Green => p.g,
			Channel::Blue => p.b,
		}
	}
}

/// Row-major summed-area table; entry `(x, y)` holds the sum over every
/// position `(x', y')` with `x' <= x` and `y' <= y`.
#[derive(Clone, Debug)]
struct PrefixTable<T> {
	width: u32,
	height: u32,
	data: Vec<T>,
}

impl<T> PrefixTable<T>
where
	T: Copy + Default + std::ops::Add<Output = T> + std::ops::Sub<Output = T>,
{
	fn new(width: u32, height: u32) -> Self {
		PrefixTable { width, height, data: vec![T::default(); width as usize * height as usize] }
	}

	fn at(&self, x: u32, y: u32) -> T {
		self.data[y as usize * self.width as usize + x as usize]
	}

	/// Fills `(x, y)` from its already-filled upper and left neighbours.
	///
	/// Must be called in row-major order.
	fn accumulate(&mut self, x: u32, y: u32, value: T) {
		let left = if x > 0 { self.at(x - 1, y) } else { T::default() };
		let up = if y > 0 { self.at(x, y - 1) } else { T::default() };
		let diag = if x > 0 && y > 0 { self.at(x - 1, y - 1) } else { T::default() };
		// Added before subtracting so unsigned tables never underflow.
		self.data[y as usize * self.width as usize + x as usize] = left + up + value - diag;
	}

	/// Inclusion-exclusion over the four corners of `rect`.
	fn range(&self, rect: &Rect) -> T {
		assert!(rect.upper <= rect.lower && rect.left <= rect.right,
			"inverted rectangle {:?}", rect);
		assert!(rect.right < self.width && rect.lower < self.height,
			"rectangle {:?} outside {}x{} table", rect, self.width, self.height);
		let whole = self.at(rect.right, rect.lower);
		match (rect.upper, rect.left) {
			(0, 0) => whole,
			(0, l) => whole - self.at(l - 1, rect.lower),
			(u, 0) => whole - self.at(rect.right, u - 1),
			(u, l) => whole + self.at(l - 1, u - 1) - self.at(rect.right, u - 1) - self.at(l - 1, rect.lower),
		}
	}
}

/// Precomputed per-channel sums over an image, giving constant-time
/// statistics for any axis-aligned rectangle.
///
/// Alpha is premultiplied by 255 before accumulation so that it is scored on
/// the same scale as the color channels.
#[derive(Clone, Debug)]
pub struct RegionStats {
	sum: [PrefixTable<u64>; 3],
	sum_sq: [PrefixTable<u64>; 3],
	sum_a: PrefixTable<f64>,
	sum_sq_a: PrefixTable<f64>,
}

impl RegionStats {
	/// Builds every prefix table in a single pass over `img`.
	pub fn new<R: Raster + ?Sized>(img: &R) -> Self {
		let (w, h) = (img.width(), img.height());
		let mut stats = RegionStats {
			sum: [PrefixTable::new(w, h), PrefixTable::new(w, h), PrefixTable::new(w, h)],
			sum_sq: [PrefixTable::new(w, h), PrefixTable::new(w, h), PrefixTable::new(w, h)],
			sum_a: PrefixTable::new(w, h),
			sum_sq_a: PrefixTable::new(w, h),
		};
		for y in 0..h {
			for x in 0..w {
				let p = img.pixel(x, y);
				for c in Channel::ALL.iter() {
					let v = c.of(&p) as u64;
					stats.sum[c.index()].accumulate(x, y, v);
					stats.sum_sq[c.index()].accumulate(x, y, v * v);
				}
				let a = p.a * 255.;
				stats.sum_a.accumulate(x, y, a);
				stats.sum_sq_a.accumulate(x, y, a * a);
			}
		}
		stats
	}

	/// Sum of `channel` over `rect`.
	///
	/// Panics if `rect` is inverted or extends past the image.
	pub fn range_sum(&self, channel: Channel, rect: &Rect) -> u64 {
		self.sum[channel.index()].range(rect)
	}

	/// Sum of the squares of `channel` over `rect`.
	pub fn range_sum_sq(&self, channel: Channel, rect: &Rect) -> u64 {
		self.sum_sq[channel.index()].range(rect)
	}

	/// Sum of premultiplied (`a * 255`) alpha over `rect`.
	pub fn alpha_sum(&self, rect: &Rect) -> f64 {
		self.sum_a.range(rect)
	}

	pub fn alpha_sum_sq(&self, rect: &Rect) -> f64 {
		self.sum_sq_a.range(rect)
	}

	pub fn area(&self, rect: &Rect) -> u64 {
		rect.area()
	}

	/// Average color over `rect`, with color channels truncated.
	pub fn average(&self, rect: &Rect) -> Pixel {
		let n = self.area(rect);
		let avg = |c| (self.range_sum(c, rect) / n) as u8;
		Pixel::new(
			avg(Channel::Red),
			avg(Channel::Green),
			avg(Channel::Blue),
			self.alpha_sum(rect) / n as f64 / 255.,
		)
	}

	/// Total squared deviation from the mean over all four channels.
	///
	/// Worked out from the raw sums rather than `average`, which truncates.
	pub fn sum_squared_deviation(&self, rect: &Rect) -> f64 {
		let n = self.area(rect);
		let color: f64 = Channel::ALL.iter()
			.map(|&c| {
				let s = self.range_sum(c, rect) as u128;
				let sq = self.range_sum_sq(c, rect) as u128;
				// n * sq >= s * s by Cauchy-Schwarz, and is exact in u128.
				(n as u128 * sq - s * s) as f64 / n as f64
			})
			.sum();
		let s_a = self.alpha_sum(rect);
		let alpha = self.alpha_sum_sq(rect) - s_a * s_a / n as f64;
		color + alpha.max(0.)
	}
}
