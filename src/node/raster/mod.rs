pub mod pixel;

pub use pixel::Pixel;

/// Trait for types that expose a rectangular grid of pixels.
///
/// `x` is the column and `y` the row, both starting at 0.
pub trait Raster {
	fn width(&self) -> u32;
	fn height(&self) -> u32;
	/// Reads the pixel at `(x, y)`.
	///
	/// Implementations may panic if the coordinates are out of bounds.
	fn pixel(&self, x: u32, y: u32) -> Pixel;
}

/// A `Raster` that can be allocated and painted.
pub trait RasterMut: Raster {
	/// Allocates a `width` by `height` raster filled with `Pixel::default()`.
	fn blank(width: u32, height: u32) -> Self where Self: Sized;
	fn set_pixel(&mut self, x: u32, y: u32, p: Pixel);
}

/// An owned, row-major grid of `Pixel`s.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
	width: u32,
	height: u32,
	pixels: Vec<Pixel>,
}

impl PixelGrid {
	pub fn new(width: u32, height: u32) -> Self {
		Self::from_pixel(width, height, Pixel::default())
	}

	pub fn from_pixel(width: u32, height: u32, p: Pixel) -> Self {
		PixelGrid { width, height, pixels: vec![p; width as usize * height as usize] }
	}

	/// Builds a grid by calling `f(x, y)` for every position.
	pub fn from_fn<F: FnMut(u32, u32) -> Pixel>(width: u32, height: u32, mut f: F) -> Self {
		let mut pixels = Vec::with_capacity(width as usize * height as usize);
		for y in 0..height {
			for x in 0..width {
				pixels.push(f(x, y));
			}
		}
		PixelGrid { width, height, pixels }
	}

	/// Reallocates the grid to the given size; all pixels become blank.
	pub fn resize(&mut self, width: u32, height: u32) {
		*self = Self::new(width, height);
	}

	fn index(&self, x: u32, y: u32) -> usize {
		assert!(x < self.width && y < self.height,
			"pixel ({}, {}) outside {}x{} grid", x, y, self.width, self.height);
		y as usize * self.width as usize + x as usize
	}

	pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
		let i = self.index(x, y);
		&mut self.pixels[i]
	}

	pub fn pixels(&self) -> &[Pixel] {
		&self.pixels
	}

	pub fn to_rgba_image(&self) -> image::RgbaImage {
		image::RgbaImage::from_fn(self.width, self.height, |x, y| self.pixel(x, y).into())
	}
}

impl Raster for PixelGrid {
	fn width(&self) -> u32 { self.width }
	fn height(&self) -> u32 { self.height }
	fn pixel(&self, x: u32, y: u32) -> Pixel {
		self.pixels[self.index(x, y)]
	}
}

impl RasterMut for PixelGrid {
	fn blank(width: u32, height: u32) -> Self {
		Self::new(width, height)
	}
	fn set_pixel(&mut self, x: u32, y: u32, p: Pixel) {
		*self.pixel_mut(x, y) = p;
	}
}

impl From<&image::RgbaImage> for PixelGrid {
	fn from(img: &image::RgbaImage) -> Self {
		PixelGrid::from_fn(img.width(), img.height(), |x, y| (*img.get_pixel(x, y)).into())
	}
}

impl Raster for image::RgbaImage {
	fn width(&self) -> u32 { image::ImageBuffer::width(self) }
	fn height(&self) -> u32 { image::ImageBuffer::height(self) }
	fn pixel(&self, x: u32, y: u32) -> Pixel {
		(*self.get_pixel(x, y)).into()
	}
}

impl RasterMut for image::RgbaImage {
	fn blank(width: u32, height: u32) -> Self {
		image::RgbaImage::from_pixel(width, height, Pixel::default().into())
	}
	fn set_pixel(&mut self, x: u32, y: u32, p: Pixel) {
		self.put_pixel(x, y, p.into());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid_is_row_major() {
		let grid = PixelGrid::from_fn(3, 2, |x, y| Pixel::opaque(x as u8, y as u8, 0));
		assert_eq!(grid.pixels()[4], Pixel::opaque(1, 1, 0));
		assert_eq!(grid.pixel(2, 1), Pixel::opaque(2, 1, 0));
	}

	#[test]
	fn resize_blanks_the_grid() {
		let mut grid = PixelGrid::from_pixel(2, 2, Pixel::opaque(0, 0, 0));
		grid.resize(3, 1);
		assert_eq!(grid.width(), 3);
		assert_eq!(grid.height(), 1);
		assert!(grid.pixels().iter().all(|p| *p == Pixel::default()));
	}

	#[test]
	#[should_panic]
	fn out_of_bounds_read_panics() {
		PixelGrid::new(2, 2).pixel(2, 0);
	}

	#[test]
	fn rgba_image_round_trips_through_grid() {
		let img = image::RgbaImage::from_fn(4, 3, |x, y| image::Rgba([x as u8 * 60, y as u8 * 80, 7, 255]));
		let grid = PixelGrid::from(&img);
		assert_eq!(Raster::width(&grid), 4);
		assert_eq!(grid.pixel(3, 2), Raster::pixel(&img, 3, 2));
		assert_eq!(grid.to_rgba_image(), img);
	}
}
