/// A single RGBA pixel.
///
/// Color channels are stored as bytes; alpha is stored on a `[0, 1]` scale
/// so that averaged regions keep their fractional opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Pixel {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Pixel { r, g, b, a }
	}

	/// Fully opaque pixel.
	pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
		Pixel { r, g, b, a: 1. }
	}

	/// Euclidean distance between two pixels.
	///
	/// The color channels contribute on their 0..=255 scale and alpha on its
	/// `[0, 1]` scale, so opacity differences weigh far less than color ones.
	pub fn dist(&self, other: &Pixel) -> f64 {
		let dr = self.r as f64 - other.r as f64;
		let dg = self.g as f64 - other.g as f64;
		let db = self.b as f64 - other.b as f64;
		let da = self.a - other.a;
		(dr * dr + dg * dg + db * db + da * da).sqrt()
	}
}

impl Default for Pixel {
	/// Opaque white, the fill color of a blank raster.
	fn default() -> Self {
		Pixel::opaque(255, 255, 255)
	}
}

impl From<image::Rgba<u8>> for Pixel {
	fn from(c: image::Rgba<u8>) -> Self {
		Pixel::new(c.0[0], c.0[1], c.0[2], c.0[3] as f64 / 255.)
	}
}

impl From<Pixel> for image::Rgba<u8> {
	fn from(p: Pixel) -> Self {
		image::Rgba([p.r, p.g, p.b, (p.a * 255.).round().max(0.).min(255.) as u8])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dist_is_symmetric_and_zero_on_self() {
		let a = Pixel::new(10, 20, 30, 0.5);
		let b = Pixel::new(13, 24, 30, 0.5);
		assert_eq!(a.dist(&a), 0.);
		assert_eq!(a.dist(&b), 5.);
		assert_eq!(b.dist(&a), 5.);
	}

	#[test]
	fn alpha_counts_on_unit_scale() {
		let a = Pixel::new(0, 0, 0, 0.);
		let b = Pixel::new(0, 0, 0, 1.);
		assert_eq!(a.dist(&b), 1.);
	}

	#[test]
	fn rgba_conversion_keeps_bytes() {
		let c = image::Rgba([1u8, 2, 3, 255]);
		let p: Pixel = c.into();
		assert_eq!(p, Pixel::opaque(1, 2, 3));
		assert_eq!(image::Rgba::<u8>::from(p), c);
		let half: image::Rgba<u8> = Pixel::new(0, 0, 0, 0.5).into();
		assert_eq!(half.0[3], 128);
	}
}
