use image::error::ImageError;
use log::info;

use std::path::Path;

use bintree_img::ImgTree;
use bintree_img::error::{AnalyzeError, DrawError};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `INPUT` with its extension replaced by `.bt.png`.
fn default_output(input: &str) -> String {
	Path::new(input).with_extension("bt.png").to_string_lossy().into_owned()
}

/// Options gathered from the command line.
#[derive(Debug)]
struct Settings {
	input: String,
	output: String,
	scale: u32,
	/// Percentage and tolerance; no pruning if absent.
	prune: Option<(f64, f64)>,
	flip: bool,
}

impl Settings {
	fn from_matches(m: &clap::ArgMatches) -> Self {
		// `INPUT` is required, so clap has already rejected its absence.
		let input = m.value_of("INPUT").unwrap_or_default().to_string();
		let output = m.value_of("OUTPUT")
			.map(str::to_string)
			.unwrap_or_else(|| default_output(&input));
		let scale = match m.value_of("scale").unwrap_or("1").parse::<u32>() {
			Ok(0) => error_exit("Scale must be at least 1", 2),
			Ok(n) => n,
			Err(_) => error_exit("Non-numeric value for scale", 2)
		};
		let tolerance = match m.value_of("tolerance").unwrap_or("0.05").parse::<f64>() {
			Ok(n) if n.is_finite() && n >= 0. => n,
			_ => error_exit("Tolerance must be a non-negative number", 2)
		};
		let prune = match m.value_of("prune").map(str::parse::<f64>) {
			None => None,
			Some(Ok(n)) if (0. ..=100.).contains(&n) => Some((n, tolerance)),
			Some(_) => error_exit("Prune percentage must be a number from 0 to 100", 2)
		};
		Settings { input, output, scale, prune, flip: m.is_present("flip") }
	}
}

/// `clap`-based CLI for compressing images with a binary partition tree.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let clap_matches = clap::App::new("bintree_img")
		.version("0.1.0")
		.author("vkcz")
		.about("Lossily compresses an image by splitting it into a binary tree of near-uniform rectangles.")
		.arg_from_usage("-s, --scale=[N] 'Output scale factor; defaults to 1'")
		.arg_from_usage("-p, --prune=[PCT] 'Collapse subtrees where at least PCT percent of leaves are within tolerance; no pruning if absent'")
		.arg_from_usage("-t, --tolerance=[TOL] 'Color distance within which a leaf counts as uniform (--prune only); defaults to 0.05'")
		.arg_from_usage("-f, --flip 'Mirror the image horizontally'")
		.arg_from_usage("<INPUT> 'Path to input image'")
		.arg_from_usage("[OUTPUT] 'Path to output PNG; defaults to INPUT with a .bt.png extension'")
		.get_matches();
	let settings = Settings::from_matches(&clap_matches);

	let source = match image::open(&settings.input) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) | ImageError::Unsupported(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgba8();

	let mut tree = match ImgTree::from_raster(&source) {
		Ok(t) => t,
		Err(AnalyzeError::ZeroDimension(..)) => error_exit("Input image has no pixels", 4)
	};
	info!("{}x{} image split into {} leaves", tree.width(), tree.height(), tree.count_leaves());

	if settings.flip {
		tree.flip_horizontal();
	}
	if let Some((pct, tol)) = settings.prune {
		// Both arguments were validated while parsing.
		if let Err(e) = tree.prune(pct, tol) {
			error_exit(&e.to_string(), 2)
		}
		info!("{} leaves remain after pruning", tree.count_leaves());
	}

	let output: image::RgbaImage = match tree.render_as(settings.scale) {
		Ok(o) => o,
		Err(DrawError::ZeroScale) => error_exit("Scale must be at least 1", 2),
		Err(DrawError::TooLarge { .. }) => error_exit("Computation limits exceeded", 5),
		Err(e) => error_exit(&e.to_string(), 10)
	};
	match output.save(&settings.output) {
		Ok(_) => info!("wrote {}", settings.output),
		Err(_) => error_exit("Could not save output", 3)
	}
}
