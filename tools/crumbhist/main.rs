//! Crumb Histogram Utility
//!
//! Dumps the crumb value distribution of an image's delta-filtered
//! bitplanes, plus the first-order prediction table (how often each crumb
//! value follows each other value in serpentine order). The output feeds
//! the derivation of the fixed prefix dictionaries.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example crumbhist -- assets/title.png
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pixcrumb_rs::coding::CrumbReader;
use pixcrumb_rs::loader::load_indexed_image;
use pixcrumb_rs::prelude::*;

#[derive(Parser)]
#[command(name = "crumbhist")]
#[command(about = "Dump crumb frequency and prediction histograms", long_about = None)]
struct Cli {
	/// Input image file (paletted PNG)
	#[arg(value_name = "IMAGE")]
	image: PathBuf,
}

fn print_csv_row(values: &[u64]) {
	let row: Vec<String> = values.iter().map(u64::to_string).collect();
	println!("{}", row.join(","));
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let image = load_indexed_image(&cli.image)?;
	let mut planar = PlanarImage::new(&image)?;
	for plane in planar.bitplanes_mut() {
		plane.delta_encode();
	}
	let crumb_image = CrumbImage::from_planar(&planar);

	let mut crumb_bins = [0u64; 16];
	let mut predict_bins = [[0u64; 16]; 16];

	for plane in crumb_image.planes() {
		for row in plane.crumbs() {
			for &crumb in row {
				crumb_bins[crumb as usize] += 1;
			}
		}

		let mut reader = CrumbReader::new(plane.crumbs())?;
		let Ok(mut last) = reader.read_crumb() else {
			continue;
		};
		while !reader.is_at_end() {
			let crumb = reader.read_crumb()?;
			predict_bins[last as usize][crumb as usize] += 1;
			last = crumb;
		}
	}

	println!("\n\nFrequency data:");
	print_csv_row(&crumb_bins);

	println!("\nPrediction data:");
	for (value, row) in predict_bins.iter().enumerate() {
		print!("{},", crumb_bins[value]);
		print_csv_row(row);
	}

	Ok(())
}
