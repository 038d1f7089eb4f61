//! Compression driver for the PixCrumb codec family.
//!
//! Takes one or more paletted PNG images, runs every registered codec (or a
//! single one selected with `--codec`) over each delta-filtered bitplane,
//! and reports the compressed sizes against the raw bitplane sizes.
//!
//! # Usage
//!
//! ```bash
//! # Compare all codecs over an image
//! pixcrumb-rs assets/title.png
//!
//! # Run a single codec, machine-readable output
//! pixcrumb-rs --codec pcrle --json assets/title.png
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use pixcrumb_rs::loader::load_indexed_image;
use pixcrumb_rs::prelude::*;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pixcrumb-rs")]
#[command(version)]
#[command(about = "Compress paletted images with the PixCrumb codec family", long_about = None)]
struct Cli {
	/// Input image files (paletted PNG)
	#[arg(value_name = "IMAGE", required = true)]
	images: Vec<PathBuf>,

	/// Only run the codec with this full or abbreviated name
	#[arg(short, long)]
	codec: Option<String>,

	/// Emit a JSON report instead of text
	#[arg(long)]
	json: bool,
}

#[derive(Debug, Serialize)]
struct PlaneReport {
	plane: usize,
	raw_size: u64,
	compressed_size: u64,
	ratio: f64,
}

#[derive(Debug, Serialize)]
struct CodecReport {
	codec: String,
	planes: Vec<PlaneReport>,
	total_raw: u64,
	total_compressed: u64,
	ratio: f64,
}

#[derive(Debug, Serialize)]
struct ImageReport {
	image: String,
	codecs: Vec<CodecReport>,
}

fn encoders_for(selection: Option<&str>) -> Result<Vec<Box<dyn PixCrumbEncoder>>> {
	match selection {
		None => Ok(all_encoders()),
		Some(name) => encoder_by_name(name)
			.map(|enc| vec![enc])
			.with_context(|| format!("unknown codec '{name}'")),
	}
}

fn process_image(path: &Path, selection: Option<&str>) -> Result<ImageReport> {
	let image = load_indexed_image(path)?;
	let mut planar = PlanarImage::new(&image)?;
	for plane in planar.bitplanes_mut() {
		plane.delta_encode();
	}
	let raw_sizes: Vec<u64> = planar.bitplanes().iter().map(Bitplane::total_size).collect();
	let crumbs = CrumbImage::from_planar(&planar);

	let mut codecs = Vec::new();
	for mut encoder in encoders_for(selection)? {
		let mut planes = Vec::new();
		let mut total_raw = 0u64;
		let mut total_compressed = 0u64;
		for (i, plane) in crumbs.planes().iter().enumerate() {
			let blob = encoder
				.compress(plane)
				.with_context(|| format!("error while encoding BP{i}"))?;
			let raw_size = raw_sizes[i];
			let compressed_size = blob.total_size();
			total_raw += raw_size;
			total_compressed += compressed_size;
			planes.push(PlaneReport {
				plane: i,
				raw_size,
				compressed_size,
				ratio: compressed_size as f64 / raw_size as f64,
			});
		}
		codecs.push(CodecReport {
			codec: encoder.name().to_string(),
			planes,
			total_raw,
			total_compressed,
			ratio: total_compressed as f64 / total_raw as f64,
		});
	}

	Ok(ImageReport {
		image: path.display().to_string(),
		codecs,
	})
}

fn print_report(report: &ImageReport) {
	println!("#======================================================================#");
	println!("| Test: {:<63}|", report.image);
	println!("#======================================================================#");
	for codec in &report.codecs {
		println!("\nUsing method {}:", codec.codec);
		for plane in &codec.planes {
			println!(
				"BP{} raw size: {} bytes, compressed to {} bytes (ratio: {:.3})",
				plane.plane, plane.raw_size, plane.compressed_size, plane.ratio
			);
		}
		println!(
			"Total: raw size {} bytes, compressed to {} bytes (ratio: {:.3})",
			codec.total_raw, codec.total_compressed, codec.ratio
		);
	}
	println!();
}

fn main() -> ExitCode {
	env_logger::init();
	let cli = Cli::parse();

	let mut reports = Vec::new();
	let mut failed = false;
	for path in &cli.images {
		match process_image(path, cli.codec.as_deref()) {
			Ok(report) => reports.push(report),
			Err(e) => {
				error!("{}: {e:#}", path.display());
				failed = true;
			}
		}
	}

	if cli.json {
		match serde_json::to_string_pretty(&reports) {
			Ok(json) => println!("{json}"),
			Err(e) => {
				error!("could not serialise report: {e}");
				failed = true;
			}
		}
	} else {
		for report in &reports {
			print_report(report);
		}
	}

	if failed {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
