//! Benchmark suite for the crumb codecs.
//!
//! Measures encode throughput of every registered codec and decode
//! throughput of the RLE codec over synthesized planes.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pixcrumb_benches::{dense_plane, sparse_plane};
use pixcrumb_types::codec::{PixCrumbDecoder, PixCrumbEncoder, PixCrumbRle, all_encoders};

const PLANE_WIDTH: usize = 128;
const PLANE_HEIGHT: usize = 128;

/// Benchmark every registered encoder over a sparse and a dense plane.
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode");
	let planes = [
		("sparse", sparse_plane(PLANE_WIDTH, PLANE_HEIGHT)),
		("dense", dense_plane(PLANE_WIDTH, PLANE_HEIGHT)),
	];

	for (kind, plane) in &planes {
		let crumbs = (PLANE_WIDTH * PLANE_HEIGHT) as u64;
		group.throughput(Throughput::Elements(crumbs));
		for encoder in all_encoders() {
			let name = encoder.abbrev_name();
			group.bench_with_input(BenchmarkId::new(name, kind), plane, |b, plane| {
				b.iter(|| {
					// Encoders accumulate statistics, so build a fresh one
					// per iteration.
					let mut encoder = pixcrumb_types::codec::encoder_by_name(name)
						.expect("registered codec");
					let blob = encoder.compress(black_box(plane)).expect("plane fits limits");
					black_box(blob.total_size())
				});
			});
		}
	}

	group.finish();
}

/// Benchmark RLE decode over a pre-compressed sparse plane.
fn bench_rle_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode");
	let plane = sparse_plane(PLANE_WIDTH, PLANE_HEIGHT);
	let mut rle = PixCrumbRle::new();
	let blob = rle.compress(&plane).expect("plane fits limits");

	group.throughput(Throughput::Elements((PLANE_WIDTH * PLANE_HEIGHT) as u64));
	group.bench_function("sparse", |b| {
		b.iter(|| {
			let mut decoder =
				PixCrumbRle::decoder_for(black_box(blob.as_ref())).expect("rle blob");
			black_box(decoder.decompress().expect("blob is well formed"))
		});
	});

	group.finish();
}

criterion_group!(benches, bench_encode, bench_rle_decode);
criterion_main!(benches);
