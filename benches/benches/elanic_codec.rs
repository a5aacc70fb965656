//! Benchmark suite for the ELANIC codec and the frame-spec compiler.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use zerog_benches::{generate_animation, sizes};
use zerog_types::anim::compile_frame_spec;
use zerog_types::elanic;

/// Benchmark encoding synthetic animation strips of increasing size.
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("elanic_encode");

	for (name, (width, height, frames)) in
		[("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let anim = generate_animation(width, height, frames, width / 8);
		let pixels = u64::from(width) * u64::from(height) * u64::from(frames);
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("encode", name), &anim, |b, anim| {
			b.iter(|| {
				let data = elanic::encode(black_box(anim));
				black_box(data)
			});
		});
	}

	group.finish();
}

/// Benchmark decoding full strips and single frames.
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("elanic_decode");

	for (name, (width, height, frames)) in
		[("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let anim = generate_animation(width, height, frames, width / 8);
		let data = elanic::encode(&anim).expect("bench data encodes");
		let pixels = u64::from(width) * u64::from(height) * u64::from(frames);

		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("decode_all", name), &data, |b, data| {
			b.iter(|| {
				let frames = elanic::decode_frames(black_box(data));
				black_box(frames)
			});
		});

		// The last frame has the most diff entries to replay.
		let last = data.frame_count() - 1;
		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
		group.bench_with_input(BenchmarkId::new("decode_one", name), &data, |b, data| {
			b.iter(|| {
				let frame = elanic::decode_frame(black_box(data), last);
				black_box(frame)
			});
		});
	}

	group.finish();
}

/// Benchmark the frame-spec compiler on specs of increasing complexity.
fn bench_frame_spec(c: &mut Criterion) {
	let mut group = c.benchmark_group("frame_spec");

	let specs = [
		("plain_list", "1,2,3,4,5,6,7,8".to_owned()),
		("long_range", "1-240".to_owned()),
		("nested_groups", "((1-4)x3,(9,11)x2)x4,240-1".to_owned()),
		("wide_list", (1..=120).map(|n| n.to_string()).collect::<Vec<_>>().join(",")),
	];

	for (name, spec) in specs {
		group.bench_with_input(BenchmarkId::new("compile", name), &spec, |b, spec| {
			b.iter(|| {
				let compiled = compile_frame_spec(black_box(spec));
				black_box(compiled)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_frame_spec);

criterion_main!(benches);
