//! ELANIC codec utility.
//!
//! Provides three subcommands:
//! - `encode`: load a RasterAnimation `.json` asset and its numbered frame
//!   PNGs, encode the strip to an ELANIC side-car `.json`.
//! - `decode`: decode an ELANIC side-car back into numbered frame PNGs.
//! - `info`: print compression statistics for an ELANIC side-car.

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use walkdir::WalkDir;
use zerog_rs::prelude::*;
use zerog_rs::zerog_types::elanic;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();
	match cli.command {
		Command::Encode(opts) => run_encode(opts),
		Command::Decode(opts) => run_decode(opts),
		Command::Info(opts) => run_info(opts),
	}
}

#[derive(Parser)]
#[command(name = "elanic_utils")]
#[command(author = "zerog-rs project")]
#[command(version)]
#[command(about = "Encode, decode, and inspect ELANIC side-car data", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Encode an animation's frame PNGs into an ELANIC side-car
	Encode(EncodeArgs),
	/// Decode an ELANIC side-car back into frame PNGs
	Decode(DecodeArgs),
	/// Print statistics for an ELANIC side-car
	Info(InfoArgs),
}

#[derive(Args)]
struct EncodeArgs {
	/// Path to the RasterAnimation .json asset
	#[arg(value_name = "ANIMATION")]
	animation: PathBuf,

	/// Directory containing the frame PNGs, in sorted filename order
	#[arg(short = 'd', long, value_name = "DIR")]
	frames: PathBuf,

	/// Output path; defaults to the conventional side-car name next to the
	/// animation asset
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
	/// Path to the ELANIC side-car .json
	#[arg(value_name = "ELANIC")]
	elanic: PathBuf,

	/// Directory the frame PNGs are written to
	#[arg(short, long, value_name = "DIR", default_value = "bin/elanic_decode")]
	output: PathBuf,

	/// File name prefix for the written frames
	#[arg(short, long, value_name = "PREFIX", default_value = "Frame_")]
	prefix: String,
}

#[derive(Args)]
struct InfoArgs {
	/// Path to the ELANIC side-car .json
	#[arg(value_name = "ELANIC")]
	elanic: PathBuf,
}

fn run_encode(args: EncodeArgs) -> Result<()> {
	let json = fs::read_to_string(&args.animation)
		.with_context(|| format!("Failed to read {}", args.animation.display()))?;
	let mut anim: RasterAnimation =
		serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", args.animation.display()))?;
	anim.validate();

	let textures = load_frame_strip(&args.frames, anim.width, anim.height)?;
	if textures.is_empty() {
		bail!("No .png frames found under {}", args.frames.display());
	}
	log::info!("Loaded {} frames from {}", textures.len(), args.frames.display());
	let raw_bytes = textures.len() * (anim.width * anim.height * 4) as usize;
	anim.set_textures(textures);

	let data = elanic::encode(&anim).context("Encoding failed")?;

	let output = args.output.unwrap_or_else(|| {
		let mut path = args.animation.with_file_name(anim.elanic_data_name());
		path.set_extension("json");
		path
	});
	fs::write(&output, serde_json::to_string_pretty(&data)?)
		.with_context(|| format!("Failed to write {}", output.display()))?;

	let encoded_pixels = data.raw_pixel_count() + data.diff_entry_count();
	println!("{data}");
	println!(
		"Encoded {} frames: {} raw pixels -> {} imprints + {} diff entries (~{:.1}% of raw)",
		data.frame_count(),
		raw_bytes / 4,
		data.imprints.len(),
		data.diff_entry_count(),
		encoded_pixels as f64 * 400.0 / raw_bytes as f64
	);
	log::info!("Wrote {}", output.display());

	Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<()> {
	let data = read_elanic(&args.elanic)?;
	let frames = elanic::decode_frames(&data).context("Decoding failed")?;

	fs::create_dir_all(&args.output)
		.with_context(|| format!("Failed to create {}", args.output.display()))?;

	for (i, frame) in frames.iter().enumerate() {
		let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba_bytes())
			.context("Frame buffer size mismatch")?;
		let path = args.output.join(format!("{}{:03}.png", args.prefix, i + 1));
		image.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
	}

	log::info!("Wrote {} frames to {}", frames.len(), args.output.display());
	Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
	let data = read_elanic(&args.elanic)?;

	println!("{data}");
	println!("Palette: {} colors", data.colors.len());
	for (i, frame) in data.frames.iter().enumerate() {
		if frame.has_diff_data() {
			println!("  Frame {:3}: imprint {} + {} diff entries", i, frame.imprint_index, frame.diff_pixel_count());
		} else {
			println!("  Frame {i:3}: imprint {}", frame.imprint_index);
		}
	}

	Ok(())
}

fn read_elanic(path: &Path) -> Result<ElanicData> {
	let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_frame_strip(root: &Path, width: u32, height: u32) -> Result<Vec<FrameImage>> {
	if !root.is_dir() {
		bail!("{} is not a directory", root.display());
	}

	let mut paths: Vec<PathBuf> = WalkDir::new(root)
		.max_depth(1)
		.into_iter()
		.filter_map(Result::ok)
		.filter(|entry| {
			entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "png")
		})
		.map(|entry| entry.into_path())
		.collect();
	paths.sort();

	let mut frames = Vec::with_capacity(paths.len());
	for path in paths {
		let image = image::open(&path)
			.with_context(|| format!("Failed to read {}", path.display()))?
			.to_rgba8();
		if (image.width(), image.height()) != (width, height) {
			bail!(
				"{} is {}x{}, animation expects {}x{}",
				path.display(),
				image.width(),
				image.height(),
				width,
				height
			);
		}
		frames.push(FrameImage::from_rgba_bytes(width, height, image.as_raw()));
	}

	Ok(frames)
}
