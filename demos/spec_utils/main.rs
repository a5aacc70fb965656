//! Frame-spec compiler utility.
//!
//! Provides two subcommands:
//! - `compile`: compile one frame-spec string and print the resulting frame
//!   list plus any issues found.
//! - `validate`: scan a directory for RasterAnimation `.json` assets and
//!   report frame-spec issues in every sequence.

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use walkdir::WalkDir;
use zerog_rs::prelude::*;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();
	match cli.command {
		Command::Compile(opts) => run_compile(opts),
		Command::Validate(opts) => run_validate(opts),
	}
}

#[derive(Parser)]
#[command(name = "spec_utils")]
#[command(author = "zerog-rs project")]
#[command(version)]
#[command(about = "Compile and validate frame-spec strings", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Compile a single frame-spec string
	Compile(CompileArgs),
	/// Validate every RasterAnimation .json file under a directory
	Validate(ValidateArgs),
}

#[derive(Args)]
struct CompileArgs {
	/// The frame-spec string, e.g. "1-3x2,(7,9)x3"
	#[arg(value_name = "SPEC")]
	spec: String,

	/// Print the frame list one number per line
	#[arg(short, long, default_value_t = false)]
	lines: bool,
}

#[derive(Args)]
struct ValidateArgs {
	/// Directory containing RasterAnimation .json assets
	#[arg(short = 'd', long, value_name = "DIR", default_value = "assets/animations")]
	root: PathBuf,

	/// Recurse into sub-directories while scanning
	#[arg(short, long, default_value_t = false)]
	recursive: bool,

	/// Print per-sequence results even when clean
	#[arg(short, long, default_value_t = false)]
	verbose: bool,

	/// Exit with an error when any issue is found
	#[arg(long, default_value_t = false)]
	fail_on_issue: bool,
}

fn run_compile(args: CompileArgs) -> Result<()> {
	let compiled = compile_frame_spec(&args.spec);

	if args.lines {
		for frame in compiled.frames() {
			println!("{frame}");
		}
	} else {
		println!("{compiled}");
	}

	for issue in compiled.issues() {
		log::warn!("{issue}");
	}
	if !compiled.is_clean() {
		bail!("Spec compiled with {} issue(s)", compiled.issues().len());
	}

	Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
	if !args.root.is_dir() {
		bail!("{} is not a directory", args.root.display());
	}

	let files = collect_json_files(&args.root, args.recursive);
	if files.is_empty() {
		println!("No .json files found under {}", args.root.display());
		return Ok(());
	}

	let mut totals = ScanTotals::default();
	for path in files {
		match validate_file(&path) {
			Ok(report) => {
				totals.update(&report);
				print_file_report(&report, &path, args.verbose);
			}
			Err(err) => {
				totals.failures += 1;
				log::error!("{} - {err:#}", path.display());
			}
		}
	}

	println!(
		"\nSummary: files={} | sequences={} | issues={} | unreadable={}",
		totals.files, totals.sequences, totals.issues, totals.failures
	);

	if totals.failures > 0 {
		bail!("Validation finished with unreadable files (see summary)");
	}
	if args.fail_on_issue && totals.issues > 0 {
		bail!("Validation finished with frame-spec issues (see summary)");
	}

	Ok(())
}

fn collect_json_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
	let max_depth = if recursive {
		usize::MAX
	} else {
		1
	};
	let mut files = Vec::new();

	for entry in WalkDir::new(root).max_depth(max_depth).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				log::warn!("{err}");
				continue;
			}
		};
		if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json") {
			files.push(entry.into_path());
		}
	}

	files.sort();
	files
}

struct SequenceReport {
	name: String,
	spec: String,
	frame_count: usize,
	issues: Vec<String>,
}

struct FileReport {
	animation_name: String,
	sequences: Vec<SequenceReport>,
}

impl FileReport {
	fn issue_count(&self) -> usize {
		self.sequences.iter().map(|seq| seq.issues.len()).sum()
	}
}

fn validate_file(path: &Path) -> Result<FileReport> {
	let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let mut anim: RasterAnimation =
		serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
	anim.validate();

	let sequences = anim
		.sequences()
		.iter()
		.map(|seq| SequenceReport {
			name: seq.name.clone(),
			spec: seq.frames.clone(),
			frame_count: seq.frame_list().len(),
			issues: seq.issues().iter().map(ToString::to_string).collect(),
		})
		.collect();

	Ok(FileReport {
		animation_name: anim.name,
		sequences,
	})
}

fn print_file_report(report: &FileReport, path: &Path, verbose: bool) {
	let issue_count = report.issue_count();
	let icon = if issue_count == 0 {
		"✅"
	} else {
		"⚠️ "
	};
	println!(
		"{icon} {:<50} | {} sequences, {} issue(s) | {}",
		path.display(),
		report.sequences.len(),
		issue_count,
		report.animation_name
	);

	for seq in &report.sequences {
		if !verbose && seq.issues.is_empty() {
			continue;
		}
		println!("    `{}`: `{}` -> {} frames", seq.name, seq.spec, seq.frame_count);
		for issue in &seq.issues {
			log::warn!("`{}`: {issue}", seq.name);
		}
	}
}

#[derive(Default)]
struct ScanTotals {
	files: usize,
	sequences: usize,
	issues: usize,
	failures: usize,
}

impl ScanTotals {
	fn update(&mut self, report: &FileReport) {
		self.files += 1;
		self.sequences += report.sequences.len();
		self.issues += report.issue_count();
	}
}
