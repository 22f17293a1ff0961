use std::path::Path;
use std::path::PathBuf;
use std::process;

use bal_cli::BalCli;
use bal_cli::BundleOutputFormat;
use bal_cli::Commands;
use bal_cli::OutputFormat;
use bal_core::BalConfig;
use bal_core::BalError;
use bal_core::BundleFormat;
use bal_core::CheckOptions;
use bal_core::FileReport;
use bal_core::check_path;
use bal_core::collect_entries;
use bal_core::write_bundle;
use clap::Parser;
use owo_colors::OwoColorize;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = BalCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Check { format }) => run_check(&args, *format),
		Some(Commands::Bundle {
			source,
			output,
			format,
		}) => run_bundle(&args, source, output, *format),
		None => {
			eprintln!("No subcommand specified. Run `bal --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render through miette for rich diagnostics with help text and
		// error codes.
		match e.downcast::<BalError>() {
			Ok(bal_err) => {
				let report: miette::Report = (*bal_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &BalCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Route log output to stderr so stdout stays reserved for results.
/// `RUST_LOG` wins over the flag-derived default.
fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run_init(args: &BalCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join("bal.toml");

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
		return Ok(());
	}

	let sample_config = "# bal configuration\n\n# Extra file extensions to scan on top of the \
	                     defaults (js, jsx, ts, tsx, mjs, cjs).\n# extensions = [\"vue\", \
	                     \"svelte\"]\n\n# Maximum file size in bytes. Larger files are skipped \
	                     during directory walks.\n# max_file_size = 10485760\n\n# Skip .gitignore \
	                     filtering during walks.\n# disable_gitignore = false\n\n# Gitignore-style \
	                     patterns to exclude.\n# [exclude]\n# patterns = [\"dist/\", \
	                     \"*.min.js\"]\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created bal.toml");

	println!();
	println!("Next steps:");
	println!("  1. Run `bal check` to scan the project");
	println!("  2. Uncomment options in bal.toml as needed");

	Ok(())
}

fn run_check(args: &BalCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	// Config is discovered next to a file target, or inside a directory
	// target.
	let config_root = if root.is_file() {
		root.parent()
			.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
	} else {
		root.clone()
	};
	let config = BalConfig::load(&config_root)?;

	// CLI flags layer on top of config values.
	let mut options = CheckOptions::from_config(config.as_ref());
	options.exclude_patterns.extend(args.exclude.iter().cloned());
	if args.no_gitignore {
		options.disable_gitignore = true;
	}

	let reports = check_path(&root, &options)?;
	let faults: Vec<&FileReport> = reports.iter().filter(|r| !r.is_balanced()).collect();

	if args.verbose && matches!(format, OutputFormat::Text) {
		for report in &reports {
			if report.is_balanced() {
				println!(
					"{} {}",
					colored!("ok", green),
					make_relative(&report.file, &root)
				);
			}
		}
	}

	if faults.is_empty() {
		match format {
			OutputFormat::Json => {
				let output = serde_json::json!({
					"ok": true,
					"scanned": reports.len(),
					"faults": [],
				});
				println!("{output}");
			}
			OutputFormat::Github => {
				println!("Syntax OK: {} file(s) scanned.", reports.len());
			}
			OutputFormat::Text => {
				if reports.is_empty() {
					eprintln!(
						"{} no scannable files found under `{}`",
						colored!("warning:", yellow),
						root.display()
					);
				}
				println!(
					"{}: {} file(s) scanned.",
					colored!("Syntax OK", green),
					reports.len()
				);
			}
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			let fault_entries: Vec<serde_json::Value> = faults
				.iter()
				.map(|report| {
					let rel = make_relative(&report.file, &root);
					let message = report.outcome.message().unwrap_or_default();
					let point = report.outcome.point().unwrap_or_default();
					serde_json::json!({
						"file": rel,
						"message": message,
						"line": point.line,
						"column": point.column,
					})
				})
				.collect();
			let output = serde_json::json!({
				"ok": false,
				"scanned": reports.len(),
				"faults": fault_entries,
			});
			println!("{output}");
		}
		OutputFormat::Github => {
			for report in &faults {
				let rel = make_relative(&report.file, &root);
				let message = report.outcome.message().unwrap_or_default();
				let point = report.outcome.point().unwrap_or_default();
				println!(
					"::error file={rel},line={},col={}::{message}",
					point.line, point.column
				);
			}
			eprintln!("{}", check_summary(faults.len(), reports.len()));
		}
		OutputFormat::Text => {
			for report in &faults {
				let rel = make_relative(&report.file, &root);
				let message = report.outcome.message().unwrap_or_default();
				eprintln!("{rel}: {} {message}", colored!("Error:", red));
			}
			eprintln!();
			eprintln!("{}", check_summary(faults.len(), reports.len()));
		}
	}

	process::exit(1);
}

fn check_summary(fault_count: usize, scanned: usize) -> String {
	format!("{fault_count} of {scanned} scanned file(s) have unbalanced delimiters.")
}

fn run_bundle(
	args: &BalCli,
	source: &Path,
	output: &Path,
	format: BundleOutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let source = if source.is_absolute() {
		source.to_path_buf()
	} else {
		root.join(source)
	};
	let output = if output.is_absolute() {
		output.to_path_buf()
	} else {
		root.join(output)
	};

	let entries = collect_entries(&source)?;
	let bundle_format = match format {
		BundleOutputFormat::Module => BundleFormat::Module,
		BundleOutputFormat::Json => BundleFormat::Json,
	};
	let summary = write_bundle(&entries, &output, bundle_format)?;

	println!(
		"Bundled {} file(s) into {}.",
		summary.entry_count,
		make_relative(&summary.output, &root)
	);
	if args.verbose {
		for entry in &entries {
			println!("  {}", entry.name);
		}
	}

	Ok(())
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);

	// Checking a single file makes the root and the path identical, which
	// strips down to an empty string.
	if relative.as_os_str().is_empty() {
		path.display().to_string()
	} else {
		relative.display().to_string()
	}
}
