use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Check source trees for balanced brackets, aware of comments and strings.",
	long_about = "bal (balance) scans source files for unbalanced (), [], and {} \
	              delimiters.\n\nDelimiters inside // and /* */ comments or inside '...', \
	              \"...\", and `...` literals are ignored, so only structure that would actually \
	              confuse a parser is flagged. The first fault in each file is reported with its \
	              line and column.\n\nQuick start:\n  bal init    Create a bal.toml config \
	              file\n  bal check   Scan the project for unbalanced delimiters\n  bal bundle  \
	              Bundle markdown docs into a knowledge base"
)]
pub struct BalCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, or a single file to scan.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Do not use `.gitignore` files to filter the directory walk.
	#[arg(long, global = true, default_value_t = false)]
	pub no_gitignore: bool,

	/// Exclude paths matching this gitignore-style pattern. Repeatable, and
	/// applied on top of any `[exclude]` patterns from `bal.toml`.
	#[arg(long, global = true)]
	pub exclude: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize bal in a project by creating a sample config file.
	///
	/// Creates a `bal.toml` file in the project root with every option
	/// present but commented out. If the file already exists, this command
	/// is a no-op and exits successfully.
	Init,
	/// Scan the project for unbalanced delimiters.
	///
	/// Walks the project tree (or scans a single file given via `--path`),
	/// skipping gitignored and excluded paths, and reports the first fault
	/// in each file. Exits with a non-zero status code when any file is
	/// unbalanced.
	///
	/// Ideal for CI pipelines and pre-commit hooks. Use `--format` to
	/// control the output style.
	Check {
		/// Output format for check results. Use `text` for human-readable
		/// output, `json` for programmatic consumption, or `github` for
		/// GitHub Actions annotations that appear inline on PRs.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Bundle markdown documents into an embeddable knowledge base.
	///
	/// Reads every `*.md` file directly inside SOURCE (subdirectories are
	/// not visited), derives lookup keywords from each file name, and writes
	/// the collection as a single importable artifact.
	Bundle {
		/// Directory containing the markdown documents to bundle.
		source: PathBuf,

		/// Where to write the bundled output.
		#[arg(long, short)]
		output: PathBuf,

		/// Output format for the bundle. Use `module` for an ES module
		/// exporting `KNOWLEDGE_BASE`, or `json` for a bare JSON array.
		#[arg(long, value_enum, default_value_t = BundleOutputFormat::Module)]
		format: BundleOutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Each fault entry includes
	/// the file path, the fault message, and the line/column position.
	Json,
	/// GitHub Actions annotation format. Emits `::error` annotations that
	/// appear inline on pull request diffs.
	Github,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BundleOutputFormat {
	/// An ES module exporting the entries as `KNOWLEDGE_BASE`.
	Module,
	/// A bare JSON array.
	Json,
}
