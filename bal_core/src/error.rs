use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum BalError {
	#[error(transparent)]
	#[diagnostic(code(bal::io_error))]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	#[diagnostic(code(bal::serialize_error))]
	Serialize(#[from] serde_json::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(bal::config_parse),
		help("check that bal.toml is valid TOML with an optional [exclude] section")
	)]
	ConfigParse(String),

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(bal::file_too_large),
		help("increase max_file_size in bal.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(bal::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },

	#[error("bundle source is not a directory: `{path}`")]
	#[diagnostic(
		code(bal::bundle_source),
		help("pass a directory containing the markdown files to bundle")
	)]
	BundleSource { path: String },
}

pub type BalResult<T> = Result<T, BalError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
