mod common;

use bal_cli::BalCli;
use bal_cli::Commands;
use bal_cli::OutputFormat;
use bal_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn check_passes_on_balanced_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.js"), "const x = [1, 2];\n")?;
	std::fs::write(
		tmp.path().join("lib.ts"),
		"export function add(a: number, b: number) {\n\treturn a + b;\n}\n",
	)?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Syntax OK: 2 file(s) scanned."));

	Ok(())
}

#[test]
fn check_fails_with_fault_details() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("src"))?;
	std::fs::write(
		tmp.path().join("src/broken.js"),
		"function f() {\n  return [1, 2);\n}\n",
	)?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"src/broken.js: Error: Mismatched ')' at line 2:15. Expected ']' (opened at 2:10)",
		))
		.stderr(predicates::str::contains(
			"1 of 1 scanned file(s) have unbalanced delimiters.",
		));

	Ok(())
}

#[rstest]
#[case::unexpected(")", "Unexpected ')' at line 1:1")]
#[case::mismatched("(]", "Mismatched ']' at line 1:2. Expected ')' (opened at 1:1)")]
#[case::unclosed("{\n", "Unclosed '{' at line 1:1")]
fn check_renders_each_fault_kind(#[case] source: &str, #[case] message: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.js"), source)?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(format!(
			"app.js: Error: {message}"
		)));

	Ok(())
}

#[test]
fn check_scans_a_single_file_given_via_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("lone.js");
	std::fs::write(&file, ")")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(&file)
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"lone.js: Error: Unexpected ')' at line 1:1",
		));

	Ok(())
}

#[test]
fn check_json_format_reports_faults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("broken.js"), ")")?;
	std::fs::write(tmp.path().join("ok.js"), "()")?;

	let mut cmd = common::bal_cmd();
	let output = cmd
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.get_output()
		.stdout
		.clone();

	let report: Value = serde_json::from_slice(&output)?;
	assert_eq!(report["ok"], Value::Bool(false));
	assert_eq!(report["scanned"], 2);
	let faults = report["faults"]
		.as_array()
		.unwrap_or_else(|| panic!("expected faults array"));
	assert_eq!(faults.len(), 1);
	assert_eq!(faults[0]["file"], "broken.js");
	assert_eq!(faults[0]["line"], 1);
	assert_eq!(faults[0]["column"], 1);
	assert_eq!(faults[0]["message"], "Unexpected ')' at line 1:1");

	Ok(())
}

#[test]
fn check_json_format_reports_success() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("ok.js"), "()")?;

	let mut cmd = common::bal_cmd();
	let output = cmd
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let report: Value = serde_json::from_slice(&output)?;
	assert_eq!(report["ok"], Value::Bool(true));
	assert_eq!(report["scanned"], 1);
	assert_eq!(report["faults"], serde_json::json!([]));

	Ok(())
}

#[test]
fn check_github_format_emits_annotations() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("broken.js"), ")")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--format")
		.arg("github")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains(
			"::error file=broken.js,line=1,col=1::Unexpected ')' at line 1:1",
		));

	Ok(())
}

#[test]
fn check_respects_gitignore_and_exclude_flags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".gitignore"), "dist/\n")?;
	std::fs::create_dir_all(tmp.path().join("dist"))?;
	std::fs::create_dir_all(tmp.path().join("vendor"))?;
	std::fs::create_dir_all(tmp.path().join("src"))?;
	std::fs::write(tmp.path().join("dist/a.js"), ")")?;
	std::fs::write(tmp.path().join("vendor/b.js"), ")")?;
	std::fs::write(tmp.path().join("src/ok.js"), "const a = [];")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--exclude")
		.arg("vendor/")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Syntax OK: 1 file(s) scanned."));

	// Disabling gitignore exposes the fault hidden under dist/.
	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--exclude")
		.arg("vendor/")
		.arg("--no-gitignore")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("dist/a.js"));

	Ok(())
}

#[test]
fn check_reads_config_from_bal_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("bal.toml"),
		"extensions = [\"custom\"]\n\n[exclude]\npatterns = [\"legacy/\"]\n",
	)?;
	std::fs::create_dir_all(tmp.path().join("legacy"))?;
	std::fs::write(tmp.path().join("widget.custom"), "(")?;
	std::fs::write(tmp.path().join("legacy/old.js"), ")")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"widget.custom: Error: Unclosed '(' at line 1:1",
		))
		.stderr(predicates::str::contains("old.js").not());

	Ok(())
}

#[test]
fn check_verbose_lists_balanced_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("ok.js"), "()")?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("ok ok.js"))
		.stdout(predicates::str::contains("Syntax OK: 1 file(s) scanned."));

	Ok(())
}

#[test]
fn check_warns_when_nothing_is_scannable() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Syntax OK: 0 file(s) scanned."))
		.stderr(predicates::str::contains("no scannable files"));

	Ok(())
}

#[test]
fn check_missing_path_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::bal_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path().join("not-there"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no such file or directory"));

	Ok(())
}

#[test]
fn check_format_flag_is_accepted_by_cli_parser() {
	use clap::Parser;

	let cli = BalCli::parse_from(["bal", "check", "--format", "json"]);
	match cli.command {
		Some(Commands::Check { format }) => {
			assert!(matches!(format, OutputFormat::Json));
		}
		_ => panic!("expected Check command"),
	}

	// The format defaults to text when not specified.
	let cli = BalCli::parse_from(["bal", "check"]);
	match cli.command {
		Some(Commands::Check { format }) => {
			assert!(matches!(format, OutputFormat::Text));
		}
		_ => panic!("expected Check command"),
	}
}

#[test]
fn global_flags_are_accepted_by_cli_parser() {
	use clap::Parser;

	let cli = BalCli::parse_from([
		"bal",
		"check",
		"--no-gitignore",
		"--exclude",
		"dist/",
		"--exclude",
		"*.min.js",
	]);
	assert!(cli.no_gitignore);
	assert_eq!(cli.exclude, vec!["dist/", "*.min.js"]);
}
