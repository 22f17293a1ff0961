use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn bal_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("bal"));
	cmd.env("NO_COLOR", "1");
	cmd
}
