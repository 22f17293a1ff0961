use std::fmt;

/// A line/column location inside a source text.
///
/// Lines are 1-based. Columns are 1-based for characters: every newline
/// resets the column to 0 and each consumed character after it advances the
/// column by one, so the first character on a line sits at column 1.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point {
	/// 1-based line number.
	pub line: usize,
	/// Column within the line (0 immediately after a newline).
	pub column: usize,
}

impl Point {
	/// Create a point at the given line and column.
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// The point before any input has been consumed: line 1, column 0.
	pub fn start() -> Self {
		Self::new(1, 0)
	}

	/// Advance the point through every character of `slice`, updating line
	/// and column bookkeeping. Columns count characters, not bytes.
	pub fn advance_str(&mut self, slice: &str) {
		for ch in slice.chars() {
			if ch == '\n' {
				self.line += 1;
				self.column = 0;
			} else {
				self.column += 1;
			}
		}
	}
}

impl Default for Point {
	fn default() -> Self {
		Self::start()
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}
