use logos::Logos;

use crate::Point;

/// Raw tokens produced by logos for flat tokenization of source text.
///
/// Every structurally significant character lexes as its own single-character
/// token so the walker can pair them (`//`, `/*`, `*/`) with one token of
/// lookahead; runs of inert characters collapse into `Text`.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("\n")]
	Newline,
	#[token("\\")]
	Backslash,
	#[token("/")]
	Slash,
	#[token("*")]
	Star,
	#[token("'")]
	SingleQuote,
	#[token("\"")]
	DoubleQuote,
	#[token("`")]
	Backtick,
	#[token("(")]
	OpenParen,
	#[token(")")]
	CloseParen,
	#[token("[")]
	OpenBracket,
	#[token("]")]
	CloseBracket,
	#[token("{")]
	OpenBrace,
	#[token("}")]
	CloseBrace,
	#[regex(r#"[^(){}\[\]'"`\\/*\n]+"#)]
	Text,
}

/// Lexical mode the scanner is in at the current cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LexicalMode {
	/// Outside any comment or string literal.
	Normal,
	/// Inside a `//` comment, until the end of the line.
	LineComment,
	/// Inside a `/* ... */` comment.
	BlockComment,
	/// Inside a string or template literal opened by the given quote.
	StringLiteral(char),
}

/// An opening delimiter that has not been closed yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingOpen {
	/// The opening delimiter character.
	delimiter: char,
	/// The closing delimiter that would match it.
	expected: char,
	/// Where the delimiter was opened.
	opened_at: Point,
}

/// Result of scanning a source text for delimiter balance.
///
/// Faults are ordinary values rather than errors: the scanner reports the
/// first structural divergence it finds and the caller decides presentation
/// and exit behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanOutcome {
	/// Every opened delimiter was closed in order.
	Balanced,
	/// A closing delimiter appeared while nothing was open.
	UnexpectedClose {
		/// The closing delimiter that was found.
		found: char,
		/// Where it was found.
		at: Point,
	},
	/// A closing delimiter did not match the innermost open delimiter.
	MismatchedClose {
		/// The closing delimiter that was found.
		found: char,
		/// The closing delimiter that would have matched.
		expected: char,
		/// Where the mismatch was found.
		at: Point,
		/// Where the unmatched delimiter was opened.
		opened_at: Point,
	},
	/// End of input was reached with at least one delimiter still open.
	/// Reports the innermost pending opener; outer ones surface on re-runs.
	Unclosed {
		/// The opening delimiter that was never closed.
		delimiter: char,
		/// Where it was opened.
		opened_at: Point,
	},
}

impl ScanOutcome {
	/// Returns true when no fault was found.
	pub fn is_balanced(&self) -> bool {
		matches!(self, Self::Balanced)
	}

	/// One-line description of the fault, or `None` when balanced.
	pub fn message(&self) -> Option<String> {
		match self {
			Self::Balanced => None,
			Self::UnexpectedClose { found, at } => {
				Some(format!("Unexpected '{found}' at line {at}"))
			}
			Self::MismatchedClose {
				found,
				expected,
				at,
				opened_at,
			} => {
				Some(format!(
					"Mismatched '{found}' at line {at}. Expected '{expected}' (opened at \
					 {opened_at})"
				))
			}
			Self::Unclosed {
				delimiter,
				opened_at,
			} => Some(format!("Unclosed '{delimiter}' at line {opened_at}")),
		}
	}

	/// The position a fault should be reported at, or `None` when balanced.
	pub fn point(&self) -> Option<Point> {
		match self {
			Self::Balanced => None,
			Self::UnexpectedClose { at, .. } | Self::MismatchedClose { at, .. } => Some(*at),
			Self::Unclosed { opened_at, .. } => Some(*opened_at),
		}
	}
}

/// Walks the raw token stream with mode-dependent rules, maintaining the
/// position tracker and the stack of pending opening delimiters.
struct BalanceScanner<'a> {
	/// The source text being scanned.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	/// Position of the last consumed character (line 1, column 0 initially).
	point: Point,
	/// The current lexical mode.
	mode: LexicalMode,
	/// Pending opening delimiters, innermost last.
	stack: Vec<PendingOpen>,
}

impl<'a> BalanceScanner<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			point: Point::start(),
			mode: LexicalMode::Normal,
			stack: Vec::new(),
		}
	}

	/// Get the text slice for the current raw token.
	fn current_slice(&self) -> &'a str {
		let (_, span) = &self.raw_tokens[self.cursor];
		&self.source[span.clone()]
	}

	/// Advance the position tracker through the current token's slice and
	/// move the cursor forward.
	fn advance_cursor(&mut self) {
		let slice = self.current_slice();
		self.point.advance_str(slice);
		self.cursor += 1;
	}

	/// The raw token after the current one, when it lexed successfully.
	fn peek(&self) -> Option<&RawToken> {
		match self.raw_tokens.get(self.cursor + 1) {
			Some((Ok(raw), _)) => Some(raw),
			_ => None,
		}
	}

	/// Position of the first character of the current token: one column past
	/// the last consumed character.
	fn token_point(&self) -> Point {
		Point::new(self.point.line, self.point.column + 1)
	}

	/// Main processing loop: walk the raw token stream with mode-dependent
	/// rules until the input ends or the first fault is found.
	fn process(&mut self) -> ScanOutcome {
		while self.cursor < self.raw_tokens.len() {
			let (result, _) = &self.raw_tokens[self.cursor];

			// Unrecognized bytes are inert content: advance past them.
			let Ok(raw) = result else {
				self.advance_cursor();
				continue;
			};

			// Newline bookkeeping takes precedence over every other rule. It
			// ends a line comment and never terminates a block comment or a
			// literal.
			if *raw == RawToken::Newline {
				if self.mode == LexicalMode::LineComment {
					self.mode = LexicalMode::Normal;
				}
				self.advance_cursor();
				continue;
			}

			match self.mode {
				LexicalMode::LineComment => self.advance_cursor(),
				LexicalMode::BlockComment => {
					match raw {
						RawToken::Star if self.peek() == Some(&RawToken::Slash) => {
							self.advance_cursor();
							self.advance_cursor();
							self.mode = LexicalMode::Normal;
						}
						_ => self.advance_cursor(),
					}
				}
				LexicalMode::StringLiteral(quote) => {
					match raw {
						RawToken::Backslash => self.skip_escaped(),
						RawToken::SingleQuote if quote == '\'' => self.exit_literal(),
						RawToken::DoubleQuote if quote == '"' => self.exit_literal(),
						RawToken::Backtick if quote == '`' => self.exit_literal(),
						_ => self.advance_cursor(),
					}
				}
				LexicalMode::Normal => {
					match raw {
						RawToken::Slash if self.peek() == Some(&RawToken::Slash) => {
							self.advance_cursor();
							self.advance_cursor();
							self.mode = LexicalMode::LineComment;
						}
						RawToken::Slash if self.peek() == Some(&RawToken::Star) => {
							self.advance_cursor();
							self.advance_cursor();
							self.mode = LexicalMode::BlockComment;
						}
						RawToken::SingleQuote => self.enter_literal('\''),
						RawToken::DoubleQuote => self.enter_literal('"'),
						RawToken::Backtick => self.enter_literal('`'),
						RawToken::OpenParen => self.push_open('(', ')'),
						RawToken::OpenBracket => self.push_open('[', ']'),
						RawToken::OpenBrace => self.push_open('{', '}'),
						RawToken::CloseParen => {
							if let Some(fault) = self.close_delimiter(')') {
								return fault;
							}
						}
						RawToken::CloseBracket => {
							if let Some(fault) = self.close_delimiter(']') {
								return fault;
							}
						}
						RawToken::CloseBrace => {
							if let Some(fault) = self.close_delimiter('}') {
								return fault;
							}
						}
						_ => self.advance_cursor(),
					}
				}
			}
		}

		// The input ended without a structural fault. Any delimiter still
		// pending is unclosed; the top of the stack is the innermost one.
		match self.stack.pop() {
			Some(open) => {
				ScanOutcome::Unclosed {
					delimiter: open.delimiter,
					opened_at: open.opened_at,
				}
			}
			None => ScanOutcome::Balanced,
		}
	}

	/// Enter string literal mode for the given quote character.
	fn enter_literal(&mut self, quote: char) {
		self.mode = LexicalMode::StringLiteral(quote);
		self.advance_cursor();
	}

	/// Close the current string literal and return to normal scanning.
	fn exit_literal(&mut self) {
		self.mode = LexicalMode::Normal;
		self.advance_cursor();
	}

	/// Skip a backslash and whatever follows it as a single unit. An escaped
	/// character can never close the literal. Skipping goes through
	/// `advance_cursor`, so an escaped newline still advances the line
	/// counter and later positions stay accurate.
	fn skip_escaped(&mut self) {
		self.advance_cursor();
		if self.cursor < self.raw_tokens.len() {
			self.advance_cursor();
		}
	}

	/// Record an opening delimiter together with the closer that would match
	/// it and the position it appeared at.
	fn push_open(&mut self, delimiter: char, expected: char) {
		let opened_at = self.token_point();
		self.stack.push(PendingOpen {
			delimiter,
			expected,
			opened_at,
		});
		self.advance_cursor();
	}

	/// Match a closing delimiter against the top of the stack. Returns the
	/// fault to report when the close is unexpected or mismatched.
	fn close_delimiter(&mut self, found: char) -> Option<ScanOutcome> {
		let at = self.token_point();

		let Some(open) = self.stack.pop() else {
			return Some(ScanOutcome::UnexpectedClose { found, at });
		};

		if found == open.expected {
			self.advance_cursor();
			None
		} else {
			Some(ScanOutcome::MismatchedClose {
				found,
				expected: open.expected,
				at,
				opened_at: open.opened_at,
			})
		}
	}
}

/// Scan a source text for balanced `()`, `[]`, and `{}` delimiters.
///
/// Delimiters inside `//` line comments, `/* ... */` block comments, and
/// `'`/`"`/`` ` `` literals are ignored. The scan stops at the first fault;
/// an unterminated comment or literal at end of input is not itself a fault.
///
/// ```rust
/// use bal_core::scan;
///
/// assert!(scan("const x = { a: [1, 2], b: \"){\" };").is_balanced());
/// assert!(!scan("call(args]").is_balanced());
/// ```
pub fn scan(source: &str) -> ScanOutcome {
	let mut scanner = BalanceScanner::new(source);
	scanner.process()
}
