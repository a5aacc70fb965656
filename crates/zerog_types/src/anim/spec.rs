//! Compiler for the frame-spec mini-language.
//!
//! See the [module docs](crate::anim) for the grammar. Compilation is a
//! two-stage process: the spec string is tokenized into a flat command
//! stream, then groups are reduced innermost-first and each level is
//! resolved by a ranges-and-separators pass followed by an extender pass.
//!
//! Compilation never fails: malformed constructs are recorded as
//! [`FrameSpecIssue`]s and the offending operator is dropped, keeping as
//! much of the spec as can still be interpreted.

use std::collections::VecDeque;
use std::fmt::Display;

use thiserror::Error;

use super::NUMBER_MAX_LENGTH;

/// A problem found while compiling a frame spec.
///
/// Issues are diagnostics, not failures: the compiler always produces a
/// frame list, dropping whatever it could not interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameSpecIssue {
	/// A number ran past [`NUMBER_MAX_LENGTH`] digits; extra digits are
	/// dropped.
	#[error("number exceeds {NUMBER_MAX_LENGTH} digits; extra digit `{digit}` ignored")]
	OversizedNumber {
		/// The digit that was dropped.
		digit: char,
	},
	/// An operator at the end of the spec has nothing to its right.
	#[error("`{operator}` at end of spec is missing its right operand")]
	MissingRightOperandAtEnd {
		/// The operator character.
		operator: char,
	},
	/// The token to the right of an operator is not a number.
	#[error("`{operator}` is missing a number as its right operand")]
	MissingRightOperand {
		/// The operator character.
		operator: char,
	},
	/// An operator at the start of the spec has nothing to its left.
	#[error("`{operator}` at beginning of spec is missing its left operand")]
	MissingLeftOperandAtBeginning {
		/// The operator character.
		operator: char,
	},
	/// The token to the left of an operator is not a number.
	#[error("`{operator}` is missing a number as its left operand")]
	MissingLeftOperand {
		/// The operator character.
		operator: char,
	},
	/// Both range endpoints are the same value; the right operand is
	/// dropped and the left endpoint stands alone.
	#[error("range endpoints are equal ({value}); right operand ignored")]
	RangeEndpointsEqual {
		/// The shared endpoint value.
		value: u32,
	},
	/// A group delimiter with no matching partner.
	#[error("unbalanced `{delimiter}` in spec")]
	UnbalancedGroup {
		/// The unmatched delimiter character.
		delimiter: char,
	},
}

/// The result of compiling one frame-spec string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFrameSpec {
	source: String,
	frames: Vec<u32>,
	issues: Vec<FrameSpecIssue>,
}

impl CompiledFrameSpec {
	/// Returns the spec string this was compiled from.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Returns the compiled frame list.
	pub fn frames(&self) -> &[u32] {
		&self.frames
	}

	/// Consumes the compilation result, returning the frame list.
	pub fn into_frames(self) -> Vec<u32> {
		self.frames
	}

	/// Returns the issues found during compilation.
	pub fn issues(&self) -> &[FrameSpecIssue] {
		&self.issues
	}

	/// Returns true if no issues were found.
	pub fn is_clean(&self) -> bool {
		self.issues.is_empty()
	}

	/// Returns the compiled frame list rendered as a comma-separated string.
	pub fn interpreted(&self) -> String {
		let parts: Vec<String> = self.frames.iter().map(u32::to_string).collect();
		parts.join(",")
	}
}

impl Display for CompiledFrameSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"`{}` -> [{}] ({} issues)",
			self.source,
			self.interpreted(),
			self.issues.len()
		)
	}
}

/// One tokenized frame-spec command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
	Numbers(Vec<u32>),
	GroupBegin,
	GroupEnd,
	Extender,
	Range,
	Separator,
}

/// Compiles a frame-spec string into a frame list.
///
/// Never fails; see [`CompiledFrameSpec::issues`] for anything the
/// compiler had to drop or reinterpret.
pub fn compile_frame_spec(spec: &str) -> CompiledFrameSpec {
	let mut issues = Vec::new();
	let mut commands = tokenize(spec, &mut issues);
	reduce_groups(&mut commands, &mut issues);
	let frames = resolve_level(commands, &mut issues);
	CompiledFrameSpec {
		source: spec.to_owned(),
		frames,
		issues,
	}
}

/// Tokenizes a spec string into a flat command stream.
///
/// Unrecognized characters (including whitespace) are skipped.
fn tokenize(spec: &str, issues: &mut Vec<FrameSpecIssue>) -> Vec<Command> {
	let mut commands = Vec::new();
	let mut number = String::new();
	let mut depth = 0usize;

	fn flush_number(commands: &mut Vec<Command>, number: &mut String) {
		if number.is_empty() {
			return;
		}
		// Leading zeros are fine, the value is what matters.
		let value: u32 = number.parse().unwrap_or(0);
		commands.push(Command::Numbers(vec![value]));
		number.clear();
	}

	for c in spec.chars() {
		match c {
			'0'..='9' => {
				if number.len() < NUMBER_MAX_LENGTH {
					number.push(c);
				} else {
					issues.push(FrameSpecIssue::OversizedNumber {
						digit: c,
					});
				}
			}
			'(' => {
				flush_number(&mut commands, &mut number);
				depth += 1;
				commands.push(Command::GroupBegin);
			}
			')' => {
				flush_number(&mut commands, &mut number);
				if depth == 0 {
					issues.push(FrameSpecIssue::UnbalancedGroup {
						delimiter: ')',
					});
				} else {
					depth -= 1;
					commands.push(Command::GroupEnd);
				}
			}
			'x' => {
				flush_number(&mut commands, &mut number);
				commands.push(Command::Extender);
			}
			'-' | 't' => {
				flush_number(&mut commands, &mut number);
				commands.push(Command::Range);
			}
			',' => {
				flush_number(&mut commands, &mut number);
				commands.push(Command::Separator);
			}
			_ => {}
		}
	}
	flush_number(&mut commands, &mut number);

	commands
}

/// Reduces groups innermost-first, replacing each with a single resolved
/// number list.
///
/// Unclosed `(` markers are dropped with an issue; their contents join the
/// enclosing level, as if the group were closed at the end of the spec.
fn reduce_groups(commands: &mut Vec<Command>, issues: &mut Vec<FrameSpecIssue>) {
	while let Some(end) = commands.iter().position(|c| *c == Command::GroupEnd) {
		let Some(begin) = commands[..end].iter().rposition(|c| *c == Command::GroupBegin) else {
			// Tokenizer already rejected closers at depth 0.
			commands.remove(end);
			continue;
		};
		let inner: Vec<Command> = commands.drain(begin + 1..=end).collect();
		let inner = inner[..inner.len() - 1].to_vec();
		let values = resolve_level(inner, issues);
		commands[begin] = Command::Numbers(values);
	}
	while let Some(begin) = commands.iter().position(|c| *c == Command::GroupBegin) {
		issues.push(FrameSpecIssue::UnbalancedGroup {
			delimiter: '(',
		});
		commands.remove(begin);
	}
}

/// Resolves one group-free command level into a frame list.
fn resolve_level(commands: Vec<Command>, issues: &mut Vec<FrameSpecIssue>) -> Vec<u32> {
	let commands = resolve_ranges(commands, issues);
	let commands = resolve_extenders(commands, issues);

	let mut frames = Vec::new();
	for cmd in commands {
		if let Command::Numbers(values) = cmd {
			frames.extend(values);
		}
	}
	frames
}

/// Pops the command after a binary operator if it is a number list.
fn take_right_operand(
	queue: &mut VecDeque<Command>,
	operator: char,
	issues: &mut Vec<FrameSpecIssue>,
) -> Option<Vec<u32>> {
	match queue.front() {
		Some(Command::Numbers(_)) => {
			if let Some(Command::Numbers(values)) = queue.pop_front() {
				Some(values)
			} else {
				None
			}
		}
		Some(_) => {
			issues.push(FrameSpecIssue::MissingRightOperand {
				operator,
			});
			None
		}
		None => {
			issues.push(FrameSpecIssue::MissingRightOperandAtEnd {
				operator,
			});
			None
		}
	}
}

/// Reports a missing or non-number left operand.
fn report_bad_left_operand(at_beginning: bool, operator: char, issues: &mut Vec<FrameSpecIssue>) {
	if at_beginning {
		issues.push(FrameSpecIssue::MissingLeftOperandAtBeginning {
			operator,
		});
	} else {
		issues.push(FrameSpecIssue::MissingLeftOperand {
			operator,
		});
	}
}

/// Resolves range operators, merging each resolved run into a single
/// number list. Separators and extenders pass through untouched; a
/// separator to the left of a range is a missing-operand error.
fn resolve_ranges(commands: Vec<Command>, issues: &mut Vec<FrameSpecIssue>) -> Vec<Command> {
	let mut queue: VecDeque<Command> = commands.into();
	let mut out: Vec<Command> = Vec::new();

	while let Some(cmd) = queue.pop_front() {
		if cmd != Command::Range {
			out.push(cmd);
			continue;
		}
		let Some(next) = take_right_operand(&mut queue, '-', issues) else {
			continue;
		};
		let at_beginning = out.is_empty();
		let Some(Command::Numbers(prev)) = out.last_mut() else {
			// The already-popped right operand is dropped with the operator.
			report_bad_left_operand(at_beginning, '-', issues);
			continue;
		};
		let (Some(&from), Some(&to)) = (prev.last(), next.first()) else {
			report_bad_left_operand(at_beginning, '-', issues);
			continue;
		};
		if from == to {
			issues.push(FrameSpecIssue::RangeEndpointsEqual {
				value: from,
			});
			continue;
		}
		if to > from {
			prev.extend(from + 1..to);
		} else {
			prev.extend((to + 1..from).rev());
		}
		prev.extend(next);
	}

	out
}

/// Resolves extender operators. The left operand is the resolved list to
/// the extender's left; the right operand's first value is the repeat
/// count and any remaining values are appended once as a remainder.
fn resolve_extenders(commands: Vec<Command>, issues: &mut Vec<FrameSpecIssue>) -> Vec<Command> {
	let mut queue: VecDeque<Command> = commands.into();
	let mut out: Vec<Command> = Vec::new();

	while let Some(cmd) = queue.pop_front() {
		if cmd != Command::Extender {
			out.push(cmd);
			continue;
		}
		let Some(next) = take_right_operand(&mut queue, 'x', issues) else {
			continue;
		};
		let at_beginning = out.is_empty();
		let Some(Command::Numbers(prev)) = out.last_mut() else {
			report_bad_left_operand(at_beginning, 'x', issues);
			continue;
		};
		let Some(&count) = next.first() else {
			issues.push(FrameSpecIssue::MissingRightOperand {
				operator: 'x',
			});
			continue;
		};
		let base = std::mem::take(prev);
		for _ in 0..count {
			prev.extend_from_slice(&base);
		}
		prev.extend(&next[1..]);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frames(spec: &str) -> Vec<u32> {
		compile_frame_spec(spec).into_frames()
	}

	#[test]
	fn single_number() {
		let compiled = compile_frame_spec("7");
		assert!(compiled.is_clean());
		assert_eq!(compiled.frames(), &[7]);
	}

	#[test]
	fn separated_list() {
		assert_eq!(frames("1,3,5"), vec![1, 3, 5]);
	}

	#[test]
	fn ascending_range() {
		assert_eq!(frames("1-5"), vec![1, 2, 3, 4, 5]);
	}

	#[test]
	fn descending_range() {
		assert_eq!(frames("5-1"), vec![5, 4, 3, 2, 1]);
	}

	#[test]
	fn t_is_a_range_too() {
		assert_eq!(frames("2t4"), vec![2, 3, 4]);
	}

	#[test]
	fn extender_repeats_resolved_run() {
		assert_eq!(frames("1-3x2"), vec![1, 2, 3, 1, 2, 3]);
	}

	#[test]
	fn extender_on_single_number() {
		assert_eq!(frames("4x3"), vec![4, 4, 4]);
	}

	#[test]
	fn extender_zero_erases_run() {
		assert_eq!(frames("1-3x0"), Vec::<u32>::new());
	}

	#[test]
	fn grouped_run_repeats() {
		assert_eq!(frames("(1,2)x3"), vec![1, 2, 1, 2, 1, 2]);
	}

	#[test]
	fn nested_groups() {
		assert_eq!(frames("((1,2)x2,5)x2"), vec![1, 2, 1, 2, 5, 1, 2, 1, 2, 5]);
	}

	#[test]
	fn range_then_extender_then_range() {
		assert_eq!(frames("1-3x2-1"), vec![1, 2, 3, 1, 2, 3, 1]);
	}

	// The right operand's first value is the count; the rest is appended
	// once. Preserved from the original engine.
	#[test]
	fn extender_remainder_quirk_group() {
		assert_eq!(frames("1x(3,2)"), vec![1, 1, 1, 2]);
	}

	#[test]
	fn extender_remainder_quirk_range() {
		assert_eq!(frames("5x2-1"), vec![5, 5, 1]);
	}

	#[test]
	fn equal_range_endpoints_reported() {
		let compiled = compile_frame_spec("3-3");
		assert_eq!(compiled.frames(), &[3]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::RangeEndpointsEqual {
				value: 3
			}]
		);
	}

	#[test]
	fn chained_equal_range_recovers() {
		let compiled = compile_frame_spec("3-3-5");
		assert_eq!(compiled.frames(), &[3, 4, 5]);
		assert_eq!(compiled.issues().len(), 1);
	}

	#[test]
	fn oversized_number_truncated() {
		let compiled = compile_frame_spec("1234");
		assert_eq!(compiled.frames(), &[123]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::OversizedNumber {
				digit: '4'
			}]
		);
	}

	#[test]
	fn dangling_operator_at_end() {
		let compiled = compile_frame_spec("2x");
		assert_eq!(compiled.frames(), &[2]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::MissingRightOperandAtEnd {
				operator: 'x'
			}]
		);
	}

	#[test]
	fn dangling_operator_at_beginning() {
		let compiled = compile_frame_spec("x2");
		assert!(compiled.frames().is_empty());
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::MissingLeftOperandAtBeginning {
				operator: 'x'
			}]
		);
	}

	#[test]
	fn separator_is_an_operand_barrier() {
		let compiled = compile_frame_spec("1,x2");
		assert_eq!(compiled.frames(), &[1]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::MissingLeftOperand {
				operator: 'x'
			}]
		);
	}

	#[test]
	fn adjacent_operators_reported() {
		let compiled = compile_frame_spec("1-x3");
		assert_eq!(
			compiled.issues()[0],
			FrameSpecIssue::MissingRightOperand {
				operator: '-'
			}
		);
	}

	#[test]
	fn unbalanced_close_ignored() {
		let compiled = compile_frame_spec("1,2)");
		assert_eq!(compiled.frames(), &[1, 2]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::UnbalancedGroup {
				delimiter: ')'
			}]
		);
	}

	#[test]
	fn unbalanced_open_joins_outer_level() {
		let compiled = compile_frame_spec("(1,2");
		assert_eq!(compiled.frames(), &[1, 2]);
		assert_eq!(
			compiled.issues(),
			&[FrameSpecIssue::UnbalancedGroup {
				delimiter: '('
			}]
		);
	}

	#[test]
	fn whitespace_and_noise_skipped() {
		assert_eq!(frames(" 1 , 2 ,3 "), vec![1, 2, 3]);
	}

	#[test]
	fn empty_spec_is_empty() {
		let compiled = compile_frame_spec("");
		assert!(compiled.is_clean());
		assert!(compiled.frames().is_empty());
	}

	#[test]
	fn compilation_is_deterministic() {
		let a = compile_frame_spec("1-3x2-1,(4,5)x2");
		let b = compile_frame_spec("1-3x2-1,(4,5)x2");
		assert_eq!(a, b);
	}

	#[test]
	fn mixed_spec_resolves_left_to_right() {
		assert_eq!(frames("1-3,2x2"), vec![1, 2, 3, 2, 2]);
	}

	#[test]
	fn interpreted_string_matches_frames() {
		let compiled = compile_frame_spec("1-3");
		assert_eq!(compiled.interpreted(), "1,2,3");
	}
}
