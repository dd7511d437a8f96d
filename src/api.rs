use crate::nfa::NfaInterpreter;
use core::ops::Range;

pub use crate::indexing::{CodeUnit, InputIndexer, OneByteInput, TwoByteInput};
pub use crate::insn::{Insn, JumpTarget, Program};

/// The extent of a match, as a half-open range of code-unit indexes into
/// the subject string.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MatchRange {
    /// The index of the first code unit of the match.
    pub begin: usize,

    /// One past the last code unit of the match. Equal to `begin` when the
    /// match is empty.
    pub end: usize,
}

impl MatchRange {
    /// \return the match as a standard range.
    ///
    /// This is a convenience to work around the fact that `Range` does not
    /// support `Copy`.
    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// \return whether the match is of the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl From<MatchRange> for Range<usize> {
    #[inline]
    fn from(m: MatchRange) -> Self {
        m.as_range()
    }
}

/// Find up to `matches_out.len()` non-overlapping matches of `program` in
/// `input`, beginning the search at index `start`, and write their
/// boundaries to `matches_out` in input order.
/// \return the number of matches found.
///
/// Each search after the first resumes where the previous match ended; a
/// match of the empty string does not advance the search, so a caller that
/// wants to step past empty matches must do so itself.
///
/// `start` must be at most `input.len()`, and `program` must be
/// well-formed; see [`Program::new`].
pub fn find_matches<Input: InputIndexer>(
    program: &Program,
    input: Input,
    start: usize,
    matches_out: &mut [MatchRange],
) -> usize {
    let mut interpreter = NfaInterpreter::new(program, input, start);
    interpreter.find_matches(matches_out)
}

/// [`find_matches`] over a subject of one-byte (Latin-1) code units.
///
/// ```rust
/// use lockstep::{find_matches_one_byte, Insn, MatchRange, Program};
///
/// // The program for /a/.
/// let program = Program::new(vec![
///     Insn::ConsumeRange { min: 'a' as u16, max: 'a' as u16 },
///     Insn::Accept,
/// ]);
/// let mut matches = [MatchRange::default(); 8];
/// let found = find_matches_one_byte(&program, b"banana", 0, &mut matches);
/// assert_eq!(found, 3);
/// assert_eq!(matches[0].as_range(), 1..2);
/// ```
pub fn find_matches_one_byte(
    program: &Program,
    input: &[u8],
    start: usize,
    matches_out: &mut [MatchRange],
) -> usize {
    find_matches(program, OneByteInput::new(input), start, matches_out)
}

/// [`find_matches`] over a subject of two-byte (UCS-2) code units.
/// Surrogate pairs are matched as two separate code units.
pub fn find_matches_two_byte(
    program: &Program,
    input: &[u16],
    start: usize,
    matches_out: &mut [MatchRange],
) -> usize {
    find_matches(program, TwoByteInput::new(input), start, matches_out)
}
