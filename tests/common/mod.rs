use lockstep::{
    find_matches_one_byte, find_matches_two_byte, Insn, JumpTarget, MatchRange, Program,
};

/// Which code-unit width to execute tests under.
#[derive(Debug, Copy, Clone)]
pub enum Width {
    OneByte,
    TwoByte,
}

/// A testing configuration.
#[derive(Debug, Copy, Clone)]
pub struct TestConfig {
    pub width: Width,
}

/// Run a test function against each input width.
pub fn test_with_configs(func: fn(tc: TestConfig)) {
    func(TestConfig {
        width: Width::OneByte,
    });
    func(TestConfig {
        width: Width::TwoByte,
    });
}

impl TestConfig {
    /// Search for \p program in \p input, returning up to \p max_matches
    /// matches found from \p start.
    pub fn find_matches(
        &self,
        program: &Program,
        input: &str,
        start: usize,
        max_matches: usize,
    ) -> Vec<MatchRange> {
        let mut matches = vec![MatchRange::default(); max_matches];
        let found = match self.width {
            Width::OneByte => {
                assert!(input.is_ascii(), "One-byte tests expect ASCII input");
                find_matches_one_byte(program, input.as_bytes(), start, &mut matches)
            }
            Width::TwoByte => {
                let units: Vec<u16> = input.encode_utf16().collect();
                find_matches_two_byte(program, &units, start, &mut matches)
            }
        };
        assert!(found <= max_matches);
        matches.truncate(found);
        matches
    }

    /// Search for \p program in \p input, returning the first match from
    /// \p start, or None if none.
    pub fn find(&self, program: &Program, input: &str, start: usize) -> Option<MatchRange> {
        self.find_matches(program, input, start, 1).into_iter().next()
    }
}

pub trait MatchTestHelpers {
    /// "Fluent" style helper for testing a match list against a list of
    /// (begin, end) pairs.
    fn test_eq(&self, rhs: Vec<(usize, usize)>);
}

impl MatchTestHelpers for Vec<MatchRange> {
    #[track_caller]
    fn test_eq(&self, rhs: Vec<(usize, usize)>) {
        let got: Vec<(usize, usize)> = self.iter().map(|m| (m.begin, m.end)).collect();
        assert_eq!(got, rhs)
    }
}

/// Shorthand for a single-unit consume.
pub fn consume(c: char) -> Insn {
    Insn::ConsumeRange {
        min: c as u16,
        max: c as u16,
    }
}

/// Shorthand for an inclusive consume range.
pub fn consume_range(min: char, max: char) -> Insn {
    Insn::ConsumeRange {
        min: min as u16,
        max: max as u16,
    }
}

pub fn fork(target: JumpTarget) -> Insn {
    Insn::Fork { target }
}

pub fn jump(target: JumpTarget) -> Insn {
    Insn::Jump { target }
}

/// A priority-aware backtracking interpreter over the same bytecode, used
/// as ground truth for equivalence tests. Fork alternatives are explored
/// depth-first with the fall-through preferred, and the first accept
/// reached wins; searching from successive start positions yields the
/// leftmost match. Only suitable for programs whose branches all point
/// forward, as nothing here breaks non-consuming cycles.
pub fn backtrack_find(program: &Program, input: &[u16], start: usize) -> Option<MatchRange> {
    for begin in start..=input.len() {
        if let Some(end) = backtrack_at(program, input, begin) {
            return Some(MatchRange { begin, end });
        }
    }
    None
}

fn backtrack_at(program: &Program, input: &[u16], begin: usize) -> Option<usize> {
    // Pending (pc, position) alternatives; the most recent is tried first.
    let mut stack: Vec<(usize, usize)> = vec![(0, begin)];
    while let Some((mut pc, mut pos)) = stack.pop() {
        loop {
            match program.insns[pc] {
                Insn::ConsumeRange { min, max } => {
                    if pos < input.len() && input[pos] >= min && input[pos] <= max {
                        pos += 1;
                        pc += 1;
                    } else {
                        break;
                    }
                }
                Insn::Fork { target } => {
                    stack.push((target as usize, pos));
                    pc += 1;
                }
                Insn::Jump { target } => pc = target as usize,
                Insn::Accept => return Some(pos),
            }
        }
    }
    None
}

/// Tiny xorshift PRNG so the random-program tests are deterministic.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

/// Generate a well-formed random program over the alphabet 'a'..='d'. All
/// branches point forward, so every path makes progress and the
/// backtracking reference terminates.
pub fn random_program(rng: &mut XorShift, len: usize) -> Program {
    assert!(len >= 1);
    let mut insns = Vec::with_capacity(len);
    for i in 0..len - 1 {
        let target = (i + 1 + rng.below(len - 1 - i)) as JumpTarget;
        insns.push(match rng.below(4) {
            0 => Insn::Fork { target },
            1 => Insn::Jump { target },
            _ => {
                let min = b'a' + rng.below(4) as u8;
                let max = min + rng.below((b'd' - min + 1) as usize) as u8;
                Insn::ConsumeRange {
                    min: min as u16,
                    max: max as u16,
                }
            }
        });
    }
    insns.push(Insn::Accept);
    Program::new(insns)
}

/// Generate a random subject over the same alphabet.
pub fn random_input(rng: &mut XorShift, len: usize) -> String {
    (0..len)
        .map(|_| (b'a' + rng.below(4) as u8) as char)
        .collect()
}
