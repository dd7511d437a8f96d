//! Breadth-first NFA execution engine.

use crate::api::MatchRange;
use crate::indexing::InputIndexer;
use crate::insn::{Insn, Program};
use crate::util::DebugCheckIndex;
use smallvec::{smallvec, SmallVec};

/// The state of a thread executing regex bytecode. (Not to be confused
/// with an OS thread.) Threads are values: forking copies the parent.
#[derive(Debug, Copy, Clone)]
struct InterpreterThread {
    /// The index within the program of the next instruction to execute.
    pc: usize,

    /// The input index where this thread started matching.
    match_begin: usize,
}

/// Executes a bytecode program in breadth-first mode, without backtracking.
///
/// Threads advance in lockstep with respect to their input position: all
/// live threads share one input index, and the subject is fed to them one
/// code unit at a time. This is breadth-first simulation of an NFA, and it
/// makes the running time linear in the subject length: the visitation
/// filter admits at most one thread per program counter per input index,
/// so each position costs at most one executor step per instruction.
///
/// The subtlety is reproducing what a backtracking engine would report.
/// Take /abc|..|[a-c]{10,}/ against "abcccccccccccccc". All three
/// alternatives match, and a backtracker reports "abc" because it explores
/// alternatives in order. In lockstep, however, the /../ thread reaches its
/// accept a full code unit before the /abc/ thread does. An accept
/// therefore cannot simply end the search: threads that outrank the
/// accepting one must be allowed to finish, and only their matches may
/// displace the recorded one. Threads ranked below the accepting one can
/// be dropped immediately, since any match they produce would lose anyway.
/// When no higher-priority work remains, the recorded match is final.
#[derive(Debug)]
pub(crate) struct NfaInterpreter<'r, Input: InputIndexer> {
    program: &'r Program,
    input: Input,
    input_index: usize,

    /// pc_last_visit[k] is the input index at which a thread with pc == k
    /// was last admitted by the executor, with length equal to the program
    /// length. See `is_pc_visited`.
    pc_last_visit: SmallVec<[Option<usize>; 64]>,

    /// Threads that can potentially continue without further input.
    /// Sorted from low to high priority; the run phase pops from the back.
    active_threads: SmallVec<[InterpreterThread; 64]>,

    /// Threads suspended at a ConsumeRange, waiting for the next code unit.
    /// Sorted from high to low priority, the opposite of `active_threads`.
    blocked_threads: SmallVec<[InterpreterThread; 64]>,

    /// The match of the highest-priority accepting thread seen so far in
    /// the current search.
    best_match: Option<MatchRange>,
}

impl<'r, Input: InputIndexer> NfaInterpreter<'r, Input> {
    pub(crate) fn new(program: &'r Program, input: Input, input_index: usize) -> Self {
        debug_assert!(!program.insns.is_empty(), "Program must not be empty");
        debug_assert!(input_index <= input.len(), "Start index out of bounds");
        Self {
            program,
            input,
            input_index,
            pc_last_visit: smallvec![None; program.insns.len()],
            active_threads: SmallVec::new(),
            blocked_threads: SmallVec::new(),
            best_match: None,
        }
    }

    /// Find up to `matches_out.len()` matches, writing their boundaries to
    /// `matches_out`. The search begins at the current input index, and
    /// each successive search resumes where the previous match ended.
    /// \return the number of matches found.
    pub(crate) fn find_matches(&mut self, matches_out: &mut [MatchRange]) -> usize {
        let mut match_num = 0;
        while match_num != matches_out.len() {
            match self.find_next_match() {
                Some(m) => {
                    *matches_out.mat(match_num) = m;
                    match_num += 1;
                    self.set_input_index(m.end);
                }
                None => break,
            }
        }
        match_num
    }

    /// Change the input index for future searches.
    fn set_input_index(&mut self, new_input_index: usize) {
        debug_assert!(new_input_index <= self.input.len());
        self.input_index = new_input_index;
    }

    /// Find the next match, beginning the search at `input_index`.
    fn find_next_match(&mut self) -> Option<MatchRange> {
        debug_assert!(self.active_threads.is_empty());
        debug_assert!(self.blocked_threads.is_empty());
        debug_assert!(self.best_match.is_none());

        // The visitation invariant requires pc_last_visit[pc] < input_index
        // for every pc reachable without consumption, for the thread seeded
        // below. A full reset satisfies it unconditionally; an incremental
        // scheme leaning on the monotonic input index could skip this fill.
        for slot in self.pc_last_visit.iter_mut() {
            *slot = None;
        }

        // All threads start at pc 0.
        self.active_threads.push(InterpreterThread {
            pc: 0,
            match_begin: self.input_index,
        });
        self.run_active_threads();

        // Stop on exhausted input, or once some thread has accepted and no
        // thread that outranks it remains. Lower-priority threads were
        // discarded at the accept, so the latter is simply an empty blocked
        // list.
        while self.input_index != self.input.len()
            && !(self.best_match.is_some() && self.blocked_threads.is_empty())
        {
            debug_assert!(self.active_threads.is_empty());
            let input_char: u16 = self.input.at(self.input_index).into();
            self.input_index += 1;

            // Until the first accept, also attempt a match starting after
            // `input_char`. The fresh thread must rank below every thread
            // that could still complete a match from an earlier start.
            if self.best_match.is_none() {
                self.active_threads.push(InterpreterThread {
                    pc: 0,
                    match_begin: self.input_index,
                });
            }

            self.flush_blocked_threads(input_char);
            self.run_active_threads();
        }

        let result = self.best_match.take();
        self.blocked_threads.clear();
        self.active_threads.clear();
        result
    }

    /// Run each active thread until it can't continue without further
    /// input. `active_threads` is empty afterwards; the suspended survivors
    /// sit on `blocked_threads` from high to low priority.
    fn run_active_threads(&mut self) {
        while let Some(t) = self.active_threads.pop() {
            self.run_active_thread(t);
        }
    }

    /// Run an active thread `t` until it reaches a ConsumeRange or Accept,
    /// or arrives at a pc already claimed at this input index.
    /// - At a ConsumeRange, `t` moves to `blocked_threads`.
    /// - At an Accept, `best_match` is set from `t.match_begin` and the
    ///   current input index, and the remaining active threads (all of
    ///   strictly lower priority) are discarded.
    fn run_active_thread(&mut self, mut t: InterpreterThread) {
        loop {
            if self.is_pc_visited(t.pc) {
                return;
            }
            self.mark_pc_visited(t.pc);

            match *self.program.insns.iat(t.pc) {
                Insn::ConsumeRange { .. } => {
                    self.blocked_threads.push(t);
                    return;
                }
                Insn::Fork { target } => {
                    let mut fork = t;
                    fork.pc = target as usize;
                    self.active_threads.push(fork);
                    t.pc += 1;
                }
                Insn::Jump { target } => {
                    t.pc = target as usize;
                }
                Insn::Accept => {
                    self.best_match = Some(MatchRange {
                        begin: t.match_begin,
                        end: self.input_index,
                    });
                    self.active_threads.clear();
                    return;
                }
            }
        }
    }

    /// Unblock the blocked threads whose range admits `input_char`; the
    /// rest are dropped. `input_index` must already point past
    /// `input_char` so that the visitation marks land on the new index.
    ///
    /// Walking from the low-priority end leaves `active_threads` sorted
    /// low to high, as the run phase requires.
    fn flush_blocked_threads(&mut self, input_char: u16) {
        for i in (0..self.blocked_threads.len()).rev() {
            let mut t = *self.blocked_threads.iat(i);
            let inst = *self.program.insns.iat(t.pc);
            debug_assert!(
                matches!(inst, Insn::ConsumeRange { .. }),
                "Blocked thread should wait on ConsumeRange"
            );
            if let Insn::ConsumeRange { min, max } = inst {
                if input_char >= min && input_char <= max {
                    t.pc += 1;
                    self.active_threads.push(t);
                }
            }
        }
        self.blocked_threads.clear();
    }

    // Two threads at the same pc and input index are redundant: one
    // matches iff the other does. The run phase executes higher-priority
    // threads first, so whichever thread claims a pc at a given input
    // index outranks any later arrival, and the later arrival can be
    // dropped without affecting the reported match.

    /// \return whether a thread was admitted at \p pc since the last
    /// increment of `input_index`.
    fn is_pc_visited(&self, pc: usize) -> bool {
        debug_assert!(self
            .pc_last_visit
            .iat(pc)
            .map_or(true, |seen| seen <= self.input_index));
        *self.pc_last_visit.iat(pc) == Some(self.input_index)
    }

    /// Mark \p pc as claimed at the current input index.
    fn mark_pc_visited(&mut self, pc: usize) {
        *self.pc_last_visit.mat(pc) = Some(self.input_index)
    }
}
