/*!

# lockstep - breadth-first regex bytecode matching

This crate provides an interpreter for compiled regex bytecode which runs in
time linear in the subject length. It simulates a non-deterministic finite
automaton breadth-first: all simulation threads advance over the subject in
lockstep, sharing a single input position, so no backtracking ever occurs.
The matches reported are nevertheless exactly those a priority-ordered
backtracking engine would report.

The crate is an execution core only. It consumes a validated instruction
stream (see [`Insn`] and [`Program`]) produced by an external compiler, and
it reports matches as half-open code-unit ranges ([`MatchRange`]). Pattern
parsing, capture groups, and match iteration facades belong to the layers
around it.

# Example: finding matches

```rust
use lockstep::{find_matches_one_byte, Insn, MatchRange, Program};

// The program for /a+/, greedy: consume an 'a', then prefer looping over
// accepting.
let program = Program::new(vec![
    Insn::ConsumeRange { min: 'a' as u16, max: 'a' as u16 },
    Insn::Fork { target: 3 },
    Insn::Jump { target: 0 },
    Insn::Accept,
]);

let mut matches = [MatchRange::default(); 8];
let found = find_matches_one_byte(&program, b"baaad", 0, &mut matches);
assert_eq!(found, 1);
assert_eq!(matches[0].as_range(), 1..4);
```

# Example: two-byte subjects

Subjects may be UCS-2 (`&[u16]`) instead of one-byte strings, without any
conversion. This is useful when interacting with systems that store text in
UTF-16, such as JavaScript engines, Windows, and the JVM.

```rust
use lockstep::{find_matches_two_byte, Insn, MatchRange, Program};

// The program for /中/.
let program = Program::new(vec![
    Insn::ConsumeRange { min: 0x4E2D, max: 0x4E2D },
    Insn::Accept,
]);

let subject: Vec<u16> = "中文中".encode_utf16().collect();
let mut matches = [MatchRange::default(); 4];
let found = find_matches_two_byte(&program, &subject, 0, &mut matches);
assert_eq!(found, 2);
assert_eq!((matches[0].begin, matches[0].end), (0, 1));
assert_eq!((matches[1].begin, matches[1].end), (2, 3));
```

# Priorities

A backtracking engine tries the alternatives of `/abc|../` left to right, so
against `"abc"` it reports the three-character match even though the second
alternative finishes sooner. The interpreter preserves this: every thread
carries a priority derived from the forks on its ancestry, an accepting
thread retires all lower-priority work, and the search ends only when no
thread that outranks the recorded match remains. See the documentation in
the `nfa` module for the full scheduling discipline.

# Crate features

- **std**. On by default; disable for `no_std` use (an allocator is still
  required).
- **prohibit-unsafe**. Replace unchecked indexing on the hot path with
  bounds-checked indexing in all build profiles.

*/

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::all)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub use crate::api::*;

mod api;
mod indexing;
mod insn;
mod nfa;
mod util;
