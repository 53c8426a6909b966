// Copyright (C) 2019-2026 The Runic Authors.
// This file is part of the Runic library.

// The Runic library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Runic library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Runic library. If not, see <https://www.gnu.org/licenses/>.

//! A trampoline, spec.md §4.5: function invocation bounces back to
//! `run`'s loop instead of recursing on the host stack, so a contract
//! calling itself a million times deep fails with `BudgetExceeded`
//! rather than a host stack overflow.

/// Either a finished value, or a thunk producing the next step. The
/// `'f` lifetime lets a thunk borrow from its caller (an `Interpreter`,
/// an `Activation`) instead of requiring everything it touches to be
/// `'static`.
pub enum Bounce<'f, T> {
    Done(T),
    More(Box<dyn FnOnce() -> Bounce<'f, T> + 'f>),
}

impl<'f, T> Bounce<'f, T> {
    /// Drives the trampoline to completion on the current stack frame.
    pub fn run(self) -> T {
        let mut current = self;
        loop {
            match current {
                Bounce::Done(value) => return value,
                Bounce::More(thunk) => current = thunk(),
            }
        }
    }

    /// Sequences another trampolined step after this one completes,
    /// without growing the call stack.
    pub fn bind<U>(self, f: impl FnOnce(T) -> Bounce<'f, U> + 'f) -> Bounce<'f, U>
    where
        T: 'f,
        U: 'f,
    {
        match self {
            Bounce::Done(value) => f(value),
            Bounce::More(thunk) => Bounce::More(Box::new(move || thunk().bind(f))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_unwinds_a_long_chain_of_more_without_overflowing() {
        fn count_down(n: u32) -> Bounce<'static, u32> {
            if n == 0 {
                Bounce::Done(0)
            } else {
                Bounce::More(Box::new(move || count_down(n - 1)))
            }
        }
        assert_eq!(count_down(200_000).run(), 0);
    }

    #[test]
    fn bind_sequences_two_trampolines() {
        let first: Bounce<'static, i32> = Bounce::Done(21);
        let combined = first.bind(|n| Bounce::Done(n * 2));
        assert_eq!(combined.run(), 42);
    }
}
