// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{self, Square};
use serde::{ser::SerializeSeq, Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::ops;

/// A set of squares on the chessboard. Every move query in this crate answers with a SquareSet of destination
/// squares. The implementation mirrors [`std::collections::HashSet`], but a set of at most 64 squares fits in a
/// single machine word, so it is `Copy` and never allocates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Creates a new, empty SquareSet.
    pub const fn empty() -> SquareSet {
        SquareSet(0)
    }

    /// Tests whether or not the given square is contained within this SquareSet.
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1u64 << square.0) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.0;
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn or(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    pub fn iter(&self) -> SquareSetIterator {
        SquareSetIterator(self.0)
    }
}

impl ops::BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        SquareSetIterator(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl Serialize for SquareSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len() as usize))?;
        for square in self.iter() {
            seq.serialize_element(&square)?;
        }
        seq.end()
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                let sq = Square::of(rank, file);
                if self.contains(sq) {
                    write!(f, " * ")?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in core::files() {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in core::files() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

/// An iterator over squares stored in a [`SquareSet`], in ascending square order.
pub struct SquareSetIterator(u64);

impl Iterator for SquareSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let next = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(Square(next))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

#[cfg(test)]
mod tests {
    use std::iter::FromIterator;

    use super::SquareSet;
    use crate::core::*;

    #[test]
    fn insert_and_contains() {
        let mut set = SquareSet::empty();
        assert!(!set.contains(A1));
        set.insert(A1);
        assert!(set.contains(A1));
        assert!(!set.contains(B1));
        assert_eq!(1, set.len());
    }

    #[test]
    fn count() {
        let set: SquareSet = vec![A3, A4, A5].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn union() {
        let set = SquareSet::from_iter(vec![A1, B2]) | SquareSet::from_iter(vec![B2, C3]);
        assert_eq!(3, set.len());
        assert!(set.contains(C3));
    }

    #[test]
    fn iter_is_ordered() {
        let set: SquareSet = vec![H8, A5, A3, A4].into_iter().collect();
        let squares: Vec<_> = set.into_iter().collect();
        assert_eq!(squares, vec![A3, A4, A5, H8]);
    }

    #[test]
    fn serializes_as_square_names() {
        let set: SquareSet = vec![E3, E4].into_iter().collect();
        assert_eq!(r#"["e3","e4"]"#, serde_json::to_string(&set).unwrap());
    }
}
