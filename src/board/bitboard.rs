//! Single-word bitboard for the 8x8 board

use super::{Pos, TOTAL_CELLS};

/// Bitboard representation, one bit per cell.
/// 64 cells fit exactly in a u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= 1u64 << pos.to_index();
    }

    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.bits &= !(1u64 << pos.to_index());
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        (self.bits >> pos.to_index()) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Bitboard mirrored through the center (180° rotation)
    #[inline]
    pub fn rotate_180(self) -> Self {
        Self {
            bits: self.bits.reverse_bits(),
        }
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { current: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    current: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == 0 {
            return None;
        }
        let idx = self.current.trailing_zeros() as usize;
        // Clear the bit we just found
        self.current &= self.current - 1;
        debug_assert!(idx < TOTAL_CELLS);
        Some(Pos::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new();
        let pos = Pos::new(3, 5);
        assert!(!bb.get(pos));
        bb.set(pos);
        assert!(bb.get(pos));
        assert_eq!(bb.count(), 1);
        bb.clear(pos);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_iter_ones_in_index_order() {
        let mut bb = Bitboard::new();
        bb.set(Pos::new(7, 7));
        bb.set(Pos::new(0, 0));
        bb.set(Pos::new(4, 2));
        let got: Vec<Pos> = bb.iter_ones().collect();
        assert_eq!(got, vec![Pos::new(0, 0), Pos::new(4, 2), Pos::new(7, 7)]);
    }

    #[test]
    fn test_rotate_180() {
        let mut bb = Bitboard::new();
        bb.set(Pos::new(0, 0));
        bb.set(Pos::new(2, 5));
        let rotated = bb.rotate_180();
        assert!(rotated.get(Pos::new(7, 7)));
        assert!(rotated.get(Pos::new(5, 2)));
        assert_eq!(rotated.count(), 2);
        assert_eq!(rotated.rotate_180(), bb);
    }
}
