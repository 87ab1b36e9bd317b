//! Byte frequency analysis.

/// Occurrence count for each of the 256 byte values.
///
/// Built once per input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    counts: [u64; 256],
}

impl WeightTable {
    /// Count every byte of `bytes` in a single pass.
    pub fn count(bytes: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        WeightTable { counts }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(byte, weight)` pairs with a non-zero weight, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable { counts: [0; 256] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let table = WeightTable::count(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table, WeightTable::default());
    }

    #[test]
    fn test_counts() {
        let table = WeightTable::count(b"aaaab");
        assert_eq!(table.get(b'a'), 4);
        assert_eq!(table.get(b'b'), 1);
        assert_eq!(table.get(b'c'), 0);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_iter_is_byte_ordered() {
        let table = WeightTable::count(&[0xff, 0x00, 0x7f, 0x00]);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(0x00, 2), (0x7f, 1), (0xff, 1)]);
    }
}
