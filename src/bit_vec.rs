use crate::code_table::Code;

/// Growable bit buffer, packed MSB-first: the first bit pushed lands in the
/// high bit of byte 0. Unused low bits of the last byte stay zero, which is
/// the padding written to disk.
#[derive(Default, Debug)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push_bit(bit);
        }
    }

}

/// Bits of an already packed buffer, MSB-first, borrowing rather than copying.
pub fn bits_of(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_with_zero_padding() {
        let mut bits = BitVec::default();
        bits.push_code(&Code::from("00001"));
        assert_eq!(bits.bit_count(), 5);
        assert_eq!(bits.as_bytes(), &[0x08]);
    }

    #[test]
    fn test_crosses_byte_boundary() {
        let mut bits = BitVec::with_capacity(12);
        bits.push_code(&Code::from("1111111"));
        bits.push_code(&Code::from("10101"));
        assert_eq!(bits.bit_count(), 12);
        assert_eq!(bits.into_bytes(), vec![0xff, 0x50]);
    }

    #[test]
    fn test_read_back() {
        let read: Vec<bool> = bits_of(&[0b1010_0000, 0b0000_0001]).collect();
        assert_eq!(read.len(), 16);
        assert_eq!(&read[..4], &[true, false, true, false]);
        assert!(read[4..15].iter().all(|&bit| !bit));
        assert!(read[15]);

        let mut bits = BitVec::default();
        bits.push_code(&Code::from("011"));
        let back: Vec<bool> = bits_of(bits.as_bytes()).take(bits.bit_count()).collect();
        assert_eq!(back, vec![false, true, true]);
    }
}
