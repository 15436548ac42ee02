//! Scenario tables for the absolute and gap flatteners.

use bitflatten::{
    flatten_bits, flatten_bits_incremental, gaps_to_positions, set_bits, window_base, Encoding,
    IndexBuffer, Indexer,
};

fn flatten_absolute(base: u32, mask: u64) -> Vec<u32> {
    let mut buf = IndexBuffer::with_capacity(64);
    buf.push_window(base, mask);
    buf.into_vec()
}

fn flatten_gaps(masks: &[u64]) -> Vec<u32> {
    let mut out = vec![0u32; masks.len() * 64];
    let mut len = 0;
    let mut carry = 0;
    for &mask in masks {
        flatten_bits_incremental(&mut out, &mut len, mask, &mut carry);
    }
    out.truncate(len);
    out
}

// ============================================================================
// Absolute flattening
// ============================================================================

#[test]
fn test_flatten_bits_table() {
    let all: Vec<u32> = (0..64).collect();
    let cases: Vec<(u64, Vec<u32>)> = vec![
        (0x11, vec![0x0, 0x4]),
        (0x1001_0010_0100, vec![0x8, 0x14, 0x20, 0x2c]),
        (
            0x8101_0101_0101_0101,
            vec![0x0, 0x8, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0x3f],
        ),
        (0xf000_0000_0000_0000, vec![0x3c, 0x3d, 0x3e, 0x3f]),
        (0xffff_ffff_ffff_ffff, all),
    ];

    for (i, (mask, expected)) in cases.into_iter().enumerate() {
        let got = flatten_absolute(0, mask);
        assert_eq!(got.len(), mask.count_ones() as usize, "case {}", i);
        assert_eq!(got, expected, "case {}: mask={:#x}", i, mask);
    }
}

#[test]
fn test_flatten_bits_later_window() {
    let got = flatten_absolute(window_base(5), 0x11);
    assert_eq!(got, vec![320, 324]);
}

#[test]
fn test_flatten_bits_raw_slice() {
    let mut out = [0u32; 16];
    let mut cursor = 3;
    flatten_bits(&mut out, &mut cursor, 64, 0b1001);
    assert_eq!(cursor, 5);
    assert_eq!(&out[3..5], &[64, 67]);
    // Slots before the cursor are untouched
    assert_eq!(&out[..3], &[0, 0, 0]);
}

// ============================================================================
// Gap flattening
// ============================================================================

#[test]
fn test_flatten_bits_incremental_single_mask() {
    let cases: Vec<(u64, Vec<u32>)> = vec![
        (0x0, vec![]),
        (0x11, vec![0x1, 0x4]),
        (0x1001_0010_0100, vec![0x9, 0x14 - 0x8, 0x20 - 0x14, 0x2c - 0x20]),
        (
            0x1001_0010_0300,
            vec![0x9, 0x9 - 0x8, 0x14 - 0x9, 0x20 - 0x14, 0x2c - 0x20],
        ),
        (
            0x8101_0101_0101_0101,
            vec![
                0x1,
                0x8,
                0x10 - 0x8,
                0x18 - 0x10,
                0x20 - 0x18,
                0x28 - 0x20,
                0x30 - 0x28,
                0x38 - 0x30,
                0x3f - 0x38,
            ],
        ),
        (0xf000_0000_0000_0000, vec![0x3d, 0x1, 0x1, 0x1]),
        (0xffff_ffff_ffff_ffff, vec![1; 64]),
    ];

    for (i, (mask, expected)) in cases.into_iter().enumerate() {
        assert_eq!(flatten_gaps(&[mask]), expected, "case {}: mask={:#x}", i, mask);
    }
}

#[test]
fn test_flatten_bits_incremental_multiple_masks() {
    let cases: Vec<(Vec<u64>, Vec<u32>)> = vec![
        (vec![0x1, 0x1], vec![0x1, 0x40]),
        (vec![0x1, 0x8000_0000_0000_0000], vec![0x1, 0x7f]),
        (vec![0x1, 0x0, 0x8000_0000_0000_0000], vec![0x1, 0xbf]),
        (vec![0x1, 0x0, 0x0, 0x8000_0000_0000_0000], vec![0x1, 0xff]),
        (
            vec![0x0100_1001_0010_0100, 0x0100_1001_0010_0100],
            vec![0x9, 0xc, 0xc, 0xc, 0xc, 0x10, 0xc, 0xc, 0xc, 0xc],
        ),
        (vec![u64::MAX, u64::MAX], vec![1; 128]),
    ];

    for (i, (masks, expected)) in cases.into_iter().enumerate() {
        assert_eq!(flatten_gaps(&masks), expected, "case {}: masks={:x?}", i, masks);
    }
}

#[test]
fn test_single_zero_mask_leaves_full_carry() {
    let mut out = [0u32; 1];
    let mut len = 0;
    let mut carry = 0;
    flatten_bits_incremental(&mut out, &mut len, 0, &mut carry);
    assert_eq!(len, 0);
    assert_eq!(carry, 64);
}

#[test]
fn test_long_zero_run_folds_into_one_gap() {
    let mut masks = vec![0u64; 1000];
    masks[0] = 1;
    masks[999] = 1 << 10;
    let gaps = flatten_gaps(&masks);
    assert_eq!(gaps, vec![1, 999 * 64 + 10]);
}

// ============================================================================
// Equivalence of the two encodings
// ============================================================================

#[test]
fn test_gap_prefix_sums_match_absolute() {
    let masks = [
        0x0000_0000_0000_0000u64,
        0x8000_0000_0000_0001,
        0x0000_0000_0000_0000,
        0x1234_5678_9abc_def0,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0100_0000_0000,
    ];

    let mut absolute = IndexBuffer::for_input_len(masks.len() * 64);
    for (i, &mask) in masks.iter().enumerate() {
        absolute.push_window(window_base(i), mask);
    }

    let reconstructed: Vec<u32> = gaps_to_positions(&flatten_gaps(&masks)).collect();
    assert_eq!(reconstructed, absolute.as_slice());
}

#[test]
fn test_indexer_encodings_agree() {
    let masks = [0x11u64, 0, 0xf000_0000_0000_0000, 0, 0, 1];
    let mut abs = Indexer::new(Encoding::Absolute, masks.len() * 64);
    let mut gap = Indexer::new(Encoding::Gap, masks.len() * 64);
    abs.push_all(&masks).unwrap();
    gap.push_all(&masks).unwrap();

    let abs = abs.finish();
    let gap = gap.finish();
    assert_eq!(abs.positions(), gap.positions());
    assert_eq!(abs.trailing_zeros(), gap.trailing_zeros());
    assert_eq!(abs.len(), masks.iter().map(|m| m.count_ones() as usize).sum::<usize>());
}

#[test]
fn test_scanner_positions_match_flatten() {
    for mask in [0x11u64, 0x1001_0010_0100, 1 << 63, u64::MAX] {
        let scanned: Vec<u32> = set_bits(mask).collect();
        assert_eq!(scanned, flatten_absolute(0, mask));
    }
}
