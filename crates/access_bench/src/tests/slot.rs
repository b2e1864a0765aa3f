use std::mem::{align_of, size_of};

use crate::slot::{
    AccumulatorSlot, CACHE_LINE_SIZE, PackedSlot, PaddedSlot, Padding, allocate_slots, total,
};

#[test]
fn padded_slot_fills_a_cache_line() {
    assert_eq!(size_of::<PaddedSlot>(), CACHE_LINE_SIZE);
    assert_eq!(align_of::<PaddedSlot>(), CACHE_LINE_SIZE);
    assert_eq!(Padding::Padded.slot_size(), CACHE_LINE_SIZE);
}

#[test]
fn packed_slots_share_cache_lines() {
    assert_eq!(size_of::<PackedSlot>(), 8);
    assert_eq!(Padding::Packed.slot_size(), 8);

    let slots = allocate_slots::<PackedSlot>(8).unwrap();
    let first = &slots[0] as *const PackedSlot as usize;
    let second = &slots[1] as *const PackedSlot as usize;
    assert_eq!(second - first, 8);
}

#[test]
fn padded_slots_on_distinct_lines() {
    let slots = allocate_slots::<PaddedSlot>(4).unwrap();
    for pair in slots.windows(2) {
        let a = &pair[0] as *const PaddedSlot as usize;
        let b = &pair[1] as *const PaddedSlot as usize;
        assert_eq!(a % CACHE_LINE_SIZE, 0);
        assert_eq!(a / CACHE_LINE_SIZE + 1, b / CACHE_LINE_SIZE);
    }
}

#[test]
fn slots_start_at_zero_and_accumulate() {
    let slots = allocate_slots::<PaddedSlot>(3).unwrap();
    assert_eq!(total(&slots), 0);

    slots[0].add(5);
    slots[2].add(7);
    slots[2].add(1);
    assert_eq!(slots[2].value(), 8);
    assert_eq!(total(&slots), 13);
}

#[test]
fn accumulation_wraps() {
    let slot = PackedSlot::new();
    slot.add(u64::MAX);
    slot.add(2);
    assert_eq!(slot.value(), 1);
}
