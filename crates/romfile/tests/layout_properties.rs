//! Property tests for layout validation and segment access.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use romfile::{Record, RomImage, SegmentFile, SegmentLayout, StructFile, TypedSegmentFile};

/// Segment size, segment offset and segment count
fn layout_and_count() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..64, 0usize..64, 0usize..16)
}

fn patterned(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

proptest! {
    #[test]
    fn segment_count_is_derived_from_length((size, offset, count) in layout_and_count()) {
        let layout = SegmentLayout::new(size, offset);
        let file = SegmentFile::zeroed(layout.buffer_len(count).unwrap(), layout)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(file.segment_count(), count);
        prop_assert_eq!(file.segments().len(), count);
    }

    #[test]
    fn partial_trailing_segment_is_rejected(
        (size, offset, count) in layout_and_count(),
        extra in 1usize..64,
    ) {
        prop_assume!(extra % size != 0);
        let layout = SegmentLayout::new(size, offset);
        let err = SegmentFile::zeroed(layout.buffer_len(count).unwrap() + extra, layout).unwrap_err();
        prop_assert!(err.is_layout());
    }

    #[test]
    fn offset_past_end_is_rejected(size in 1usize..64, len in 0usize..64, excess in 1usize..64) {
        let err = SegmentFile::zeroed(len, SegmentLayout::new(size, len + excess)).unwrap_err();
        prop_assert!(err.is_layout());
    }

    #[test]
    fn index_bounds_are_exclusive((size, offset, count) in layout_and_count(), k in 0usize..8) {
        let layout = SegmentLayout::new(size, offset);
        let file = SegmentFile::zeroed(layout.buffer_len(count).unwrap(), layout).unwrap();

        prop_assert!(file.get_segment(count + k).unwrap_err().is_index());
        if count > 0 {
            prop_assert!(file.get_segment(count - 1).is_ok());
        }
    }

    #[test]
    fn set_segment_only_touches_its_slice(
        (size, offset, count) in (1usize..64, 0usize..64, 1usize..16),
        target in 0usize..16,
        seed in any::<u8>(),
    ) {
        let target = target % count;
        let layout = SegmentLayout::new(size, offset);
        let mut file = SegmentFile::new(patterned(layout.buffer_len(count).unwrap(), seed), layout).unwrap();
        let before: Vec<Vec<u8>> = (0..count).map(|i| file.get_segment(i).unwrap()).collect();

        let replacement = vec![seed ^ 0x5A; size];
        file.set_segment(target, &replacement).unwrap();

        for (i, original) in before.iter().enumerate() {
            let current = file.get_segment(i).unwrap();
            if i == target {
                prop_assert_eq!(&current, &replacement);
            } else {
                prop_assert_eq!(&current, original);
            }
        }
        prop_assert_eq!(&file.as_bytes()[..offset], &patterned(offset, seed)[..]);
    }

    #[test]
    fn struct_file_requires_exact_length(len in 0usize..32, fill in any::<u8>()) {
        let result = StructFile::<[u8; 16]>::new(vec![fill; len]);
        if len == 16 {
            let file = result.unwrap();
            prop_assert_eq!(file.get().unwrap().to_bytes().unwrap(), vec![fill; 16]);
        } else {
            prop_assert!(result.unwrap_err().is_layout());
        }
    }

    #[test]
    fn save_then_reload_preserves_segments(count in 0usize..8, offset in 0usize..24, seed in any::<u8>()) {
        let layout = SegmentLayout::for_record::<[u8; 12]>(offset);
        let file = TypedSegmentFile::<[u8; 12]>::new(patterned(layout.buffer_len(count).unwrap(), seed), offset)
            .unwrap();

        let reloaded = TypedSegmentFile::<[u8; 12]>::from_bytes(&file.save(), offset).unwrap();
        prop_assert_eq!(reloaded.segment_count(), file.segment_count());
        for i in 0..count {
            prop_assert_eq!(reloaded.get_segment(i).unwrap(), file.get_segment(i).unwrap());
        }
    }
}
