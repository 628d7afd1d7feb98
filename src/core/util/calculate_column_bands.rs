use std::num::NonZeroU32;
use std::ops::Range;

/// Splits `width` columns into contiguous bands, one per worker.
///
/// Never produces more bands than columns; the last band takes the remainder.
#[must_use]
pub fn calculate_column_bands(max_bands: NonZeroU32, width: u32) -> Vec<Range<u32>> {
    if width == 0 {
        return Vec::new();
    }

    let bands = max_bands.get().min(width);
    let band_width = width / bands;

    (0..bands)
        .map(|band| {
            let start = band * band_width;
            let end = if band == bands - 1 {
                width
            } else {
                start + band_width
            };

            start..end
        })
        .collect()
}

#[must_use]
pub fn available_workers() -> NonZeroU32 {
    std::thread::available_parallelism()
        .ok()
        .and_then(|n| NonZeroU32::new(u32::try_from(n.get()).unwrap_or(u32::MAX)))
        .unwrap_or(NonZeroU32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(max: u32, width: u32) -> Vec<Range<u32>> {
        calculate_column_bands(NonZeroU32::new(max).unwrap(), width)
    }

    #[test]
    fn zero_width_gives_no_bands() {
        assert!(bands(4, 0).is_empty());
    }

    #[test]
    fn bands_do_not_exceed_width() {
        assert_eq!(bands(8, 3), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn last_band_takes_remainder() {
        assert_eq!(bands(3, 10), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn bands_cover_every_column_exactly_once() {
        for max in 1..=16 {
            for width in 1..=64 {
                let bands = bands(max, width);
                let mut next = 0;

                for band in &bands {
                    assert_eq!(band.start, next);
                    assert!(band.end > band.start);
                    next = band.end;
                }

                assert_eq!(next, width);
                assert_eq!(bands.len() as u32, max.min(width));
            }
        }
    }

    #[test]
    fn available_workers_is_at_least_one() {
        assert!(available_workers().get() >= 1);
    }
}
