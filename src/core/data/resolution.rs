use std::f64::consts::FRAC_1_SQRT_2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Truncates towards zero, so tiny windows can scale down to an empty resolution.
    #[must_use]
    pub fn scaled(&self, scale: ResolutionScale) -> Self {
        let factor = scale.length_factor();

        Self {
            width: (f64::from(self.width) * factor) as u32,
            height: (f64::from(self.height) * factor) as u32,
        }
    }
}

/// Preview resolutions, named by the share of pixel area they render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionScale {
    #[default]
    Full,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl ResolutionScale {
    pub const ALL: &'static [Self] = &[
        Self::Full,
        Self::Half,
        Self::Quarter,
        Self::Eighth,
        Self::Sixteenth,
    ];

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Scale applied to each axis; the square of this is the area share.
    #[must_use]
    pub const fn length_factor(self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Half => FRAC_1_SQRT_2,
            Self::Quarter => 0.5,
            Self::Eighth => FRAC_1_SQRT_2 * 0.5,
            Self::Sixteenth => 0.25,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Full => "100%",
            Self::Half => "50%",
            Self::Quarter => "25%",
            Self::Eighth => "12.5%",
            Self::Sixteenth => "6.25%",
        }
    }
}

impl std::fmt::Display for ResolutionScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_array_has_default_first() {
        assert_eq!(ResolutionScale::ALL.first(), Some(&ResolutionScale::default()));
    }

    #[test]
    fn area_share_matches_display_name() {
        let expected = [1.0, 0.5, 0.25, 0.125, 0.0625];

        for (&scale, area) in ResolutionScale::ALL.iter().zip(expected) {
            let factor = scale.length_factor();
            assert!((factor * factor - area).abs() < 1e-12, "{scale}");
        }
    }

    #[test]
    fn index_round_trips() {
        for (i, &scale) in ResolutionScale::ALL.iter().enumerate() {
            assert_eq!(ResolutionScale::from_index(i), Some(scale));
            assert_eq!(scale.index(), i);
        }
        assert_eq!(ResolutionScale::from_index(5), None);
    }

    #[test]
    fn scaled_resolution_truncates() {
        let resolution = Resolution::new(1600, 900);

        assert_eq!(resolution.scaled(ResolutionScale::Full), resolution);
        assert_eq!(resolution.scaled(ResolutionScale::Quarter), Resolution::new(800, 450));
        assert_eq!(resolution.scaled(ResolutionScale::Half), Resolution::new(1131, 636));
        assert_eq!(resolution.scaled(ResolutionScale::Sixteenth), Resolution::new(400, 225));
    }

    #[test]
    fn tiny_resolution_can_scale_to_empty() {
        let resolution = Resolution::new(3, 3);
        assert!(resolution.scaled(ResolutionScale::Sixteenth).is_empty());
        assert_eq!(resolution.pixel_count(), 9);
    }
}
