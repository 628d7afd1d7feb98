#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub type PackedColour = u32;

impl Colour {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs as RGBA8888 so that `to_le_bytes` yields `[r, g, b, 255]`.
    #[must_use]
    pub const fn to_packed(self) -> PackedColour {
        u32::from_le_bytes([self.r, self.g, self.b, u8::MAX])
    }

    #[must_use]
    pub const fn from_packed(packed: PackedColour) -> Self {
        let [r, g, b, _] = packed.to_le_bytes();
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_bytes_are_rgba_in_memory_order() {
        let colour = Colour::new(10, 20, 30);
        assert_eq!(colour.to_packed().to_le_bytes(), [10, 20, 30, 255]);
    }

    #[test]
    fn unpacking_recovers_channels() {
        let colour = Colour::new(255, 0, 128);
        assert_eq!(Colour::from_packed(colour.to_packed()), colour);
    }
}
