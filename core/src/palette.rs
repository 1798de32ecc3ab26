use serde::{Deserialize, Serialize};

use crate::Coord3;

/// 24-bit `0xRRGGBB` colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Components in `0.0..=1.0`, the way GPU instance buffers want them.
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.red()) / 255.0,
            f32::from(self.green()) / 255.0,
            f32::from(self.blue()) / 255.0,
        ]
    }
}

pub const LIGHT_BLOCK: Rgb = Rgb(0xBDBDBD);
pub const DARK_BLOCK: Rgb = Rgb(0x7B7B7B);
pub const FLAG: Rgb = Rgb(0xFFFF00);
pub const DETONATED: Rgb = Rgb(0xFF0000);
pub const HOVER_HIDDEN: Rgb = Rgb(0xA1A1A1);
pub const HOVER_FLAGGED: Rgb = Rgb(0x9E9E02);

pub const NUMBER_COLORS: [Rgb; 7] = [
    Rgb(0x0000FF),
    Rgb(0x00FF00),
    Rgb(0xFF0000),
    Rgb(0x08064F),
    Rgb(0x4F3206),
    Rgb(0x148CCC),
    Rgb(0x555859),
];

/// Checkerboard colour of an untouched block.
pub const fn base_color((x, y, z): Coord3) -> Rgb {
    let xz_parity_matches = (x % 2 == z % 2) as u8;
    if xz_parity_matches == y % 2 {
        LIGHT_BLOCK
    } else {
        DARK_BLOCK
    }
}

/// Colour for a revealed count, anything past the palette uses its last entry.
pub const fn number_color(count: u8) -> Option<Rgb> {
    match count {
        0 => None,
        n if (n as usize) <= NUMBER_COLORS.len() => Some(NUMBER_COLORS[n as usize - 1]),
        _ => Some(NUMBER_COLORS[NUMBER_COLORS.len() - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_past_palette_clamp_to_last_color() {
        assert_eq!(number_color(0), None);
        assert_eq!(number_color(1), Some(Rgb(0x0000FF)));
        assert_eq!(number_color(7), Some(Rgb(0x555859)));
        assert_eq!(number_color(8), Some(Rgb(0x555859)));
        assert_eq!(number_color(26), Some(Rgb(0x555859)));
    }

    #[test]
    fn checkerboard_alternates_along_each_axis() {
        assert_eq!(base_color((0, 1, 0)), LIGHT_BLOCK);
        assert_eq!(base_color((0, 0, 0)), DARK_BLOCK);
        assert_eq!(base_color((1, 0, 0)), LIGHT_BLOCK);
        assert_eq!(base_color((0, 0, 1)), LIGHT_BLOCK);
        assert_eq!(base_color((1, 1, 1)), LIGHT_BLOCK);
    }

    #[test]
    fn components_split_channels() {
        let color = Rgb(0x148CCC);
        assert_eq!((color.red(), color.green(), color.blue()), (0x14, 0x8C, 0xCC));
        assert_eq!(Rgb(0xFF0000).to_f32(), [1.0, 0.0, 0.0]);
    }
}
