//! Built-in palettes offered as quick starting points.

use crate::color::HexColor;
use crate::editor::Palette;

/// Which preset collection to read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetKind {
    Popular,
    Monochrome,
}

const fn rgb(hex: u32) -> HexColor {
    HexColor::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub static POPULAR: [[HexColor; 5]; 5] = [
    [rgb(0xFF6F61), rgb(0x6B5B95), rgb(0x88B04B), rgb(0xF7CAC9), rgb(0x92A8D1)],
    [rgb(0x034F84), rgb(0xF7786B), rgb(0xDEEAEE), rgb(0xB1CBBB), rgb(0xF7CAC9)],
    [rgb(0x955251), rgb(0xB565A7), rgb(0x009B77), rgb(0xDD4124), rgb(0xD65076)],
    [rgb(0x45B8AC), rgb(0xEFC050), rgb(0x5B5EA6), rgb(0x9B2335), rgb(0xDFCFBE)],
    [rgb(0x6B5B95), rgb(0xFF6F61), rgb(0x88B04B), rgb(0xF7CAC9), rgb(0x955251)],
];

pub static MONOCHROME: [[HexColor; 5]; 5] = [
    [rgb(0x22223B), rgb(0x4A4E69), rgb(0x9A8C98), rgb(0xC9ADA7), rgb(0xF2E9E4)],
    [rgb(0x0D1B2A), rgb(0x1B263B), rgb(0x415A77), rgb(0x778DA9), rgb(0xE0E1DD)],
    [rgb(0x232526), rgb(0x414345), rgb(0x636363), rgb(0xA2A2A2), rgb(0xE0E0E0)],
    [rgb(0x2D3142), rgb(0x4F5D75), rgb(0xBFC0C0), rgb(0xFFFFFF), rgb(0xEF8354)],
    [rgb(0x22223B), rgb(0x3A3A5D), rgb(0x5C5C8A), rgb(0x7E7EB7), rgb(0xAFAFD4)],
];

pub fn presets(kind: PresetKind) -> &'static [[HexColor; 5]] {
    match kind {
        PresetKind::Popular => &POPULAR,
        PresetKind::Monochrome => &MONOCHROME,
    }
}

/// The preset at `index` as a fresh working palette.
pub fn preset(kind: PresetKind, index: usize) -> Option<Palette> {
    presets(kind)
        .get(index)
        .and_then(|colors| Palette::from_colors(colors.to_vec()).ok())
}
