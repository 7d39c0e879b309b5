/// Linear RGB triple with components in [0, 1].
pub type Rgb = [f32; 3];

const fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Security colours indexed by `round(security * 10)`.
/// Slots 0 and 1 share the lowest colour; non-positive security never indexes
/// this table.
pub const SECURITY_COLOURS: [Rgb; 11] = [
    rgb8(112, 33, 30),
    rgb8(112, 33, 30),
    rgb8(188, 18, 18),
    rgb8(202, 72, 18),
    rgb8(220, 108, 9),
    rgb8(240, 255, 133),
    rgb8(115, 227, 82),
    rgb8(93, 220, 166),
    rgb8(72, 208, 242),
    rgb8(58, 156, 241),
    rgb8(46, 116, 222),
];

/// Wormhole class colours, C1 through C6.
pub const CLASS_COLOURS: [Rgb; 6] = [
    rgb8(82, 82, 255),
    rgb8(0, 168, 168),
    rgb8(0, 168, 0),
    rgb8(168, 168, 0),
    rgb8(168, 84, 0),
    rgb8(168, 0, 0),
];

/// Colour for systems at or below 0.0 security, or with no security value.
pub const NULL_SECURITY_COLOUR: Rgb = rgb8(142, 49, 99);
