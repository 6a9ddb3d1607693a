//! Color token values.

use super::{Modifier, ModifyContext, TokenValue, ValueInput};
use crate::syntax::{Node, NodeKind};
use crate::utils::format_number;

/// RGBA color with every channel in the `0..=1` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

/// A decomposed color in the space it was written in.
///
/// A missing alpha means the source did not specify one (fully opaque).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// sRGB with channels in `0..=1`.
    Rgb {
        r: f64,
        g: f64,
        b: f64,
        alpha: Option<f64>,
    },
    /// HSL with hue in degrees, saturation and lightness in `0..=1`.
    Hsl {
        h: f64,
        s: f64,
        l: f64,
        alpha: Option<f64>,
    },
}

impl Color {
    /// Create an opaque RGB color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            alpha: None,
        }
    }

    /// Parse a hex color with or without the leading `#` (3, 4, 6 or 8 digits).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let digits: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<_>>()?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect::<Option<_>>()?,
            _ => return None,
        };

        let channel = |i: usize| f64::from(digits[i]) / 255.0;
        Some(Self::Rgb {
            r: channel(0),
            g: channel(1),
            b: channel(2),
            alpha: (digits.len() == 4).then(|| channel(3)),
        })
    }

    /// Look up a CSS named color (case-insensitive). Includes `transparent`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "transparent" {
            return Some(Self::Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                alpha: Some(0.0),
            });
        }

        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, rgb)| {
                Self::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
            })
    }

    /// Parse `rgb()`, `rgba()`, `hsl()` or `hsla()` from its argument nodes.
    ///
    /// Accepts both the legacy comma syntax and the space syntax with `/ alpha`.
    pub fn from_function(name: &str, args: &[Node]) -> Option<Self> {
        let mut channels = vec![];
        let mut alpha = None;
        let mut after_slash = false;

        for arg in args {
            match &arg.kind {
                NodeKind::Operator(op) if op == "," => {}
                NodeKind::Operator(op) if op == "/" => after_slash = true,
                NodeKind::Number(_) | NodeKind::Percentage(_) | NodeKind::Dimension { .. } => {
                    if after_slash {
                        alpha = Some(alpha_component(arg)?);
                    } else {
                        channels.push(arg);
                    }
                }
                _ => return None,
            }
        }

        if channels.len() == 4 && alpha.is_none() {
            alpha = channels.pop().and_then(alpha_component);
        }
        if channels.len() != 3 {
            return None;
        }

        match name.to_ascii_lowercase().as_str() {
            "rgb" | "rgba" => Some(Self::Rgb {
                r: rgb_component(channels[0])?,
                g: rgb_component(channels[1])?,
                b: rgb_component(channels[2])?,
                alpha,
            }),
            "hsl" | "hsla" => Some(Self::Hsl {
                h: hue_component(channels[0])?,
                s: fraction_component(channels[1])?,
                l: fraction_component(channels[2])?,
                alpha,
            }),
            _ => None,
        }
    }

    /// The alpha channel, if one was specified.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            Self::Rgb { alpha, .. } | Self::Hsl { alpha, .. } => *alpha,
        }
    }

    /// Copy of this color with a different alpha.
    pub fn with_alpha(self, value: f64) -> Self {
        let value = Some(value.clamp(0.0, 1.0));
        match self {
            Self::Rgb { r, g, b, .. } => Self::Rgb { r, g, b, alpha: value },
            Self::Hsl { h, s, l, .. } => Self::Hsl { h, s, l, alpha: value },
        }
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.alpha().is_none_or(|a| a >= 1.0)
    }

    /// Convert to clamped sRGB.
    pub fn to_rgba(&self) -> RgbaColor {
        let (r, g, b) = match *self {
            Self::Rgb { r, g, b, .. } => (r, g, b),
            Self::Hsl { h, s, l, .. } => hsl_to_rgb(h, s, l),
        };
        RgbaColor {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            alpha: self.alpha().unwrap_or(1.0).clamp(0.0, 1.0),
        }
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        let rgba = self.to_rgba();
        let hex = format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(rgba.r),
            to_byte(rgba.g),
            to_byte(rgba.b)
        );
        if self.is_opaque() {
            hex
        } else {
            format!("{hex}{:02x}", to_byte(rgba.alpha))
        }
    }

    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_rgb_css(&self) -> String {
        let rgba = self.to_rgba();
        let (r, g, b) = (to_byte(rgba.r), to_byte(rgba.g), to_byte(rgba.b));
        if self.is_opaque() {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", format_number(round(rgba.alpha, 3)))
        }
    }

    /// Serialize using the syntax of the color's own space.
    pub fn to_css(&self) -> String {
        match *self {
            Self::Rgb { .. } => self.to_rgb_css(),
            Self::Hsl { h, s, l, alpha } => {
                let body = format!(
                    "{} {}% {}%",
                    format_number(round(h, 2)),
                    format_number(round(s * 100.0, 2)),
                    format_number(round(l * 100.0, 2))
                );
                match alpha {
                    Some(a) if a < 1.0 => format!("hsl({body} / {})", format_number(round(a, 3))),
                    _ => format!("hsl({body})"),
                }
            }
        }
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn rgb_component(node: &Node) -> Option<f64> {
    match node.kind {
        NodeKind::Number(n) => Some(n / 255.0),
        NodeKind::Percentage(p) => Some(p / 100.0),
        _ => None,
    }
}

fn fraction_component(node: &Node) -> Option<f64> {
    match node.kind {
        NodeKind::Number(n) | NodeKind::Percentage(n) => Some(n / 100.0),
        _ => None,
    }
}

fn alpha_component(node: &Node) -> Option<f64> {
    match node.kind {
        NodeKind::Number(n) => Some(n.clamp(0.0, 1.0)),
        NodeKind::Percentage(p) => Some((p / 100.0).clamp(0.0, 1.0)),
        _ => None,
    }
}

fn hue_component(node: &Node) -> Option<f64> {
    match &node.kind {
        NodeKind::Number(n) => Some(*n),
        NodeKind::Dimension { value, unit } => match unit.to_ascii_lowercase().as_str() {
            "deg" => Some(*value),
            "rad" => Some(value.to_degrees()),
            "grad" => Some(value * 0.9),
            "turn" => Some(value * 360.0),
            _ => None,
        },
        _ => None,
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// A color token value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorValue {
    raw: String,
    hex: bool,
    color: Color,
}

impl ColorValue {
    /// Create a color value.
    pub fn new(raw: impl Into<String>, hex: bool, color: Color) -> Self {
        Self {
            raw: raw.into(),
            hex,
            color,
        }
    }

    /// Source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the source was a hex literal.
    pub fn is_hex(&self) -> bool {
        self.hex
    }

    /// The decomposed color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Apply a modifier. Only alpha overrides apply to colors.
    pub fn apply(&self, modifier: &Modifier, _ctx: &ModifyContext) -> Option<String> {
        match modifier {
            Modifier::Alpha { value } => {
                let modified = Self::new(self.raw.clone(), self.hex, self.color.with_alpha(*value));
                Some(modified.to_css())
            }
            _ => None,
        }
    }

    /// Serialize following the source format: hex stays hex, rgb-family
    /// becomes `rgb()`/`rgba()`, everything else uses its own space syntax.
    pub fn to_css(&self) -> String {
        if self.hex {
            return self.color.to_hex();
        }
        self.color.to_css()
    }

    /// Clamped sRGB channels, for color swatches.
    pub fn to_rgba(&self) -> RgbaColor {
        self.color.to_rgba()
    }
}

/// Color parser of the value chain: hex literals, color functions, named colors.
pub(crate) fn parse(input: &ValueInput<'_>) -> Option<TokenValue> {
    let value = match &input.node.kind {
        NodeKind::Hash(hex) => ColorValue::new(format!("#{hex}"), true, Color::from_hex(hex)?),
        NodeKind::Function { name, children } => {
            ColorValue::new(input.input, false, Color::from_function(name, children)?)
        }
        NodeKind::Ident(name) => ColorValue::new(name.as_str(), false, Color::from_name(name)?),
        _ => return None,
    };
    Some(TokenValue::Color(value))
}

/// CSS named colors as `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CssSyntax, SyntaxProvider};
    use crate::values::Unit;

    fn parse_color(input: &str) -> Option<ColorValue> {
        let nodes = CssSyntax::new().parse_value(input);
        let node = nodes.first()?;
        match parse(&ValueInput { input, node }) {
            Some(TokenValue::Color(value)) => Some(value),
            _ => None,
        }
    }

    #[test]
    fn hex_colors() {
        let value = parse_color("#ff0000").unwrap();
        assert!(value.is_hex());
        assert_eq!(value.raw(), "#ff0000");
        assert_eq!(value.to_css(), "#ff0000");

        let short = parse_color("#f00").unwrap();
        assert_eq!(short.to_css(), "#ff0000");
    }

    #[test]
    fn hex_with_alpha() {
        let value = parse_color("#ff000080").unwrap();
        assert_eq!(value.to_css(), "#ff000080");
        assert!(!value.color().is_opaque());
    }

    #[test]
    fn rgb_functions() {
        let value = parse_color("rgb(255, 0, 0)").unwrap();
        assert!(!value.is_hex());
        assert_eq!(value.raw(), "rgb(255, 0, 0)");
        assert_eq!(value.to_css(), "rgb(255, 0, 0)");

        let spaced = parse_color("rgb(255 0 0 / 50%)").unwrap();
        assert_eq!(spaced.color().alpha(), Some(0.5));

        let legacy = parse_color("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(legacy.to_rgba().alpha, 0.5);
    }

    #[test]
    fn hsl_functions() {
        let value = parse_color("hsl(0, 100%, 50%)").unwrap();
        let rgba = value.to_rgba();
        assert!((rgba.r - 1.0).abs() < 1e-9);
        assert!(rgba.g.abs() < 1e-9);
        assert_eq!(value.to_css(), "hsl(0 100% 50%)");
    }

    #[test]
    fn named_colors() {
        let value = parse_color("red").unwrap();
        assert_eq!(value.raw(), "red");
        assert_eq!(value.color().to_hex(), "#ff0000");
        assert!(parse_color("rebeccapurple").is_some());
        assert!(parse_color("transparent").is_some());
    }

    #[test]
    fn non_colors_decline() {
        assert!(parse_color("auto").is_none());
        assert!(parse_color("16px").is_none());
        assert!(parse_color("calc(1px + 2px)").is_none());
        assert!(parse_color("#zzz").is_none());
    }

    #[test]
    fn alpha_on_hex_gives_hex8() {
        let value = parse_color("#ff0000").unwrap();
        let ctx = ModifyContext::default();
        assert_eq!(
            value.apply(&Modifier::alpha(0.5), &ctx).as_deref(),
            Some("#ff000080")
        );
    }

    #[test]
    fn alpha_on_rgb_gives_rgba() {
        let value = parse_color("rgb(255, 0, 0)").unwrap();
        let ctx = ModifyContext::default();
        assert_eq!(
            value.apply(&Modifier::alpha(0.5), &ctx).as_deref(),
            Some("rgba(255, 0, 0, 0.5)")
        );
    }

    #[test]
    fn alpha_on_hsl_keeps_space() {
        let value = parse_color("hsl(120, 50%, 50%)").unwrap();
        let ctx = ModifyContext::default();
        assert_eq!(
            value.apply(&Modifier::alpha(0.25), &ctx).as_deref(),
            Some("hsl(120 50% 50% / 0.25)")
        );
    }

    #[test]
    fn unit_modifier_does_not_apply() {
        let value = parse_color("#ff0000").unwrap();
        let ctx = ModifyContext::default();
        assert!(value.apply(&Modifier::unit(Unit::Px), &ctx).is_none());
        assert!(value.apply(&Modifier::Negate, &ctx).is_none());
    }
}
