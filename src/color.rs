use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color value")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid rgb() color: {0}")]
    InvalidRgb(String),
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// An opaque fill color for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Picks each channel independently and uniformly over `0..=255`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..=u8::MAX),
            g: rng.gen_range(0..=u8::MAX),
            b: rng.gen_range(0..=u8::MAX),
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Mixes `amount` (0.0..=1.0) of `other` into this color.
    pub fn blend(self, other: Rgb, amount: f32) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    fn from_name(name: &str) -> Option<Self> {
        let [r, g, b] = match name {
            "red" => [255, 0, 0],
            "blue" => [0, 0, 255],
            "green" => [0, 128, 0],
            "yellow" => [255, 255, 0],
            "orange" => [255, 165, 0],
            "purple" => [128, 0, 128],
            "pink" => [255, 192, 203],
            "cyan" => [0, 255, 255],
            "magenta" => [255, 0, 255],
            "white" => [255, 255, 255],
            "black" => [0, 0, 0],
            "gray" | "grey" => [128, 128, 128],
            "brown" => [165, 42, 42],
            "lime" => [0, 255, 0],
            _ => return None,
        };
        Some(Rgb::new(r, g, b))
    }

    fn from_hex(digits: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(format!("#{}", digits));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&expanded)
            }
            6 => Ok(Rgb::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    fn from_rgb_function(body: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidRgb(format!("rgb({})", body));
        let channels = body
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match channels.as_slice() {
            [r, g, b] if channels.iter().all(|c| c.is_finite()) => {
                let clamp = |v: f64| v.clamp(0.0, 255.0).round() as u8;
                Ok(Rgb::new(clamp(*r), clamp(*g), clamp(*b)))
            }
            _ => Err(invalid()),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a basic color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        if value.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(digits) = value.strip_prefix('#') {
            return Self::from_hex(digits);
        }

        if let Some(body) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_rgb_function(body);
        }

        Self::from_name(&value).ok_or(ColorParseError::UnknownName(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_picker_formats() {
        assert_eq!("#ff8000".parse::<Rgb>(), Ok(Rgb::new(255, 128, 0)));
        assert_eq!("#F80".parse::<Rgb>(), Ok(Rgb::new(255, 136, 0)));
        assert_eq!(" rgb(10, 20.4, 300) ".parse::<Rgb>(), Ok(Rgb::new(10, 20, 255)));
        assert_eq!("Purple".parse::<Rgb>(), Ok(Rgb::new(128, 0, 128)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!("".parse::<Rgb>(), Err(ColorParseError::Empty));
        assert!(matches!("#12345".parse::<Rgb>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("#gg0000".parse::<Rgb>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("rgb(1,2)".parse::<Rgb>(), Err(ColorParseError::InvalidRgb(_))));
        assert!(matches!("chartreuse-ish".parse::<Rgb>(), Err(ColorParseError::UnknownName(_))));
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Rgb::new(0, 171, 255).to_string(), "#00abff");
        assert_eq!(Rgb::default().to_string(), "#000000");
    }

    #[test]
    fn random_colors_vary() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors: Vec<Rgb> = (0..32).map(|_| Rgb::random(&mut rng)).collect();
        assert!(colors.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));
    }
}
