//! RGB color type and parsing for the notations a rendering surface reports.

/// Errors that can occur while parsing a color specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The color is fully transparent and has no usable contrast value.
    #[error("color '{0}' is transparent and has no contrast value")]
    Transparent(String),

    /// The color syntax is not one of the supported notations.
    #[error("unsupported color syntax: '{0}'")]
    UnsupportedSyntax(String),

    /// A channel inside an otherwise recognized notation failed to parse.
    #[error("invalid color component in '{0}'")]
    InvalidComponent(String),
}

/// An opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color specification.
    ///
    /// Accepts `rgb(r, g, b)` / `rgba(r, g, b, a)` functional notation and
    /// `#rrggbb` / `#rrggbbaa` hex notation. Alpha channels are parsed but
    /// discarded; contrast is defined over opaque colors. `transparent` and
    /// anything else (keywords, short hex) is rejected with a descriptive
    /// error.
    pub fn parse(spec: &str) -> Result<Self, ColorParseError> {
        let spec = spec.trim();

        if spec.eq_ignore_ascii_case("transparent") {
            return Err(ColorParseError::Transparent(spec.to_string()));
        }

        if let Some(hex) = spec.strip_prefix('#') {
            return Self::parse_hex(spec, hex);
        }

        let lower = spec.to_ascii_lowercase();
        if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
            return Self::parse_functional(spec);
        }

        Err(ColorParseError::UnsupportedSyntax(spec.to_string()))
    }

    fn parse_hex(original: &str, hex: &str) -> Result<Self, ColorParseError> {
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::UnsupportedSyntax(original.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::InvalidComponent(original.to_string()))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        // An 8-digit alpha suffix is validated but otherwise ignored.
        if hex.len() == 8 {
            channel(6..8)?;
        }

        Ok(Self { r, g, b })
    }

    fn parse_functional(original: &str) -> Result<Self, ColorParseError> {
        let open = original
            .find('(')
            .ok_or_else(|| ColorParseError::UnsupportedSyntax(original.to_string()))?;
        let close = original
            .rfind(')')
            .ok_or_else(|| ColorParseError::UnsupportedSyntax(original.to_string()))?;
        if close <= open {
            return Err(ColorParseError::UnsupportedSyntax(original.to_string()));
        }

        let inner = &original[open + 1..close];
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(ColorParseError::UnsupportedSyntax(original.to_string()));
        }

        let channel = |part: &str| -> Result<u8, ColorParseError> {
            // Surfaces report integer channels, but tolerate a float form.
            if let Ok(value) = part.parse::<u8>() {
                return Ok(value);
            }
            part.parse::<f64>()
                .ok()
                .filter(|v| (0.0..=255.0).contains(v))
                .map(|v| v.round() as u8)
                .ok_or_else(|| ColorParseError::InvalidComponent(original.to_string()))
        };

        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;

        if parts.len() == 4 {
            let alpha: f64 = parts[3]
                .parse()
                .map_err(|_| ColorParseError::InvalidComponent(original.to_string()))?;
            if alpha == 0.0 {
                return Err(ColorParseError::Transparent(original.to_string()));
            }
        }

        Ok(Self { r, g, b })
    }
}
