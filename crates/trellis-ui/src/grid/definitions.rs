use std::fmt;
use std::str::FromStr;

/// Requested size of a grid track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridLength {
    /// Sized to content.
    Auto,
    /// Fixed size in pixels.
    Pixel(f32),
    /// Weighted share of the space left after auto and pixel tracks.
    Star(f32),
}

impl Default for GridLength {
    fn default() -> Self {
        GridLength::Star(1.0)
    }
}

impl fmt::Display for GridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridLength::Auto => f.write_str("auto"),
            GridLength::Pixel(value) => write!(f, "{value}"),
            GridLength::Star(weight) if *weight == 1.0 => f.write_str("*"),
            GridLength::Star(weight) => write!(f, "{weight}*"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGridLengthError {
    token: String,
}

impl ParseGridLengthError {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseGridLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a grid length", self.token)
    }
}

impl std::error::Error for ParseGridLengthError {}

impl FromStr for GridLength {
    type Err = ParseGridLengthError;

    /// Accepts `auto`, `*`, `<weight>*` and `<pixels>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let error = || ParseGridLengthError {
            token: token.to_string(),
        };
        if token.eq_ignore_ascii_case("auto") {
            return Ok(GridLength::Auto);
        }
        if let Some(weight) = token.strip_suffix('*') {
            if weight.is_empty() {
                return Ok(GridLength::Star(1.0));
            }
            return match weight.parse::<f32>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(GridLength::Star(value)),
                _ => Err(error()),
            };
        }
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(GridLength::Pixel(value)),
            _ => Err(error()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowDefinition {
    pub height: GridLength,
    pub min_height: f32,
    pub max_height: f32,
}

impl RowDefinition {
    pub fn new(height: GridLength) -> Self {
        Self {
            height,
            min_height: 0.0,
            max_height: f32::INFINITY,
        }
    }

    pub fn with_bounds(mut self, min_height: f32, max_height: f32) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }
}

impl Default for RowDefinition {
    fn default() -> Self {
        Self::new(GridLength::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnDefinition {
    pub width: GridLength,
    pub min_width: f32,
    pub max_width: f32,
}

impl ColumnDefinition {
    pub fn new(width: GridLength) -> Self {
        Self {
            width,
            min_width: 0.0,
            max_width: f32::INFINITY,
        }
    }

    pub fn with_bounds(mut self, min_width: f32, max_width: f32) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }
}

impl Default for ColumnDefinition {
    fn default() -> Self {
        Self::new(GridLength::default())
    }
}

/// Parses a whitespace separated list of lengths, e.g. `"auto * 2* 100"`.
pub fn parse_lengths(source: &str) -> Result<Vec<GridLength>, ParseGridLengthError> {
    source.split_whitespace().map(str::parse).collect()
}

pub fn parse_row_definitions(source: &str) -> Result<Vec<RowDefinition>, ParseGridLengthError> {
    Ok(parse_lengths(source)?
        .into_iter()
        .map(RowDefinition::new)
        .collect())
}

pub fn parse_column_definitions(
    source: &str,
) -> Result<Vec<ColumnDefinition>, ParseGridLengthError> {
    Ok(parse_lengths(source)?
        .into_iter()
        .map(ColumnDefinition::new)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_length_form() {
        let lengths = parse_lengths("auto * 2* 100 AUTO 0.5*").unwrap();
        assert_eq!(
            lengths,
            vec![
                GridLength::Auto,
                GridLength::Star(1.0),
                GridLength::Star(2.0),
                GridLength::Pixel(100.0),
                GridLength::Auto,
                GridLength::Star(0.5),
            ]
        );
    }

    #[test]
    fn empty_source_is_no_tracks() {
        assert!(parse_row_definitions("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage_tokens() {
        let err = parse_column_definitions("auto wide").unwrap_err();
        assert_eq!(err.token(), "wide");
        assert!("-4".parse::<GridLength>().is_err());
        assert!("x*".parse::<GridLength>().is_err());
    }

    #[test]
    fn display_uses_source_syntax() {
        assert_eq!(GridLength::Star(1.0).to_string(), "*");
        assert_eq!(GridLength::Star(3.0).to_string(), "3*");
        assert_eq!(GridLength::Pixel(40.0).to_string(), "40");
        assert_eq!(GridLength::Auto.to_string(), "auto");
    }

    #[test]
    fn definitions_default_to_unbounded_star() {
        let row = RowDefinition::default();
        assert_eq!(row.height, GridLength::Star(1.0));
        assert_eq!(row.min_height, 0.0);
        assert!(row.max_height.is_infinite());
        let column = ColumnDefinition::new(GridLength::Pixel(10.0)).with_bounds(5.0, 20.0);
        assert_eq!((column.min_width, column.max_width), (5.0, 20.0));
    }
}
