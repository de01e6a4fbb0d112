//! String converters for configurable properties.

use crate::grid::{parse_column_definitions, parse_row_definitions, ColumnDefinition, RowDefinition};

/// Typed value produced by a converter.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    Int(i32),
    Rows(Vec<RowDefinition>),
    Columns(Vec<ColumnDefinition>),
    /// Raw text of a property without a registered converter.
    Text(String),
}

impl ConfigValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Int(_) => "int",
            ConfigValue::Rows(_) => "row definitions",
            ConfigValue::Columns(_) => "column definitions",
            ConfigValue::Text(_) => "text",
        }
    }
}

/// Turns configuration text into a typed value, or explains why it cannot.
pub type Converter = fn(&str) -> Result<ConfigValue, String>;

pub fn convert_row_definitions(raw: &str) -> Result<ConfigValue, String> {
    parse_row_definitions(raw)
        .map(ConfigValue::Rows)
        .map_err(|err| err.to_string())
}

pub fn convert_column_definitions(raw: &str) -> Result<ConfigValue, String> {
    parse_column_definitions(raw)
        .map(ConfigValue::Columns)
        .map_err(|err| err.to_string())
}

/// Cell index; blank text means 0.
///
/// The whole trimmed text must be an integer. A numeric prefix is not enough,
/// so `3px` and `2.5` are errors rather than 3 and 2.
pub fn convert_grid_cell(raw: &str) -> Result<ConfigValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ConfigValue::Int(0));
    }
    trimmed
        .parse::<i32>()
        .map(ConfigValue::Int)
        .map_err(|_| format!("`{trimmed}` is not a cell index"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLength;

    #[test]
    fn blank_cell_is_zero() {
        assert_eq!(convert_grid_cell(""), Ok(ConfigValue::Int(0)));
        assert_eq!(convert_grid_cell("  "), Ok(ConfigValue::Int(0)));
        assert_eq!(convert_grid_cell(" 3 "), Ok(ConfigValue::Int(3)));
        assert_eq!(convert_grid_cell("-1"), Ok(ConfigValue::Int(-1)));
        assert!(convert_grid_cell("3px").is_err());
        assert!(convert_grid_cell("2.5").is_err());
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let err = convert_grid_cell("two").unwrap_err();
        assert!(err.contains("two"));
    }

    #[test]
    fn definitions_convert_to_tracks() {
        let value = convert_row_definitions("auto 2*").unwrap();
        assert_eq!(
            value,
            ConfigValue::Rows(vec![
                RowDefinition::new(GridLength::Auto),
                RowDefinition::new(GridLength::Star(2.0)),
            ])
        );
        assert_eq!(value.kind(), "row definitions");
        assert!(convert_column_definitions("auto ?").is_err());
    }
}
