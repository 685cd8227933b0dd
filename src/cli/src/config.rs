use std::{fs, path::Path};

use color_eyre::eyre::WrapErr;
use rubiks_core::RecordFormat;

/// Marker flags given on the command line, each overriding the format file.
#[derive(Debug, Default)]
pub struct MarkerOverrides {
    pub prompt_marker: Option<String>,
    pub response_marker: Option<String>,
    pub end_marker: Option<String>,
}

/// Parse a TOML record format. Missing fields take their defaults.
pub fn parse_format(text: &str) -> Result<RecordFormat, toml::de::Error> {
    toml::from_str(text)
}

pub fn load_format(
    path: Option<&Path>,
    overrides: MarkerOverrides,
) -> color_eyre::Result<RecordFormat> {
    let mut format = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read format file {}", path.display()))?;
            parse_format(&text)
                .wrap_err_with(|| format!("Failed to parse format file {}", path.display()))?
        }
        None => RecordFormat::default(),
    };

    if let Some(marker) = overrides.prompt_marker {
        format.prompt_marker = marker;
    }
    if let Some(marker) = overrides.response_marker {
        format.response_marker = marker;
    }
    if let Some(marker) = overrides.end_marker {
        format.end_marker = marker;
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let format = parse_format(r#"response_marker = "[SOLUTION]""#).unwrap();
        assert_eq!(format.response_marker, "[SOLUTION]");
        assert_eq!(format.prompt_marker, RecordFormat::default().prompt_marker);
        assert_eq!(format.end_marker, RecordFormat::default().end_marker);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_format("").unwrap(), RecordFormat::default());
    }

    #[test]
    fn flags_override_defaults() {
        let format = load_format(
            None,
            MarkerOverrides {
                end_marker: Some("</s>".to_owned()),
                ..MarkerOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(format.end_marker, "</s>");
        assert_eq!(format.response_marker, "[RESPONSE]");
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(parse_format("prompt_marker = 3").is_err());
    }
}
