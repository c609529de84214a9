//! Simple TOML parser for commit configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Thermoseal configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - Decimal and `0x` hexadecimal integers, with `_` separators
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Keys missing from the input keep their defaults. Unknown sections and
//! keys are errors, so a typo cannot silently fall back to a default.

use super::types::CommitConfig;

/// Parse error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Section header is malformed or names an unknown section
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key is not known in the current section
    UnknownKey,
    /// Value has the wrong type
    InvalidValue,
    /// Integer does not fit the field's storage type
    OutOfRange,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Calibration,
    Region,
    Writer,
    Trigger,
    Greeting,
}

/// Parse TOML configuration into CommitConfig
pub fn parse_config(input: &str) -> Result<CommitConfig, ParseError> {
    let mut config = CommitConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(fail(ParseErrorKind::InvalidSection));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(fail(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(fail(ParseErrorKind::InvalidLine))?;
        apply_value(section, key, value, &mut config).map_err(fail)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "calibration" => Some(Section::Calibration),
        "region" => Some(Section::Region),
        "writer" => Some(Section::Writer),
        "trigger" => Some(Section::Trigger),
        "greeting" => Some(Section::Greeting),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut CommitConfig,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Calibration, "offset") => config.calibration.offset = parse_int(value)?,
        (Section::Calibration, "mode") => config.calibration.mode = parse_int(value)?,
        (Section::Calibration, "status") => config.calibration.status = parse_int(value)?,
        (Section::Calibration, "setpoint") => config.calibration.setpoint = parse_int(value)?,

        (Section::Region, "address") => config.region.address = parse_int(value)?,

        (Section::Writer, "ready_poll_limit") => {
            config.writer.ready_poll_limit = parse_int(value)?
        }

        (Section::Trigger, "active_low") => config.trigger.active_low = parse_bool(value)?,
        (Section::Trigger, "poll_interval_ms") => {
            config.trigger.poll_interval_ms = parse_int(value)?
        }

        (Section::Greeting, "blinks") => config.greeting.blinks = parse_int(value)?,
        (Section::Greeting, "period_ms") => config.greeting.period_ms = parse_int(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Parse a decimal or `0x` hex integer and narrow it to `T`
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseErrorKind> {
    let mut digits = [0u8; 24];
    let mut len = 0;

    let (body, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    // Drop `_` separators; a fixed buffer is plenty for a u64
    for byte in body.bytes().filter(|&b| b != b'_') {
        if len == digits.len() {
            return Err(ParseErrorKind::OutOfRange);
        }
        digits[len] = byte;
        len += 1;
    }

    let text = core::str::from_utf8(&digits[..len]).map_err(|_| ParseErrorKind::InvalidValue)?;
    if text.is_empty() || text.starts_with('+') || text.starts_with('-') {
        return Err(ParseErrorKind::InvalidValue);
    }

    let wide = u64::from_str_radix(text, radix).map_err(|e| match e.kind() {
        core::num::IntErrorKind::PosOverflow => ParseErrorKind::OutOfRange,
        _ => ParseErrorKind::InvalidValue,
    })?;
    T::try_from(wide).map_err(|_| ParseErrorKind::OutOfRange)
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
# Factory calibration
[calibration]
offset = 0x0A      # 10
mode = 1
status = 0
setpoint = 750

[region]
address = 0x1000_1084

[writer]
ready_poll_limit = 1_000_000

[trigger]
active_low = false
poll_interval_ms = 5

[greeting]
blinks = 3
period_ms = 100
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();

        assert_eq!(config.calibration.offset, 0x0A);
        assert_eq!(config.calibration.mode, 1);
        assert_eq!(config.calibration.status, 0);
        assert_eq!(config.calibration.setpoint, 0x2EE);
        assert_eq!(config.region.address, 0x1000_1084);
        assert_eq!(config.writer.ready_poll_limit, 1_000_000);
        assert!(!config.trigger.active_low);
        assert_eq!(config.trigger.poll_interval_ms, 5);
        assert_eq!(config.greeting.blinks, 3);
        assert_eq!(config.greeting.period_ms, 100);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), CommitConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            CommitConfig::default()
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[calibration]\nsetpoint = 0x300\n").unwrap();

        assert_eq!(config.calibration.setpoint, 0x300);
        assert_eq!(config.calibration.offset, 0x0A);
        assert_eq!(config.region.address, 0x1000_1080);
    }

    #[test]
    fn test_wide_field_parses_but_fails_record() {
        // mode fits a u8, so width is left to the encoder
        let config = parse_config("[calibration]\nmode = 5\n").unwrap();
        assert_eq!(config.calibration.mode, 5);
        assert!(config.calibration.record().is_err());
    }

    #[test]
    fn test_storage_overflow() {
        let err = parse_config("[calibration]\noffset = 256\n").unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 2,
                kind: ParseErrorKind::OutOfRange
            }
        );
    }

    #[test]
    fn test_unknown_section() {
        let err = parse_config("[heater]\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSection);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[calibration]\nofset = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_config("offset = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            "[calibration]\noffset = ten\n",
            "[calibration]\noffset = -1\n",
            "[calibration]\noffset = 0x\n",
            "[trigger]\nactive_low = yes\n",
        ];
        for input in cases {
            assert_eq!(
                parse_config(input).unwrap_err().kind,
                ParseErrorKind::InvalidValue,
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_config("[calibration\n").unwrap_err().kind,
            ParseErrorKind::InvalidSection
        );
        assert_eq!(
            parse_config("[calibration]\noffset\n").unwrap_err().kind,
            ParseErrorKind::InvalidLine
        );
        assert_eq!(
            parse_config("[calibration]\noffset =\n").unwrap_err().kind,
            ParseErrorKind::InvalidLine
        );
    }
}
