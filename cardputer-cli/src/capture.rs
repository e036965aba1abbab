use anyhow::{bail, Context, Result};

use cardputer_keyboard::MAX_EVENTS_PER_POLL;

/// One recorded poll: the GO button level and the raw event bytes the
/// controller handed over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedPoll {
    pub go: bool,
    pub events: Vec<u8>,
}

/// Parse an event capture into polls.
///
/// Format, one poll per line:
/// - whitespace- or comma-separated hex bytes (`8D`, `0x8d`)
/// - `GO` anywhere on the line: the GO button was held during the poll
/// - `-` alone: a poll with no events
/// - `#` starts a comment; blank lines are skipped
pub fn parse_capture(input: &str) -> Result<Vec<CapturedPoll>> {
    let mut polls = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((content, _)) => content,
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let mut poll = CapturedPoll::default();
        if line != "-" {
            for token in line.split(|c: char| c.is_whitespace() || c == ',') {
                if token.is_empty() {
                    continue;
                }
                if token.eq_ignore_ascii_case("go") {
                    poll.go = true;
                    continue;
                }
                let byte = parse_byte(token)
                    .with_context(|| format!("line {}: invalid event byte", line_num + 1))?;
                poll.events.push(byte);
            }
        }

        if poll.events.len() > MAX_EVENTS_PER_POLL {
            bail!(
                "line {}: {} events in one poll, at most {} fit",
                line_num + 1,
                poll.events.len(),
                MAX_EVENTS_PER_POLL
            );
        }
        polls.push(poll);
    }

    Ok(polls)
}

/// Parse a single hex byte, with or without `0x`.
pub fn parse_byte(token: &str) -> Result<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 2 {
        bail!("expected one hex byte, got {:?}", token);
    }
    u8::from_str_radix(digits, 16).with_context(|| format!("invalid hex {:?}", token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polls() {
        let capture = "# shift then a\n\
                       87 8D\n\
                       \n\
                       GO 0x07, 0x0d\n\
                       -\n";
        let polls = parse_capture(capture).unwrap();
        assert_eq!(polls.len(), 3);
        assert_eq!(
            polls[0],
            CapturedPoll {
                go: false,
                events: vec![0x87, 0x8D]
            }
        );
        assert!(polls[1].go);
        assert_eq!(polls[1].events, vec![0x07, 0x0D]);
        assert_eq!(polls[2], CapturedPoll::default());
    }

    #[test]
    fn test_go_only_line() {
        let polls = parse_capture("go  # button held\n").unwrap();
        assert_eq!(
            polls,
            vec![CapturedPoll {
                go: true,
                events: vec![]
            }]
        );
    }

    #[test]
    fn test_invalid_byte_reports_line() {
        let err = parse_capture("85\n8G\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_too_many_events() {
        let line = vec!["85"; MAX_EVENTS_PER_POLL + 1].join(" ");
        assert!(parse_capture(&line).is_err());
    }

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("8d").unwrap(), 0x8D);
        assert_eq!(parse_byte("0x85").unwrap(), 0x85);
        assert_eq!(parse_byte("7").unwrap(), 0x07);
        assert!(parse_byte("0x").is_err());
        assert!(parse_byte("123").is_err());
        assert!(parse_byte("zz").is_err());
    }
}
