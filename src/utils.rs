use number_sprint::RoundConfig;

/// Count field parsing errors
#[derive(Debug, PartialEq)]
pub enum CountParseError {
    NotANumber(String),
    NotFinite(String),
}

impl std::fmt::Display for CountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountParseError::NotANumber(input) => write!(f, "\"{}\" is not a number", input),
            CountParseError::NotFinite(input) => {
                write!(f, "\"{}\" is not a finite number", input)
            }
        }
    }
}

impl std::error::Error for CountParseError {}

/// Parse the points field into a playable count.
///
/// Out-of-range values are clamped to `[MIN_POINT_COUNT, MAX_POINT_COUNT]` rather
/// than rejected, fractions truncate toward zero and a blank field reads as zero.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_point_count("25"), Ok(25));
/// assert_eq!(parse_point_count("0"), Ok(1));
/// assert_eq!(parse_point_count("2.7"), Ok(2));
/// assert_eq!(parse_point_count("4000"), Ok(1000));
/// ```
pub fn parse_point_count(input: &str) -> Result<u32, CountParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(RoundConfig::new(0).count());
    }

    let raw: f64 = trimmed
        .parse()
        .map_err(|_| CountParseError::NotANumber(trimmed.to_string()))?;
    if !raw.is_finite() {
        return Err(CountParseError::NotFinite(trimmed.to_string()));
    }

    // `as` saturates, so huge inputs still land on the upper clamp
    Ok(RoundConfig::new(raw.trunc() as i64).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_point_count("3"), Ok(3));
        assert_eq!(parse_point_count(" 42 "), Ok(42));
        assert_eq!(parse_point_count("1000"), Ok(1000));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(parse_point_count("0"), Ok(1));
        assert_eq!(parse_point_count("-7"), Ok(1));
        assert_eq!(parse_point_count("1001"), Ok(1000));
        assert_eq!(parse_point_count("1e12"), Ok(1000));
    }

    #[test]
    fn blank_reads_as_minimum() {
        assert_eq!(parse_point_count(""), Ok(1));
        assert_eq!(parse_point_count("   "), Ok(1));
    }

    #[test]
    fn fractions_truncate() {
        assert_eq!(parse_point_count("2.7"), Ok(2));
        assert_eq!(parse_point_count("0.5"), Ok(1));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_point_count("abc"),
            Err(CountParseError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            parse_point_count("NaN"),
            Err(CountParseError::NotFinite("NaN".to_string()))
        );
        assert_eq!(
            parse_point_count("inf"),
            Err(CountParseError::NotFinite("inf".to_string()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CountParseError::NotANumber("x".into()).to_string(),
            "\"x\" is not a number"
        );
        assert_eq!(
            CountParseError::NotFinite("inf".into()).to_string(),
            "\"inf\" is not a finite number"
        );
    }
}
