use time::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub description: String,
    /// Minutes.
    pub duration: i64,
    pub date: Date,
}

/// Coerces a duration field to whole minutes.
///
/// Reads the leading integer and ignores whatever follows, so `"30.9"` is 30
/// and `"45min"` is 45. Leading whitespace and a sign are accepted.
///
/// # Errors
/// Returns a message if the input does not start with an integer.
pub fn coerce_duration(input: &str) -> Result<i64, String> {
    let trimmed = input.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..].bytes().take_while(u8::is_ascii_digit).count();

    if digits_len == 0 {
        return Err(format!("Invalid duration '{input}': expected a number of minutes"));
    }

    trimmed[..sign_len + digits_len]
        .parse()
        .map_err(|_| format!("Invalid duration '{input}': out of range"))
}

/// Inclusive date bounds for filtering an exercise log. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn contains(&self, target: Date) -> bool {
        match (self.from, self.to) {
            (None, None) => true,
            (Some(from), None) => target >= from,
            (None, Some(to)) => target <= to,
            (Some(from), Some(to)) => target >= from && target <= to,
        }
    }
}

/// Reads an optional result limit. Anything that is not a non-negative integer means "no limit".
#[must_use]
pub fn parse_limit(input: Option<&str>) -> Option<usize> {
    input.and_then(|raw| raw.trim().parse().ok())
}
