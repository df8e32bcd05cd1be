//! Error type returned by [`crate::parse`].

use core::fmt;

/// Error returned by [`crate::parse`] when an input string cannot be
/// interpreted under a given format.
///
/// `format` never fails: unrecognized specifiers are copied through
/// verbatim, so there is no corresponding `FormatError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A literal format byte did not match the input, a required digit run
    /// was absent, or an offset/subsecond specifier had an unrecognized
    /// shape.
    FailedToParse,
    /// The input had bytes left over (other than trailing whitespace) after
    /// the whole format string was consumed.
    TrailingInput,
    /// A field decoded to a value outside the range the specifier
    /// documents, or day/month normalization rejected the civil time (e.g.
    /// `"2023-09-31"`), or the shifted civil time overflowed the
    /// representable range.
    OutOfRangeField,
    /// The two-digit year widened by `+1900` (when no four-digit year
    /// specifier was present) overflowed `i64`.
    OutOfRangeYear,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Error::FailedToParse => "Failed to parse input",
            Error::TrailingInput => "Illegal trailing data in input string",
            Error::OutOfRangeField => "Out-of-range field",
            Error::OutOfRangeYear => "Out-of-range year",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use alloc::string::ToString;

    use super::Error;

    #[test]
    fn test_display_is_non_empty() {
        assert!(!Error::FailedToParse.to_string().is_empty());
        assert!(!Error::TrailingInput.to_string().is_empty());
        assert!(!Error::OutOfRangeField.to_string().is_empty());
        assert!(!Error::OutOfRangeYear.to_string().is_empty());
    }

    #[test]
    fn test_messages_match_spec() {
        assert_eq!(Error::FailedToParse.to_string(), "Failed to parse input");
        assert_eq!(
            Error::TrailingInput.to_string(),
            "Illegal trailing data in input string"
        );
        assert_eq!(Error::OutOfRangeField.to_string(), "Out-of-range field");
        assert_eq!(Error::OutOfRangeYear.to_string(), "Out-of-range year");
    }
}
