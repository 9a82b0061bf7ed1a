//! Error types for the sounding-bulletin crate.
//!
//! The aggregation layer never returns these to a caller, a failed unit simply contributes
//! nothing. They exist so the individual decoders can be used and tested on their own, and so
//! the reason a report was dropped can be logged.
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A header line did not have 3 or 4 tokens.
    #[error("Header line has {0} tokens, expected 3 or 4.")]
    HeaderTokenCount(usize),
    /// The `U` data type letter is not in the upper air table.
    #[error("Unknown upper air data type: {0}")]
    UnknownDataType(String),
    /// A `DDHHMM` or `YYGGI` time group could not be decoded.
    #[error("Invalid time group: {0}")]
    InvalidTimestamp(String),

    /// None of the `TTAA`, `TTBB`, `TTCC`, `TTDD`, `PPBB` or `PPDD` keywords were found.
    #[error("No sounding message type keyword found.")]
    MissingTypeKeyword,
    /// The message ended before the time and station groups.
    #[error("Message ended before the station identification.")]
    TruncatedMessage,
    /// The station reported `NIL` or an all missing time group.
    #[error("Station report is NIL.")]
    NilReport,
    /// The station identifier is not an integer.
    #[error("Invalid station identifier: {0}")]
    InvalidStation(String),
    /// A fixed length section ran out of tokens.
    #[error("Section {0} is truncated.")]
    TruncatedSection(u8),
    /// A single fixed width group failed to decode.
    #[error("Invalid {group} group: {token}")]
    InvalidGroup {
        /// Which kind of group was being decoded.
        group: &'static str,
        /// The offending token.
        token: String,
    },

    /// Profile assembly needs at least one message.
    #[error("No messages to assemble.")]
    NoMessages,
    /// The day and hour could not be placed on the calendar.
    #[error("Day {day} hour {hour} is not a valid time near the reference time.")]
    InvalidValidTime {
        /// Day of the month from the message.
        day: u32,
        /// Hour of the day from the message.
        hour: u32,
    },
    /// A report chunk had no decodable header line.
    #[error("Report has no bulletin header.")]
    MissingHeader,

    /// The document is larger than the configured limit.
    #[error("Bulletin is {len} bytes, limit is {limit}.")]
    BulletinTooLarge {
        /// Size of the rejected document in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl DecodeError {
    pub(crate) fn invalid_group(group: &'static str, token: &str) -> Self {
        DecodeError::InvalidGroup {
            group,
            token: token.to_owned(),
        }
    }
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, DecodeError>;
