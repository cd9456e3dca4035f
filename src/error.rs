#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bytes than the fixed AX.25 address/control prefix requires.
    #[error("truncated AX.25 header")]
    TruncatedHeader { actual: usize, minimum: usize },

    /// A UI frame ended before a full beacon header.
    #[error("truncated beacon header")]
    TruncatedBeaconHeader { actual: usize, minimum: usize },

    /// The selected payload variant requires more bytes than remain.
    #[error("truncated beacon payload")]
    TruncatedPayload { actual: usize, minimum: usize },

    /// The declared payload size cannot hold an RF message.
    #[error("payload size {size} is too small for an RF message")]
    InvalidPayloadSize { size: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
