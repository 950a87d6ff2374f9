use core::fmt;

/// Errors that can occur while deserializing IDs.
///
/// Generic over the decoded ID type `E` so the offending value can be logged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SerdeError<E> {
    /// The decoded value has the reserved sign bit set.
    DecodeOverflow {
        /// The decoded ID value, which failed validation.
        id: E,
    },
}

impl<E: fmt::Debug> fmt::Display for SerdeError<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl<E: fmt::Debug> core::error::Error for SerdeError<E> {}
