/// Errors returned by the capture driver.
///
/// Lifecycle misuse (double start, stopping an idle session, blocking
/// record during an asynchronous session) is reported as an error rather
/// than left undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A capture buffer could not be allocated. No partial allocation is
    /// retained; `init` may be retried with a smaller buffer size.
    OutOfMemory,
    /// The configuration is unusable (e.g. zero words per buffer).
    InvalidConfig,
    /// An asynchronous capture session is already running.
    AlreadyActive,
    /// No asynchronous capture session is running.
    NotActive,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfMemory => f.write_str("capture buffer allocation failed"),
            Error::InvalidConfig => f.write_str("invalid capture configuration"),
            Error::AlreadyActive => f.write_str("capture session already active"),
            Error::NotActive => f.write_str("no active capture session"),
        }
    }
}
