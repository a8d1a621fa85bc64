//! Generation channel error types.

/// Generation-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// WebSocket connection could not be established
    #[display("WebSocket connection failed: {}", _0)]
    Connection(String),
    /// Outbound message could not be serialized
    #[display("Failed to serialize outbound message: {}", _0)]
    Serialization(String),
    /// Outbound message could not be written to the connection
    #[display("Failed to send message: {}", _0)]
    Send(String),
    /// Inbound message could not be parsed
    #[display("Invalid server message: {}", _0)]
    InvalidServerMessage(String),
    /// The underlying transport failed while reading
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// The server closed the connection without sending a terminal status
    #[display("Connection closed before generation finished")]
    ClosedWithoutTerminal,
    /// A generation is already running in this editor
    #[display("A generation is already running for field '{}'", _0)]
    AlreadyRunning(String),
}

impl GenerationErrorKind {
    /// Whether this error came from the duplex connection itself, as opposed to
    /// a local precondition. Transport failures are reported to the user as an
    /// alert; local preconditions are simply refused.
    pub fn is_transport_failure(&self) -> bool {
        !matches!(self, GenerationErrorKind::AlreadyRunning(_))
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::ClosedWithoutTerminal);
/// assert!(format!("{}", err).contains("closed before generation finished"));
/// assert!(err.kind.is_transport_failure());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
