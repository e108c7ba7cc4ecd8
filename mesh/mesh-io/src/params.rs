//! Export configuration.

/// Line terminator written after every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, for consumers that insist on Windows line endings.
    CrLf,
}

impl LineEnding {
    /// The terminator bytes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Parameters for OBJ export.
///
/// # Example
///
/// ```
/// use mesh_io::{ExportParams, LineEnding};
///
/// let params = ExportParams::new().with_line_ending(LineEnding::CrLf);
/// assert!(params.reject_non_finite);
///
/// let lenient = ExportParams::permissive();
/// assert!(!lenient.reject_non_finite);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParams {
    /// Fail with a malformed-fragment error on NaN or infinite coordinates
    /// (default: true). Most OBJ readers cannot parse them.
    pub reject_non_finite: bool,

    /// Record terminator (default: LF).
    pub line_ending: LineEnding,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            reject_non_finite: true,
            line_ending: LineEnding::Lf,
        }
    }
}

impl ExportParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters that only enforce the structural invariants.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            reject_non_finite: false,
            line_ending: LineEnding::Lf,
        }
    }

    /// Sets whether non-finite coordinates are rejected.
    #[must_use]
    pub const fn with_reject_non_finite(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }

    /// Sets the record terminator.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
