use std::fmt;

use kleplace_parser::Error as ParserError;
use kleplace_pcb::PcbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// CLI usage error (missing args, invalid flags).
    Usage = 1,
    /// Input error (missing file, malformed layout, bad board or config).
    Input = 2,
    /// Processing error (host mutation or output failure).
    Processing = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ParserError> for CliError {
    fn from(e: ParserError) -> Self {
        Self::input(e.to_string())
    }
}

impl From<PcbError> for CliError {
    fn from(e: PcbError) -> Self {
        match e {
            PcbError::UnknownComponent { .. } => Self::processing(e.to_string()),
            _ => Self::input(e.to_string()),
        }
    }
}
