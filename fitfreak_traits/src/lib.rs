use bincode::config::standard;
use bincode::de::read::SliceReader;
use bincode::de::{Decoder, DecoderImpl};
use bincode::enc::write::Writer;
use bincode::enc::{Encode, Encoder, EncoderImpl};
use bincode::error::{DecodeError, EncodeError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common fitfreak Error type.
#[derive(Debug, Clone, PartialEq)]
pub struct FfError {
    message: String,
    cause: Option<String>,
}

impl Display for FfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cause_str = match &self.cause {
            Some(c) => c.as_str(),
            None => "None",
        };
        write!(f, "{}\n   cause:{}", self.message, cause_str)
    }
}

impl Error for FfError {}

impl From<&str> for FfError {
    fn from(s: &str) -> FfError {
        FfError {
            message: s.to_string(),
            cause: None,
        }
    }
}

impl From<String> for FfError {
    fn from(s: String) -> FfError {
        FfError {
            message: s,
            cause: None,
        }
    }
}

impl FfError {
    pub fn new_with_cause(message: &str, cause: impl Error) -> FfError {
        FfError {
            message: message.to_string(),
            cause: Some(cause.to_string()),
        }
    }

    pub fn add_cause(mut self, cause: &str) -> FfError {
        self.cause = Some(cause.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

// Generic Result type for fitfreak.
pub type FfResult<T> = Result<T, FfError>;

/// The internal state of a stateful component needs to be serializable
/// so it can be snapshotted and restored between two frames.
pub trait Freezable {
    /// Save the component state.
    /// The default implementation is to encode nothing (stateless).
    fn freeze<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&(), encoder) // default is stateless
    }

    /// Restore the component to a state previously produced by `freeze`.
    #[allow(unused_variables)]
    fn thaw<D: Decoder>(&mut self, decoder: &mut D) -> Result<(), DecodeError> {
        Ok(())
    }
}

// Growable in-memory sink for the bincode encoder.
#[derive(Default)]
struct VecWriter {
    bytes: Vec<u8>,
}

impl Writer for VecWriter {
    #[inline(always)]
    fn write(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

/// Freeze a component into a standalone byte buffer.
pub fn freeze_to_vec<F: Freezable>(component: &F) -> FfResult<Vec<u8>> {
    let mut encoder = EncoderImpl::new(VecWriter::default(), standard());
    component
        .freeze(&mut encoder)
        .map_err(|e| FfError::new_with_cause("Failed to freeze state", e))?;
    Ok(encoder.into_writer().bytes)
}

/// Thaw a component from a buffer produced by [`freeze_to_vec`].
pub fn thaw_from_slice<F: Freezable>(component: &mut F, bytes: &[u8]) -> FfResult<()> {
    let mut decoder = DecoderImpl::new(SliceReader::new(bytes), standard(), ());
    component
        .thaw(&mut decoder)
        .map_err(|e| FfError::new_with_cause("Failed to thaw state", e))
}
