mod fit;

use crate::error::DecodeError;
use crate::types::activity::DecodedActivity;

/// Turns a device container into typed records. Sentinel values are resolved
/// to `None` here so nothing downstream has to know about them.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedActivity, DecodeError>;
}

pub use fit::FitDecoder;

pub fn decode(bytes: &[u8]) -> Result<DecodedActivity, DecodeError> {
    FitDecoder.decode(bytes)
}
