//! Codec trait and implementations for serializing/deserializing bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The client doesn't care HOW bodies are serialized: it just needs
//! something that implements the [`Codec`] trait. The backend speaks
//! JSON, so [`JsonCodec`] is the only implementation and the default
//! type parameter of [`ApiClient`](crate::ApiClient).

use serde::{de::DeserializeOwned, Serialize};

use crate::ApiError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the client is shared between pages, and Tokio may
///   poll a page's future on any worker thread.
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value
/// doesn't borrow from the response buffer, so the buffer can be dropped
/// as soon as decoding finishes.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ApiError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ApiError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if the bytes are malformed or don't
    /// match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ApiError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use festfrenzy_protocol::{Codec, JsonCodec, NewVenue};
///
/// let codec = JsonCodec;
/// let venue = NewVenue {
///     name: "Main Hall".into(),
///     location: "Block A".into(),
///     capacity: 300,
/// };
///
/// let bytes = codec.encode(&venue).unwrap();
/// let decoded: NewVenue = codec.decode(&bytes).unwrap();
/// assert_eq!(venue, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(value).map_err(ApiError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(data).map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Venue, VenueId};

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = br#"{"id":3,"name":"Seminar Hall","location":"Block B","capacity":120,"extra":true}"#;

        let venue: Venue = JsonCodec.decode(json).expect("should decode");

        assert_eq!(venue.id, VenueId(3));
        assert_eq!(venue.capacity, 120);
    }

    #[test]
    fn test_decode_wrong_shape_returns_decode_error() {
        let result: Result<Venue, _> = JsonCodec.decode(br#"{"id":"three"}"#);

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_decode_truncated_input_returns_decode_error() {
        let result: Result<Venue, _> = JsonCodec.decode(br#"{"id":3,"na"#);

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
