//! Drag payload wire format.
//!
//! A payload is a media type tag plus a byte buffer holding one or more
//! records, each a big-endian `u32` byte length followed by that many bytes of
//! UTF-8 item name. Only the first record is read when dropping.

use crate::domain::error::{DomainError, DomainResult};

/// Media type tagging payloads produced by dragging a world item.
pub const WORLD_ITEM_MIME_TYPE: &str = "application/x-world-item";

const LEN_PREFIX: usize = std::mem::size_of::<u32>();

/// What the view asks the model to do with dropped data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Copy,
    Move,
    Link,
}

/// Opaque data transferred from a drag source to a drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    mime_type: String,
    data: Vec<u8>,
}

impl DragPayload {
    /// Wraps raw data under an arbitrary media type, as received from a view.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Encodes item names as a world item payload.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut data = Vec::new();
        for name in names {
            let bytes = name.as_bytes();
            // names longer than u32::MAX bytes are not representable on the wire
            let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
            data.extend_from_slice(&len.to_be_bytes());
            data.extend_from_slice(&bytes[..len as usize]);
        }
        Self::new(WORLD_ITEM_MIME_TYPE, data)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn has_format(&self, mime_type: &str) -> bool {
        self.mime_type == mime_type
    }

    /// Decodes the name carried by the first record.
    pub fn item_name(&self) -> DomainResult<String> {
        if !self.has_format(WORLD_ITEM_MIME_TYPE) {
            return Err(DomainError::UnrecognizedPayload(format!(
                "media type {}",
                self.mime_type
            )));
        }
        let prefix: [u8; LEN_PREFIX] = self
            .data
            .get(..LEN_PREFIX)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| DomainError::UnrecognizedPayload("missing length prefix".into()))?;
        let len = u32::from_be_bytes(prefix) as usize;
        let body = self
            .data
            .get(LEN_PREFIX..LEN_PREFIX.saturating_add(len))
            .ok_or_else(|| {
                DomainError::UnrecognizedPayload(format!(
                    "truncated record: expected {} bytes, found {}",
                    len,
                    self.data.len() - LEN_PREFIX
                ))
            })?;
        String::from_utf8(body.to_vec())
            .map_err(|e| DomainError::UnrecognizedPayload(format!("name is not UTF-8: {e}")))
    }
}
