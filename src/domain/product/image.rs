//! Image payload normalisation and upload ingestion.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// MIME types accepted for product image uploads.
pub const ALLOWED_IMAGE_MIME: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A single product image in its normalised, tagged form.
///
/// The backend stores images as bare strings that are either full data URIs,
/// raw base64 blobs, or plain URL paths. Decoding tags each payload exactly
/// once; render sites never re-sniff prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Inline `data:` URI, ready for an `img src` attribute.
    DataUri(String),
    /// Path or URL reference resolved by the image host.
    Url(String),
}

impl ImagePayload {
    /// Tags a raw wire string. A bare base64 blob is promoted to a JPEG data
    /// URI, matching what the backend historically stored for uploads.
    pub fn normalize(raw: &str) -> Self {
        if raw.starts_with("data:") {
            ImagePayload::DataUri(raw.to_string())
        } else if !raw.is_empty() && raw.bytes().all(is_base64_byte) {
            ImagePayload::DataUri(format!("data:image/jpeg;base64,{raw}"))
        } else {
            ImagePayload::Url(raw.to_string())
        }
    }

    /// The string handed to the renderer and sent back to the backend.
    pub fn as_src(&self) -> &str {
        match self {
            ImagePayload::DataUri(s) => s,
            ImagePayload::Url(s) => s,
        }
    }
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}

impl Serialize for ImagePayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_src())
    }
}

impl<'de> Deserialize<'de> for ImagePayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ImagePayload::normalize(&raw))
    }
}

/// A file selected by the user, not yet encoded into the draft.
///
/// Upload bodies carry the file content as base64 text; it is decoded here so
/// ingestion owns the conversion back into an inline data URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    #[serde(
        serialize_with = "serialize_base64",
        deserialize_with = "deserialize_base64"
    )]
    pub content: Vec<u8>,
}

fn serialize_base64<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&BASE64.encode(bytes))
}

fn deserialize_base64<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    BASE64
        .decode(text.as_bytes())
        .map_err(|e| de::Error::custom(format!("invalid base64 file content: {e}")))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Only image files (JPEG, PNG, GIF, WEBP) are allowed")]
    UnsupportedType { file_name: String },
}

/// Appends a batch of uploads to an image sequence.
///
/// The batch is all-or-nothing with respect to the MIME allow-list: one file
/// outside it rejects the whole batch and nothing is appended.
pub fn ingest_batch(
    images: &[ImagePayload],
    uploads: &[UploadedImage],
) -> Result<Vec<ImagePayload>, ImageError> {
    if let Some(bad) = uploads
        .iter()
        .find(|u| !ALLOWED_IMAGE_MIME.contains(&u.mime_type.as_str()))
    {
        return Err(ImageError::UnsupportedType {
            file_name: bad.file_name.clone(),
        });
    }

    let mut out = images.to_vec();
    out.extend(uploads.iter().map(|u| {
        ImagePayload::DataUri(format!(
            "data:{};base64,{}",
            u.mime_type,
            BASE64.encode(&u.content)
        ))
    }));
    Ok(out)
}

/// Removes the payload at `index`, keeping everything else in order.
/// Out-of-range indices leave the sequence unchanged.
pub fn remove_image(images: &[ImagePayload], index: usize) -> Vec<ImagePayload> {
    images
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, payload)| payload.clone())
        .collect()
}
