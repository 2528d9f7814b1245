//! Minimal `multipart/form-data` encoding for a single file field.

/// Encoded multipart body plus the boundary it was built with.
pub(crate) struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Value for the request `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Build a body carrying one file field, the shape FastAPI's `UploadFile`
/// expects on the other end.
pub(crate) fn encode_file_field(
    field: &str,
    file_name: &str,
    contents: &[u8],
) -> MultipartBody {
    let boundary = format!("vocalscan-{:032x}", rand::random::<u128>());
    let file_name = sanitize_file_name(file_name);

    let mut bytes = Vec::with_capacity(contents.len() + 256);
    bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    bytes.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    bytes.extend_from_slice(contents);
    bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    MultipartBody { boundary, bytes }
}

/// Strip characters that would break the Content-Disposition header.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\r' | '\n' | '\\'))
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
