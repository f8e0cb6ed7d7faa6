//! Minimal `multipart/form-data` encoder for a single file part.

use uuid::Uuid;

pub(super) struct MultipartBody {
    boundary: String,
    pub(super) bytes: Vec<u8>,
}

impl MultipartBody {
    pub(super) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

pub(super) fn single_file(
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> MultipartBody {
    let boundary = format!("----obra-risk-{}", Uuid::new_v4().simple());
    encode_with_boundary(boundary, field, file_name, content_type, data)
}

fn encode_with_boundary(
    boundary: String,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> MultipartBody {
    let head = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {content_type}\r\n\r\n",
        escape_quoted(field),
        escape_quoted(file_name),
    );
    let tail = format!("\r\n--{boundary}--\r\n");
    let mut bytes = Vec::with_capacity(head.len() + data.len() + tail.len());
    bytes.extend_from_slice(head.as_bytes());
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(tail.as_bytes());
    MultipartBody { boundary, bytes }
}

/// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
