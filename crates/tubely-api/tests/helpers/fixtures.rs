use axum_test::multipart::{MultipartForm, Part};

/// `size` bytes starting with a JPEG SOI marker.
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend((0..size.saturating_sub(4)).map(|i| (i % 251) as u8));
    data
}

/// `size` bytes starting with an ISO BMFF `ftyp` box.
pub fn mp4_bytes(size: usize) -> Vec<u8> {
    let mut data = vec![0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
    data.extend((0..size.saturating_sub(12)).map(|i| (i % 253) as u8));
    data
}

pub fn file_form(field: &str, data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data).file_name(file_name).mime_type(mime_type);
    MultipartForm::new().add_part(field.to_string(), part)
}

pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    file_form("thumbnail", data, "thumbnail.jpg", mime_type)
}

pub fn video_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    file_form("video", data, "boots.mp4", mime_type)
}

const BOUNDARY: &str = "tubely-test-boundary";

/// Hand-built multipart body whose single file part carries no Content-Type
/// header. Returns the request content type and the body.
pub fn untyped_part_body(field: &str, file_name: &str, data: &[u8]) -> (String, Vec<u8>) {
    raw_part_body(field, file_name, None, data)
}

/// Hand-built multipart body with one file part of type `mime_type`.
pub fn typed_part_body(field: &str, file_name: &str, mime_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    raw_part_body(field, file_name, Some(mime_type), data)
}

fn raw_part_body(field: &str, file_name: &str, mime_type: Option<&str>, data: &[u8]) -> (String, Vec<u8>) {
    let mut head = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
    );
    if let Some(mime_type) = mime_type {
        head.push_str(&format!("Content-Type: {mime_type}\r\n"));
    }
    head.push_str("\r\n");

    let mut body = head.into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
