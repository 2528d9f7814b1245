//! Classify call and wire parsing.

use serde::Deserialize;

use super::multipart;
use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Probability pair produced by the remote model.
///
/// The service is expected to return complementary values, but the client
/// does not enforce that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub human_prob: f64,
    pub ai_prob: f64,
}

/// Failure modes of a classification request.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Endpoint rejected the upload: {0}")]
    BadRequest(String),
    #[error("Server error: {0}")]
    ServerError(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Json(String),
}

/// Upload the file to `{base_url}/classify` and parse the probability pair.
///
/// Blocks until the response arrives; callers run it off the UI thread.
pub fn classify(
    base_url: &str,
    file_name: &str,
    contents: &[u8],
) -> Result<Classification, ClassifyError> {
    let url = format!("{}/classify", base_url.trim_end_matches('/'));
    let body = multipart::encode_file_field("file", file_name, contents);
    let request = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .set("Content-Type", &body.content_type());

    let response = match request.send_bytes(body.bytes()) {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let text = read_body_limited(response).unwrap_or_else(|err| err);
            return Err(map_status_error(code, text));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(ClassifyError::Transport(err.to_string()));
        }
    };

    let text = read_body_limited(response).map_err(ClassifyError::Json)?;
    parse_classification(&text)
}

fn map_status_error(code: u16, body: String) -> ClassifyError {
    match code {
        400..=499 => ClassifyError::BadRequest(body),
        500..=599 => ClassifyError::ServerError(body),
        _ => ClassifyError::Transport(format!("HTTP {code}: {body}")),
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ClassificationWire {
    human_prob: Option<f64>,
    ai_prob: Option<f64>,
    /// FastAPI error payloads carry a `detail` field instead.
    detail: Option<serde_json::Value>,
}

fn parse_classification(body: &str) -> Result<Classification, ClassifyError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::Json("Empty response body".to_string()));
    }
    let parsed: ClassificationWire = serde_json::from_str(trimmed)
        .map_err(|err| ClassifyError::Json(format!("{err}: {trimmed}")))?;

    if let (Some(human_prob), Some(ai_prob)) = (parsed.human_prob, parsed.ai_prob) {
        if !human_prob.is_finite() || !ai_prob.is_finite() {
            return Err(ClassifyError::Json(format!(
                "Non-finite probabilities: {human_prob}, {ai_prob}"
            )));
        }
        return Ok(Classification {
            human_prob,
            ai_prob,
        });
    }
    let message = parsed
        .detail
        .map(|detail| detail.to_string())
        .unwrap_or_else(|| "Missing human_prob/ai_prob in response".to_string());
    Err(ClassifyError::Json(message))
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn parses_probability_pair() {
        let parsed =
            parse_classification(r#"{ "human_prob": 0.732, "ai_prob": 0.268 }"#).unwrap();
        assert_eq!(parsed.human_prob, 0.732);
        assert_eq!(parsed.ai_prob, 0.268);
    }

    #[test]
    fn missing_fields_surface_the_detail_message() {
        let err = parse_classification(r#"{ "detail": "file field required" }"#).unwrap_err();
        assert!(matches!(err, ClassifyError::Json(_)));
        assert!(err.to_string().contains("file field required"));
    }

    #[test]
    fn non_json_body_is_a_json_error() {
        let err = parse_classification("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, ClassifyError::Json(_)));
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = parse_classification("  ").unwrap_err();
        assert!(err.to_string().contains("Empty response body"));
    }

    #[test]
    fn non_finite_probabilities_are_rejected() {
        let err = parse_classification(r#"{ "human_prob": 1e500, "ai_prob": 0.1 }"#).unwrap_err();
        assert!(matches!(err, ClassifyError::Json(_)));
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert!(matches!(
            map_status_error(422, "bad".into()),
            ClassifyError::BadRequest(_)
        ));
        assert!(matches!(
            map_status_error(503, "down".into()),
            ClassifyError::ServerError(_)
        ));
    }

    /// Serve one request, capture its raw bytes, and answer with `response`.
    fn serve_once(response: String) -> (String, std::sync::mpsc::Receiver<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match stream.read(&mut buf) {
                        Ok(0) => break,
                        Ok(read) => {
                            request.extend_from_slice(&buf[..read]);
                            if request_complete(&request) {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = tx.send(request);
            }
        });
        (format!("http://{}", addr), rx)
    }

    fn request_complete(request: &[u8]) -> bool {
        let Some(header_end) = request
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
        else {
            return false;
        };
        let headers = String::from_utf8_lossy(&request[..header_end]);
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("Content-Length: "))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn classify_posts_multipart_and_parses_response() {
        let body = r#"{"human_prob": 0.732, "ai_prob": 0.268}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, rx) = serve_once(response);

        let contents = b"RIFF fake wav bytes";
        let result = classify(&url, "clip.wav", contents).unwrap();
        assert_eq!(result.human_prob, 0.732);
        assert_eq!(result.ai_prob, 0.268);

        let request = rx.recv().unwrap();
        let text = String::from_utf8_lossy(&request);
        assert!(text.starts_with("POST /classify HTTP/1.1"));
        assert!(text.contains("filename=\"clip.wav\""));
        assert!(
            request
                .windows(contents.len())
                .any(|window| window == contents)
        );
    }

    #[test]
    fn classify_maps_server_errors() {
        let body = r#"{"detail": "model unavailable"}"#;
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, _rx) = serve_once(response);
        let err = classify(&url, "clip.wav", b"bytes").unwrap_err();
        assert!(matches!(err, ClassifyError::ServerError(_)));
    }
}
