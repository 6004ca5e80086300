use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::{File, FormData};

use crate::wizard::attachment::Attachment;
use crate::wizard::fields::CV_FIELD;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{}", rejection_text(.status, .message))]
    Rejected { status: u16, message: Option<String> },
    #[error("No se pudo conectar con el servidor. Inténtalo de nuevo. ({0})")]
    Network(String),
    #[error("No se pudo preparar el envío del formulario. ({0})")]
    Payload(String),
}

fn rejection_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("Hubo un error al enviar tu información: {}", message),
        None => format!("Hubo un error al enviar tu información (código {}).", status),
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Everything the form sends, minus the attachment bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub fields: Vec<(String, String)>,
    pub attachment: Option<Attachment>,
}

#[derive(Serialize)]
struct PayloadSummary<'a> {
    fields: Vec<&'a str>,
    attachment: Option<&'a Attachment>,
}

impl SubmissionPayload {
    /// JSON line for the console: field names and attachment metadata only.
    pub fn summary(&self) -> String {
        let summary = PayloadSummary {
            fields: self.fields.iter().map(|(name, _)| name.as_str()).collect(),
            attachment: self.attachment.as_ref(),
        };
        serde_json::to_string(&summary).unwrap_or_default()
    }
}

fn build_form_data(payload: &SubmissionPayload, file: Option<&File>) -> Result<FormData, SubmissionError> {
    let to_error = |e: wasm_bindgen::JsValue| SubmissionError::Payload(format!("{:?}", e));
    let form_data = FormData::new().map_err(to_error)?;
    for (name, value) in &payload.fields {
        form_data.append_with_str(name, value).map_err(to_error)?;
    }
    if let Some(file) = file {
        form_data
            .append_with_blob_and_filename(CV_FIELD, file, &file.name())
            .map_err(to_error)?;
    }
    Ok(form_data)
}

/// Multipart POST of the form. Any 2xx is a success; the server may explain
/// a rejection with a JSON `{"error": "..."}` body.
pub async fn post_form(
    endpoint: &str,
    payload: &SubmissionPayload,
    file: Option<File>,
) -> Result<(), SubmissionError> {
    let body = build_form_data(payload, file.as_ref())?;
    let response = Request::post(endpoint)
        .body(body)
        .send()
        .await
        .map_err(|e| SubmissionError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    log::warn!("Form submission rejected with status: {}", status);
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.error);
    Err(SubmissionError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_server_message() {
        let err = SubmissionError::Rejected {
            status: 422,
            message: Some("DNI duplicado".into()),
        };
        assert_eq!(err.to_string(), "Hubo un error al enviar tu información: DNI duplicado");
    }

    #[test]
    fn rejection_without_body_shows_status() {
        let err = SubmissionError::Rejected { status: 500, message: None };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn summary_leaves_out_values() {
        let payload = SubmissionPayload {
            fields: vec![("dni".into(), "12345678".into())],
            attachment: Some(Attachment::new("cv.pdf", 10, "application/pdf")),
        };
        let summary = payload.summary();
        assert!(summary.contains("\"dni\""));
        assert!(summary.contains("cv.pdf"));
        assert!(!summary.contains("12345678"));
    }
}
