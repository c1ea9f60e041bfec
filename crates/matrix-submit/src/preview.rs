//! Local previews of selected input.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use matrix_client::{AnalysisRequest, Payload};
use matrix_model::PreviewHandle;

/// Renders a selected input for display before it is submitted.
///
/// Files become `data:<media type>;base64,...` URLs; text is echoed.
pub fn generate_preview(request: &AnalysisRequest) -> PreviewHandle {
    match &request.payload {
        Payload::File {
            media_type, bytes, ..
        } => PreviewHandle::DataUrl(format!(
            "data:{};base64,{}",
            media_type.trim().to_ascii_lowercase(),
            STANDARD.encode(bytes)
        )),
        Payload::Text(text) => PreviewHandle::TextEcho(text.clone()),
    }
}
