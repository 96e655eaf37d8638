use wasm_bindgen_futures::JsFuture;

use crate::error::AppError;
use crate::models::blog::Attachment;

/// Read a file picked in an `<input type="file">` into memory.
///
/// The browser-reported MIME type wins over the guess from the file name.
pub async fn read_file(file: &web_sys::File) -> Result<Attachment, AppError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Decode(format!("Failed to read '{}': {e:?}", file.name())))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let attachment = Attachment::new(file.name(), bytes);
    let declared = file.type_();
    if declared.is_empty() {
        Ok(attachment)
    } else {
        Ok(attachment.with_content_type(declared))
    }
}
