//! Reading submitted forms into [`FormInput`].

use axum::extract::Multipart;
use tabula_core::uploads::UploadedFile;
use tabula_core::validation::FormInput;

use crate::error::{AppError, AppResult};

/// Collect a `multipart/form-data` body. Parts with a file name become
/// files; everything else is text.
pub async fn read_multipart(mut multipart: Multipart) -> AppResult<FormInput> {
    let mut input = FormInput::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                input.insert_file(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))?;
                input.insert_text(name, &text);
            }
        }
    }

    Ok(input)
}
