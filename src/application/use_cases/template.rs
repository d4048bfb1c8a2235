use crate::domain::error::Result;
use crate::domain::sheet::EntityKind;
use crate::infrastructure::sheet;

/// A ready-to-download template workbook.
pub struct TemplateFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Builds the per-kind bulk-upload template.
pub struct TemplateUseCase;

impl TemplateUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, kind: EntityKind) -> Result<TemplateFile> {
        let bytes = sheet::build_template(kind)?;
        Ok(TemplateFile {
            filename: format!("{}_bulk_upload_template.xlsx", kind.label()),
            bytes,
        })
    }
}

impl Default for TemplateUseCase {
    fn default() -> Self {
        Self::new()
    }
}
