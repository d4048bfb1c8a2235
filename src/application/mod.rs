pub mod use_cases;

pub use use_cases::bulk_upload::BulkUploadUseCase;
pub use use_cases::template::{TemplateFile, TemplateUseCase};
