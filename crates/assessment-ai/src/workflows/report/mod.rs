pub mod assembler;
pub mod prompt;
mod sections;

pub use assembler::{
    assemble, ReportDocument, ReportParseError, ReportSectionView, MISSING_SECTION_FALLBACK,
};
pub use prompt::{disc_summary, ReportPromptBuilder, REPORT_PROMPT_VERSION};
pub use sections::ReportSection;
