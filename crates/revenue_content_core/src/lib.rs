pub mod domain;
pub mod html;
pub mod insertion;
pub mod ports;
pub mod prompt;
pub mod reply;
pub mod scorer;
pub mod structurer;

pub use domain::{
    AdSlots, AiSettings, CheckDetail, CheckStatus, Criterion, GenerationRequest, Grade,
    RenderedContent, Section, SeoScore, StructuredArticle, ValidationError,
};
pub use ports::{AdCodeStore, AdCodeUpdate, ContentGenerationService, PortError, PortResult};
pub use reply::{extract_generated_text, AiReply, GenerationError};
