pub mod content_llm;
pub mod db;
pub mod memory;
pub mod template;

pub use content_llm::OpenAiContentAdapter;
pub use db::DbAdapter;
pub use memory::MemoryAdCodeStore;
pub use template::TemplateContentAdapter;
