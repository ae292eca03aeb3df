pub mod item;
pub mod lesson;
pub mod loaders;
pub mod tier;

pub use item::{GeneratedItem, ItemKind};
pub use lesson::{
    EditEntry, ExtractedDocument, ExtractionStatus, LessonParameters, LessonPlan, SourceFormat,
};
pub use loaders::{load_all_toml_files, load_toml_to_lesson_plan};
pub use tier::{CognitiveLevel, Tier};
