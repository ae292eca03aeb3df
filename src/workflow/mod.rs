pub mod lesson_ctx;
pub mod lesson_flow;
pub mod session;

pub use lesson_ctx::LessonCtx;
pub use lesson_flow::{LessonFlow, ProcessResult};
pub use session::{SessionSnapshot, SessionStore};
