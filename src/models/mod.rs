pub mod request;
pub mod result;

pub use request::{OutputKind, SubmissionRequest};
pub use result::{OutputValue, QuizQuestion, RenderableResult};
