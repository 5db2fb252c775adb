pub mod quiz;
pub mod renderer;
pub mod validation;

pub use quiz::{AnswerVerdict, QuizCard, WidgetState};
pub use renderer::{RenderedDocument, ResultRenderer};
pub use validation::SubmissionValidator;
