pub mod controller;

pub use controller::{FormInput, RequestController, SubmitOutcome, SubmitState};
