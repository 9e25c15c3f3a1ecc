//! Answer generation. Extractive only: the retrieved passages are the answer.

pub mod answer;

pub use answer::{compose_answer, NO_CONTEXT_ANSWER};
