pub mod filter;
pub mod question;
pub mod seed;
pub mod subjects;

pub use question::{Difficulty, LastResult, NursingPhase, Question};
