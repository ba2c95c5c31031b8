pub mod classify;
pub mod document;
pub mod error;
pub mod generator;
pub mod ids;
pub mod normalize;
pub mod overview;
pub mod resolve;

pub use crate::generator::WorkflowGenerator;
pub use crate::normalize::IdNormalizer;
