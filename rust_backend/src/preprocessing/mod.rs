pub mod pipeline;
pub mod validator;

pub use pipeline::{clean_layoffs, LayoffPipeline, PipelineResult, PipelineStats};
pub use validator::{LayoffValidator, ValidationResult, ValidationStats};
