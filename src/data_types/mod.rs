pub mod annotation;
pub mod stats;
pub mod track;
