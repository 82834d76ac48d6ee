mod engine;

pub use engine::DenseEngine;
