pub mod sampler;
pub mod weights;
