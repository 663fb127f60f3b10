pub mod logging;
pub mod tensor;
pub mod vec3;

pub use logging::{init_stdout_logger, max_level_from_env, StdoutLogger};
pub use tensor::{element_count, flat_index, strides, Tensor, TensorError};
pub use vec3::Vec3;

// Re-export log crate so downstream crates can use deli_base::log::*
pub use log;
