/// JSON shader descriptions.
pub mod desc;

pub use desc::{ColorDesc, ShaderDesc};
