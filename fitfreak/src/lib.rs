//! Exercise session runtime.
//!
//! A [`session::Session`] receives pose frames one at a time and routes each
//! of them to the repetition counter or the pose validator of the selected
//! exercise.

pub mod config;
pub mod session;
pub mod source;

pub use config::read_configuration;
pub use fitfreak_traits::*;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::session::*;
    pub use crate::source::*;
    pub use ff_pose_payloads::*;
    pub use fitfreak_traits::*;
}
