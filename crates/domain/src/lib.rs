//! 长帖（thread）系统核心领域模型
//!
//! 包含事件的草稿/待签名/已签名三种状态、长帖聚合、草稿检查点以及付费层级选择。

pub mod draft;
pub mod errors;
pub mod event;
pub mod id_generator;
pub mod thread;
pub mod tier;
pub mod value_objects;

// 重新导出常用类型
pub use draft::*;
pub use errors::*;
pub use event::*;
pub use id_generator::*;
pub use thread::*;
pub use tier::*;
pub use value_objects::*;
