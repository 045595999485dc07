//! 模块系统：路径解析、作用域与 import/export 改写

pub mod loader;
pub mod resolver;
pub mod scope;
pub mod transform;

pub use loader::{load_file, LoadedModule};
pub use resolver::{asset_file_name, entry_identity, is_asset, mangle, quote, resolve};
pub use scope::{Binding, ScopeTable};
pub use transform::{transform, TransformOutput};
