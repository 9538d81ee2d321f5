//! 文件服务模块
//!
//! 本地磁盘实现；其他后端实现同一个 `FileProvider` 端口即可接入搜索

pub mod local;

pub use local::LocalFileProvider;
