//! zseek - 编辑器的文本搜索与文件检测内核
//!
//! 模块结构：
//! - kernel::fuzzy: 命令/文件列表的子序列过滤
//! - kernel::search: 项目搜索会话（候选文件缓存、防抖、结果）
//! - kernel::services::ports: 数据类型与 FileProvider 端口
//! - kernel::services::adapters: 搜索/替换、编码检测、本地文件、配置

pub mod kernel;
