//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺资源（Page），只向上暴露能力：
//! 执行脚本、抓取页面快照、读写控件选中状态

pub mod page_host;

pub use page_host::PageHost;
