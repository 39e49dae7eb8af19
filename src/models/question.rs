use async_trait::async_trait;

use crate::error::Result;
use crate::models::dom::ControlKind;

/// 提问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// 只要提示，不给答案
    Hint,
    /// 直接要单个字母答案，并回填到页面
    Auto,
}

/// 单个答案选项的非拥有引用
///
/// 控件本体归页面所有，这里只在一次流水线运行期间持有其序号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionHandle {
    /// 宿主侧控件序号（文档顺序）
    pub control: usize,
    pub kind: ControlKind,
}

/// 逻辑题目
///
/// 一次抽取过程的瞬时产物，流水线运行结束即丢弃，不持久化。
/// 不变量：至少有一个选项（没有选项的分组不会成为题目）
#[derive(Debug, Clone)]
pub struct Question {
    /// 抽取顺序下标（0 起）
    pub id: usize,
    /// 题目文本（≤500 字符，空容器使用占位文本）
    pub text: String,
    pub options: Vec<OptionHandle>,
}

/// 控件操作能力：读取 / 设置选中状态
///
/// 由宿主实现（真实页面走脚本注入，测试用内存替身）。
/// 单选组的互斥语义由页面原生行为保证，这里只做单次 set
#[async_trait]
pub trait ControlSurface: Send + Sync {
    async fn set_checked(&self, handle: &OptionHandle, checked: bool) -> Result<()>;

    async fn is_checked(&self, handle: &OptionHandle) -> Result<bool>;
}
