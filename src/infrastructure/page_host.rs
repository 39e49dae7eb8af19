//! 页面宿主 - 基础设施层
//!
//! 唯一的 page owner。把真实文档翻译成抽象的控件树快照，
//! 并把选中状态的写操作翻译回页面脚本；
//! 不认识 Question，不处理业务流程

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{BrowserError, Result};
use crate::models::dom::{ControlTree, SnapshotNode};
use crate::models::question::{ControlSurface, OptionHandle};
use crate::models::TrainingPage;

/// 抓取控件树：按文档顺序先序遍历 body，
/// 文本节点拼进所在元素的 text，radio/checkbox 记录控件属性
const SNAPSHOT_JS: &str = r#"
(() => {
    let nextIndex = 0;
    const visit = (el) => {
        const node = {
            tag: el.tagName.toLowerCase(),
            text: '',
            control: null,
            children: [],
        };
        for (const child of el.childNodes) {
            if (child.nodeType === Node.TEXT_NODE) {
                node.text += child.textContent;
            } else if (child.nodeType === Node.ELEMENT_NODE) {
                node.children.push(visit(child));
            }
        }
        if (el.tagName === 'INPUT' && (el.type === 'radio' || el.type === 'checkbox')) {
            node.control = {
                index: nextIndex++,
                kind: el.type,
                name: el.name || null,
                checked: el.checked,
            };
        }
        return node;
    };
    return visit(document.body);
})()
"#;

/// 抓取页面元信息与正文
const CAPTURE_JS: &str = r#"
(() => ({
    url: location.href,
    title: document.title,
    content: document.body.innerText || '',
}))()
"#;

/// 页面抓取结果
#[derive(Debug, Deserialize)]
struct PageCapture {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// 页面宿主
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval / 快照 / 控件读写能力
pub struct PageHost {
    page: Page,
}

impl PageHost {
    /// 创建新的页面宿主
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行页面脚本并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self
            .page
            .evaluate(js_code.into())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })?;
        let json_value = result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })?;
        Ok(json_value)
    }

    /// 执行页面脚本并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)
            .map_err(|e| BrowserError::SnapshotDecodeFailed { source: e })?;
        Ok(typed_value)
    }

    /// 抓取当前文档的控件树快照
    pub async fn control_tree(&self) -> Result<ControlTree> {
        let root: SnapshotNode = self.eval_as(SNAPSHOT_JS).await?;
        Ok(ControlTree::from_snapshot(root))
    }

    /// 捕获当前页面为训练页面
    pub async fn capture_training_page(&self) -> Result<TrainingPage> {
        let capture: PageCapture = self.eval_as(CAPTURE_JS).await?;
        Ok(TrainingPage::new(capture.url, capture.title, &capture.content))
    }
}

#[async_trait]
impl ControlSurface for PageHost {
    /// 设置选中状态并派发 change 事件
    ///
    /// 控件按文档顺序定位；页面结构变化导致序号失效时返回错误
    async fn set_checked(&self, handle: &OptionHandle, checked: bool) -> Result<()> {
        let js = format!(
            r#"
(() => {{
    const controls = document.querySelectorAll('input[type="radio"], input[type="checkbox"]');
    const el = controls[{index}];
    if (!el) return false;
    el.checked = {value};
    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
    return true;
}})()
"#,
            index = handle.control,
            value = checked,
        );
        let applied: bool = self.eval_as(js).await?;
        if !applied {
            return Err(BrowserError::StaleControl {
                control: handle.control,
            }
            .into());
        }
        Ok(())
    }

    async fn is_checked(&self, handle: &OptionHandle) -> Result<bool> {
        let js = format!(
            r#"
(() => {{
    const controls = document.querySelectorAll('input[type="radio"], input[type="checkbox"]');
    const el = controls[{index}];
    return el ? el.checked : null;
}})()
"#,
            index = handle.control,
        );
        match self.eval(js).await? {
            JsonValue::Bool(checked) => Ok(checked),
            _ => Err(BrowserError::StaleControl {
                control: handle.control,
            }
            .into()),
        }
    }
}
