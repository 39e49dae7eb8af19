//! 可选控件树
//!
//! 宿主环境（真实页面或测试夹具）按文档顺序提供的抽象结构，
//! 抽取逻辑只依赖这棵树，不接触任何具体的文档 API

use serde::Deserialize;

/// 可选控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// 单选：组内互斥
    Radio,
    /// 多选：各自独立开关
    Checkbox,
}

/// 快照节点（宿主序列化的原始形态）
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotNode {
    pub tag: String,
    /// 节点自身的直接文本
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub control: Option<ControlAttrs>,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

/// 控件属性
#[derive(Debug, Clone, Deserialize)]
pub struct ControlAttrs {
    /// 宿主侧控件序号（文档顺序，回填选中状态时使用）
    pub index: usize,
    pub kind: ControlKind,
    /// 逻辑分组名；无名控件各自成组
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

/// 可选控件树（arena 形式，便于向上查找容器）
#[derive(Debug, Clone, Default)]
pub struct ControlTree {
    nodes: Vec<Node>,
    /// 控件节点编号，文档顺序
    controls: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    control: Option<ControlAttrs>,
}

impl ControlTree {
    /// 从宿主快照构建（先序展开，保持文档顺序）
    pub fn from_snapshot(root: SnapshotNode) -> Self {
        let mut tree = Self::default();
        tree.insert(root, None);
        tree
    }

    fn insert(&mut self, node: SnapshotNode, parent: Option<usize>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            tag: node.tag,
            text: node.text,
            parent,
            children: Vec::new(),
            control: node.control,
        });
        if self.nodes[id].control.is_some() {
            self.controls.push(id);
        }
        for child in node.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id].children.push(child_id);
        }
        id
    }

    /// 控件数量
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// 按文档顺序遍历控件：(节点编号, 控件属性)
    pub fn controls(&self) -> impl Iterator<Item = (usize, &ControlAttrs)> {
        self.controls
            .iter()
            .filter_map(|&id| self.nodes[id].control.as_ref().map(|c| (id, c)))
    }

    /// 节点标签
    pub fn tag(&self, id: usize) -> &str {
        &self.nodes[id].tag
    }

    /// 直接父节点
    pub fn parent(&self, id: usize) -> Option<usize> {
        self.nodes[id].parent
    }

    /// 自近及远遍历祖先节点
    pub fn ancestors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes[id].parent, move |&a| self.nodes[a].parent)
    }

    /// 子树的可见文本：自身及后代的直接文本按文档顺序拼接，
    /// 空白归一化为单个空格
    pub fn subtree_text(&self, id: usize) -> String {
        let mut fragments = Vec::new();
        self.collect_text(id, &mut fragments);
        fragments
            .iter()
            .flat_map(|s| s.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn collect_text<'a>(&'a self, id: usize, out: &mut Vec<&'a str>) {
        let node = &self.nodes[id];
        if !node.text.is_empty() {
            out.push(&node.text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! 测试用的快照构造辅助

    use super::*;

    pub fn elem(tag: &str, text: &str, children: Vec<SnapshotNode>) -> SnapshotNode {
        SnapshotNode {
            tag: tag.to_string(),
            text: text.to_string(),
            control: None,
            children,
        }
    }

    pub fn control(index: usize, kind: ControlKind, name: Option<&str>) -> SnapshotNode {
        SnapshotNode {
            tag: "input".to_string(),
            text: String::new(),
            control: Some(ControlAttrs {
                index,
                kind,
                name: name.map(str::to_string),
                checked: false,
            }),
            children: Vec::new(),
        }
    }
}
