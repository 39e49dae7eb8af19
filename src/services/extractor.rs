//! 题目抽取 - 业务能力层
//!
//! 把宿主提供的控件树归并为逻辑题目。
//! 分组规则是启发式的：同名控件为一组，无名控件各自成组；
//! 不保证对任意页面结构的分组正确性

use std::collections::HashMap;

use phf::phf_set;

use crate::models::dom::ControlTree;
use crate::models::question::{OptionHandle, Question};
use crate::utils::text::clip_chars;

/// 可作为题目容器的标签
static CONTAINER_TAGS: phf::Set<&'static str> = phf_set! {
    "div",
    "li",
    "tr",
    "p",
};

/// 题干字符数上限
const MAX_QUESTION_CHARS: usize = 500;

/// 抽取当前控件树中的全部题目
///
/// 算法：
/// 1. 按文档顺序收集控件，按分组键分组（保持首次出现顺序）
/// 2. 每组取第一个控件，自近及远找第一个可作容器的祖先，
///    都不匹配时退回直接父节点
/// 3. 题干取容器子树的可见文本（≤500 字符），
///    为空时使用 "Question {n}" 占位
///
/// 页面上没有控件时返回空序列，而不是错误
pub fn extract(tree: &ControlTree) -> Vec<Question> {
    // 分组键 → 分组下标；分组按首次出现顺序保存
    let mut key_slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<(usize, OptionHandle)>> = Vec::new();

    for (node, attrs) in tree.controls() {
        let key = match attrs.name.as_deref() {
            Some(name) if !name.is_empty() => format!("name:{}", name),
            // 无名控件分配合成键，各自成为单选项题目
            _ => format!("anon:{}", attrs.index),
        };
        let handle = OptionHandle {
            control: attrs.index,
            kind: attrs.kind,
        };
        match key_slots.get(&key) {
            Some(&slot) => groups[slot].push((node, handle)),
            None => {
                key_slots.insert(key, groups.len());
                groups.push(vec![(node, handle)]);
            }
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(id, members)| {
            let (first_node, _) = members[0];
            let container = locate_container(tree, first_node);
            let mut text = clip_chars(&tree.subtree_text(container), MAX_QUESTION_CHARS);
            if text.is_empty() {
                text = format!("Question {}", id + 1);
            }
            Question {
                id,
                text,
                options: members.into_iter().map(|(_, handle)| handle).collect(),
            }
        })
        .collect()
}

/// 自近及远找第一个可作容器的祖先
fn locate_container(tree: &ControlTree, node: usize) -> usize {
    for ancestor in tree.ancestors(node) {
        if CONTAINER_TAGS.contains(tree.tag(ancestor)) {
            return ancestor;
        }
    }
    tree.parent(node).unwrap_or(node)
}
