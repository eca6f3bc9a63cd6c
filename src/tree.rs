use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::key_path::KeyPath;
use crate::utils::{LocaleError, Result};

/// 树节点：叶子文本或子树
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Tree(LocaleTree),
}

/// 单个语言的嵌套翻译文档
///
/// 键按插入顺序保存，所有变换都不会打乱已有键的顺序，
/// 以保证序列化结果稳定。
#[derive(Debug, Clone, Default)]
pub struct LocaleTree {
    entries: IndexMap<String, Node>,
}

/// 相等比较区分键的顺序：顺序不同的两棵树序列化结果不同
impl PartialEq for LocaleTree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for LocaleTree {}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 直接子节点数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// 插入或替换子节点；已存在的键保持原位置
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    /// 移除子节点，保持其余键的相对顺序
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.entries.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<String, Node> {
        &mut self.entries
    }

    /// 统计所有叶子数量（递归）
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Tree(child) => child.leaf_count(),
            })
            .sum()
    }

    /// 从 JSON 值构建
    ///
    /// 根必须是对象；叶子只允许字符串。
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_json_map(map, &mut Vec::new()),
            other => Err(LocaleError::UnsupportedValue {
                path: "<root>".to_string(),
                kind: json_kind(&other),
            }),
        }
    }

    fn from_json_map(map: Map<String, Value>, prefix: &mut Vec<String>) -> Result<Self> {
        let mut tree = LocaleTree::new();

        for (key, value) in map {
            prefix.push(key.clone());
            let node = match value {
                Value::String(text) => Node::Leaf(text),
                Value::Object(child) => Node::Tree(Self::from_json_map(child, prefix)?),
                other => {
                    return Err(LocaleError::UnsupportedValue {
                        path: KeyPath::new(prefix.clone()).to_string(),
                        kind: json_kind(&other),
                    })
                }
            };
            prefix.pop();
            tree.insert(key, node);
        }

        Ok(tree)
    }

    /// 转换为 JSON 值（保持键顺序）
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, node) in &self.entries {
            let value = match node {
                Node::Leaf(text) => Value::String(text.clone()),
                Node::Tree(child) => child.to_json(),
            };
            map.insert(key.clone(), value);
        }
        Value::Object(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
