/// 键路径工具
///
/// 在嵌套树位置与规范化的点分路径之间相互转换，并提供
/// 展开、查找、写入、删除、剪枝等纯函数操作。
use std::fmt;
use std::str::FromStr;

use crate::tree::{LocaleTree, Node};
use crate::utils::{LocaleError, Result};

/// 路径段分隔符
pub const SEPARATOR: char = '.';
const ESCAPE: char = '\\';

/// 叶子位置标识
///
/// 字符串形式为各段以 `.` 连接；段内的 `.` 和 `\` 以 `\` 转义，
/// 因此任意键都能无歧义地往返。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            for c in segment.chars() {
                if c == SEPARATOR || c == ESCAPE {
                    write!(f, "{}", ESCAPE)?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(LocaleError::InvalidKeyPath("empty path".to_string()));
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(LocaleError::InvalidKeyPath(format!(
                            "dangling escape in '{}'",
                            s
                        )))
                    }
                },
                SEPARATOR => segments.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        segments.push(current);

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(LocaleError::InvalidKeyPath(format!("empty segment in '{}'", s)));
        }

        Ok(Self { segments })
    }
}

/// 路径查找结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// 路径指向叶子
    Leaf(&'a str),
    /// 路径不存在
    Absent,
    /// 结构不一致：路径指向子树，或途经一个叶子
    Mismatch,
}

impl<'a> Lookup<'a> {
    pub fn leaf(self) -> Option<&'a str> {
        match self {
            Lookup::Leaf(text) => Some(text),
            _ => None,
        }
    }
}

/// 按深度优先、插入顺序展开所有叶子
pub fn flatten(tree: &LocaleTree) -> Vec<(KeyPath, &str)> {
    let mut out = Vec::new();
    flatten_into(tree, &mut Vec::new(), &mut out);
    out
}

fn flatten_into<'a>(
    tree: &'a LocaleTree,
    prefix: &mut Vec<String>,
    out: &mut Vec<(KeyPath, &'a str)>,
) {
    for (key, node) in tree.iter() {
        prefix.push(key.clone());
        match node {
            Node::Leaf(text) => out.push((KeyPath::new(prefix.clone()), text.as_str())),
            Node::Tree(child) => flatten_into(child, prefix, out),
        }
        prefix.pop();
    }
}

/// 查找路径，不创建任何中间节点
pub fn lookup<'a>(tree: &'a LocaleTree, path: &KeyPath) -> Lookup<'a> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Lookup::Absent;
    };

    let mut current = tree;
    for segment in parents {
        match current.get(segment) {
            Some(Node::Tree(child)) => current = child,
            Some(Node::Leaf(_)) => return Lookup::Mismatch,
            None => return Lookup::Absent,
        }
    }

    match current.get(last) {
        Some(Node::Leaf(text)) => Lookup::Leaf(text),
        Some(Node::Tree(_)) => Lookup::Mismatch,
        None => Lookup::Absent,
    }
}

/// 查找叶子值；子树或不存在均视为 `None`
pub fn resolve<'a>(tree: &'a LocaleTree, path: &KeyPath) -> Option<&'a str> {
    lookup(tree, path).leaf()
}

/// 写入叶子，按需创建中间对象节点
///
/// 返回值表示树是否被修改（写入相同值时为 `false`）。
/// 途经已有叶子或终点为子树时返回 `PathConflict`，树保持不变。
pub fn ensure(tree: &mut LocaleTree, path: &KeyPath, value: &str) -> Result<bool> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(LocaleError::InvalidKeyPath("empty path".to_string()));
    };

    // 先检查冲突，避免冲突时留下半截新建的中间节点
    if matches!(lookup(tree, path), Lookup::Mismatch) {
        return Err(LocaleError::PathConflict {
            path: path.to_string(),
        });
    }

    let mut current = tree;
    for segment in parents {
        if current.get(segment).is_none() {
            current.insert(segment.clone(), Node::Tree(LocaleTree::new()));
        }
        current = match current.get_mut(segment) {
            Some(Node::Tree(child)) => child,
            _ => {
                return Err(LocaleError::PathConflict {
                    path: path.to_string(),
                })
            }
        };
    }

    if let Some(Node::Leaf(existing)) = current.get(last) {
        if existing == value {
            return Ok(false);
        }
    }

    current.insert(last.clone(), Node::Leaf(value.to_string()));
    Ok(true)
}

/// 删除叶子，返回旧值；不会剪除变空的父节点
pub fn remove(tree: &mut LocaleTree, path: &KeyPath) -> Option<String> {
    let (last, parents) = path.segments().split_last()?;

    let mut current = tree;
    for segment in parents {
        current = match current.get_mut(segment) {
            Some(Node::Tree(child)) => child,
            _ => return None,
        };
    }

    if !matches!(current.get(last), Some(Node::Leaf(_))) {
        return None;
    }

    match current.remove(last) {
        Some(Node::Leaf(text)) => Some(text),
        _ => None,
    }
}

/// 自底向上移除所有空子树，返回移除的子树数量
///
/// 一次调用即可处理级联产生的空节点。根节点本身保留（可能为空树）。
pub fn prune(tree: &mut LocaleTree) -> usize {
    let mut removed = 0;

    tree.entries_mut().retain(|_, node| match node {
        Node::Leaf(_) => true,
        Node::Tree(child) => {
            removed += prune(child);
            if child.is_empty() {
                removed += 1;
                false
            } else {
                true
            }
        }
    });

    removed
}
