/// 字形转换模块
///
/// 同一语言两种书写变体之间的逐字映射（简体 ⇄ 繁体）。
/// 映射表之外的字符原样保留；转换不保证可逆。
mod table;

use std::collections::HashMap;

/// 转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertDirection {
    SimplifiedToTraditional,
    TraditionalToSimplified,
}

/// 逐字映射的字形转换器
#[derive(Debug, Clone)]
pub struct ScriptConverter {
    direction: ConvertDirection,
    table: HashMap<char, char>,
}

impl ScriptConverter {
    pub fn new(direction: ConvertDirection) -> Self {
        let pairs = table::SIMPLIFIED.chars().zip(table::TRADITIONAL.chars());

        let table = match direction {
            ConvertDirection::SimplifiedToTraditional => pairs.collect(),
            ConvertDirection::TraditionalToSimplified => {
                let mut map: HashMap<char, char> = pairs.map(|(s, t)| (t, s)).collect();
                map.extend(table::TRADITIONAL_EXTRA.iter().copied());
                map
            }
        };

        Self { direction, table }
    }

    /// 简 → 繁
    pub fn simplified_to_traditional() -> Self {
        Self::new(ConvertDirection::SimplifiedToTraditional)
    }

    /// 繁 → 简
    pub fn traditional_to_simplified() -> Self {
        Self::new(ConvertDirection::TraditionalToSimplified)
    }

    pub fn direction(&self) -> ConvertDirection {
        self.direction
    }

    pub fn convert(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}
