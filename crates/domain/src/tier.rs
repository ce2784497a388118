//! 付费层级选择
//!
//! 发布流程只把它原样交给层级准备器，不解释其中的内容。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 单个层级的选择状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChoice {
    pub name: String,
    pub selected: bool,
}

/// 层级ID到选择状态的映射
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierSelection(BTreeMap<String, TierChoice>);

impl TierSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        selected: bool,
    ) -> Self {
        self.0.insert(
            id.into(),
            TierChoice {
                name: name.into(),
                selected,
            },
        );
        self
    }

    /// 已勾选的层级ID
    pub fn selected_tiers(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, choice)| choice.selected)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// 没有任何层级被勾选时视为公开发布
    pub fn is_public(&self) -> bool {
        self.0.values().all(|choice| !choice.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tiers() {
        let selection = TierSelection::new()
            .with_tier("gold", "Gold", true)
            .with_tier("free", "Free", false)
            .with_tier("silver", "Silver", true);

        assert_eq!(selection.selected_tiers(), vec!["gold", "silver"]);
        assert!(!selection.is_public());
        assert!(TierSelection::new().is_public());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let selection = TierSelection::new().with_tier("gold", "Gold", true);
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!({"gold": {"name": "Gold", "selected": true}}));
    }
}
