//! 草稿实体定义
//!
//! 草稿保存长帖的检查点历史，最新的检查点排在最前。草稿本身由外部草稿仓储持有。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::thread::ThreadCheckpoint;

/// 草稿类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftType {
    Thread,
}

/// 草稿检查点，创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCheckpoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    time: DateTime<Utc>,
    data: ThreadCheckpoint,
    manually_saved: bool,
}

impl DraftCheckpoint {
    pub fn new(time: DateTime<Utc>, data: ThreadCheckpoint, manually_saved: bool) -> Self {
        Self {
            time,
            data,
            manually_saved,
        }
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn data(&self) -> &ThreadCheckpoint {
        &self.data
    }

    /// 是否为用户手动保存（区别于自动保存）
    pub fn manually_saved(&self) -> bool {
        self.manually_saved
    }
}

/// 草稿条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftItem {
    #[serde(rename = "type")]
    pub draft_type: DraftType,
    pub id: String,
    /// 编码后的检查点列表（最新在前）
    pub checkpoints: String,
}

impl DraftItem {
    /// 创建空的长帖草稿
    pub fn new_thread(id: impl Into<String>) -> Self {
        Self {
            draft_type: DraftType::Thread,
            id: id.into(),
            checkpoints: String::new(),
        }
    }

    /// 解析检查点历史，尚未写入时为空
    pub fn checkpoints(&self) -> DomainResult<Vec<DraftCheckpoint>> {
        if self.checkpoints.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.checkpoints)
            .map_err(|e| DomainError::invalid_encoding("draft checkpoints", e.to_string()))
    }

    /// 写回检查点历史
    pub fn set_checkpoints(&mut self, checkpoints: &[DraftCheckpoint]) -> DomainResult<()> {
        self.checkpoints = serde_json::to_string(checkpoints)
            .map_err(|e| DomainError::invalid_encoding("draft checkpoints", e.to_string()))?;
        Ok(())
    }

    /// 最新的检查点
    pub fn latest_checkpoint(&self) -> DomainResult<Option<DraftCheckpoint>> {
        Ok(self.checkpoints()?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::ThreadCheckpointItem;

    fn snapshot(content: &str) -> ThreadCheckpoint {
        ThreadCheckpoint {
            items: vec![ThreadCheckpointItem {
                event: content.to_string(),
                urls: vec![],
            }],
        }
    }

    #[test]
    fn test_new_draft_has_empty_history() {
        let draft = DraftItem::new_thread("abc");
        assert_eq!(draft.draft_type, DraftType::Thread);
        assert!(draft.checkpoints().unwrap().is_empty());
        assert!(draft.latest_checkpoint().unwrap().is_none());
    }

    #[test]
    fn test_checkpoint_history_encoding() {
        let mut draft = DraftItem::new_thread("abc");
        let newer = DraftCheckpoint::new(
            DateTime::from_timestamp_millis(2_000).unwrap(),
            snapshot("b"),
            true,
        );
        let older = DraftCheckpoint::new(
            DateTime::from_timestamp_millis(1_000).unwrap(),
            snapshot("a"),
            false,
        );

        draft.set_checkpoints(&[newer.clone(), older.clone()]).unwrap();

        assert_eq!(draft.checkpoints().unwrap(), vec![newer.clone(), older]);
        assert_eq!(draft.latest_checkpoint().unwrap(), Some(newer));
    }

    #[test]
    fn test_wire_format() {
        let checkpoint = DraftCheckpoint::new(
            DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
            snapshot("e"),
            true,
        );
        let json = serde_json::to_value(&checkpoint).unwrap();
        assert_eq!(json["time"], 1_700_000_000_123_i64);
        assert_eq!(json["manuallySaved"], true);
        assert_eq!(json["data"]["items"][0]["event"], "e");

        let draft = serde_json::to_value(DraftItem::new_thread("x")).unwrap();
        assert_eq!(draft["type"], "thread");
    }

    #[test]
    fn test_malformed_history_is_an_error() {
        let mut draft = DraftItem::new_thread("abc");
        draft.checkpoints = "{oops".to_string();
        assert!(matches!(
            draft.checkpoints(),
            Err(DomainError::InvalidEncoding { .. })
        ));
    }
}
