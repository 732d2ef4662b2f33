//! 虚拟机快照模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ManagedObjectReference;

/// 创建快照请求 (`CreateSnapshot_Task` 参数)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSnapshotRequest {
    /// 快照名称
    pub name: String,

    /// 快照描述，缺省时不发送
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 是否包含内存
    pub memory: bool,

    /// 是否静默文件系统
    pub quiesce: bool,
}

/// 虚拟机快照信息 (`VirtualMachineSnapshotInfo`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub current_snapshot: Option<ManagedObjectReference>,

    #[serde(default)]
    pub root_snapshot_list: Vec<SnapshotTree>,
}

/// 快照树节点 (`VirtualMachineSnapshotTree`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTree {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// 子快照，按创建顺序排列；缺省视为空
    #[serde(default)]
    pub child_snapshot_list: Vec<SnapshotTree>,

    pub snapshot: Option<ManagedObjectReference>,

    pub id: Option<i64>,

    pub create_time: Option<DateTime<Utc>>,

    pub state: Option<String>,

    pub quiesced: Option<bool>,
}

impl SnapshotTree {
    /// 构造一个只有名称和描述的节点
    pub fn new(name: &str, description: &str, children: Vec<SnapshotTree>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            child_snapshot_list: children,
            snapshot: None,
            id: None,
            create_time: None,
            state: None,
            quiesced: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_description_omitted_when_absent() {
        let req = CreateSnapshotRequest {
            name: "before-upgrade".into(),
            description: None,
            memory: false,
            quiesce: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("description").is_none());
        assert_eq!(value["quiesce"], json!(true));
    }

    #[test]
    fn test_snapshot_tree_from_wire() {
        let info: SnapshotInfo = serde_json::from_value(json!({
            "_typeName": "VirtualMachineSnapshotInfo",
            "currentSnapshot": { "_typeName": "ManagedObjectReference", "type": "VirtualMachineSnapshot", "value": "snapshot-2" },
            "rootSnapshotList": [{
                "_typeName": "VirtualMachineSnapshotTree",
                "name": "A",
                "description": "first",
                "id": 1,
                "createTime": "2024-05-01T10:00:00.000Z",
                "state": "poweredOn",
                "quiesced": false,
                "childSnapshotList": [{
                    "name": "B",
                    "description": "second",
                    "id": 2
                }]
            }]
        }))
        .unwrap();

        let root = &info.root_snapshot_list[0];
        assert_eq!(root.name, "A");
        assert!(root.create_time.is_some());
        assert_eq!(root.child_snapshot_list[0].name, "B");
        // 缺省的子列表反序列化为空
        assert!(root.child_snapshot_list[0].child_snapshot_list.is_empty());
    }
}
