//! 快照参数

use vsnap_vim::CreateSnapshotRequest;

/// 规范化后的快照标志
///
/// quiesce 与 memory 互斥：请求 quiesce 时 memory 一律为 false。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotFlags {
    pub quiesce: bool,
    pub memory: bool,
}

impl SnapshotFlags {
    pub fn normalize(quiesce: bool, memory: bool) -> Self {
        if quiesce {
            Self { quiesce: true, memory: false }
        } else {
            Self { quiesce: false, memory }
        }
    }
}

/// 一次快照操作的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotJob {
    /// 虚拟机 UUID
    pub uuid: String,

    /// 按 instance UUID 查找 (默认 BIOS UUID)
    pub instance_uuid: bool,

    /// 快照名称
    pub name: String,

    /// 快照描述
    pub description: Option<String>,

    /// 请求的 quiesce 标志
    pub quiesce: bool,

    /// 请求的 memory 标志
    pub memory: bool,
}

impl SnapshotJob {
    pub fn flags(&self) -> SnapshotFlags {
        SnapshotFlags::normalize(self.quiesce, self.memory)
    }

    /// 生成 `CreateSnapshot_Task` 请求；空描述视为未提供
    pub fn request(&self) -> CreateSnapshotRequest {
        let flags = self.flags();
        CreateSnapshotRequest {
            name: self.name.clone(),
            description: self.description.clone().filter(|d| !d.is_empty()),
            memory: flags.memory,
            quiesce: flags.quiesce,
        }
    }
}
