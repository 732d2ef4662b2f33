//! 结果输出

use std::io::{self, Write};

use vsnap_vim::{SnapshotInfo, SnapshotTree};

use crate::poll::PollOutcome;

/// 虚拟机没有快照信息时的提示
pub const NO_SNAPSHOTS_MESSAGE: &str = "No other snapshots currently exist. There was an error or the snapshot happened too quickly to register.";

/// 输出任务最终状态
pub fn write_status<W: Write + ?Sized>(out: &mut W, outcome: &PollOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Snapshot final status after {} seconds: {}",
        outcome.elapsed, outcome.state
    )
}

/// 快照树最左侧路径：每一层只取第一个节点，兄弟节点不看
pub fn leftmost_path(info: &SnapshotInfo) -> Vec<&SnapshotTree> {
    let mut path = Vec::new();
    let mut level = &info.root_snapshot_list;

    while let Some(first) = level.first() {
        path.push(first);
        level = &first.child_snapshot_list;
    }

    path
}

/// 输出快照树
pub fn write_snapshot_tree<W: Write + ?Sized>(
    out: &mut W,
    info: Option<&SnapshotInfo>,
) -> io::Result<()> {
    let Some(info) = info else {
        return writeln!(out, "{}", NO_SNAPSHOTS_MESSAGE);
    };

    writeln!(out, "Existing snapshots:")?;
    for node in leftmost_path(info) {
        writeln!(out, "Snap: {} => {}", node.name, node.description)?;
    }
    Ok(())
}
