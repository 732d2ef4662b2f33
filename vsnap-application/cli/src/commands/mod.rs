//! CLI 命令处理模块

pub mod snapshot; // 创建快照
