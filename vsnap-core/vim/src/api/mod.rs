//! VI/JSON API 模块
//!
//! 只封装快照流程需要的托管对象方法：
//! - SearchIndex 查找 (SearchIndexApi)
//! - 虚拟机快照 (VirtualMachineApi)
//! - 任务状态 (TaskApi)

pub mod search_index;
pub mod task;
pub mod virtual_machine;

pub use search_index::SearchIndexApi;
pub use task::TaskApi;
pub use virtual_machine::VirtualMachineApi;
