//! # 动作执行层
//!
//! 将代理决策的动作批次归一化为内部动作模型，并以并行或严格顺序两种模式执行。
//!
//! ## 主要功能
//! - **动作模型**: 按键 / 按钮 / 滑块 / 滑动 / 等待的带标签联合类型
//! - **归一化**: 在批次入口将异构动作表示转换为统一内部形式
//! - **单动作执行**: 通过驱动能力执行一个具体动作
//! - **批次调度**: 按键复位括号内的并行或顺序执行，单个失败绝不中止批次
//!
//! ## 模块结构
//! - `types`: 动作联合类型与归一化
//! - `executor`: 单动作执行器
//! - `scheduler`: 批次调度器

pub mod types;
pub mod executor;
pub mod scheduler;


pub use executor::{ActionExecutor, RESET_KEYS};
pub use scheduler::ActionScheduler;
pub use types::{Action, ActionOutcome, BatchStatus, RawAction};
