//! # 元素发现层
//!
//! 从运行中的游戏提取可交互元素，维护带 TTL 的快照缓存，并按类别提供可用动作视图。
//!
//! ## 主要功能
//! - **元素提取**: 按配置的组件类型描述符扫描场景对象
//! - **快照缓存**: TTL 内复用，整体替换，绝不增量修补
//! - **按 ID 查找**: 执行器通过 ID 快速定位元素
//! - **分类视图**: 按钮 / 滑块 / 2D 碰撞体分类，未识别类型归入按钮
//!
//! ## 模块结构
//! - `types`: 元素数据类型与分类表
//! - `cache`: 快照缓存实现

pub mod types;
pub mod cache;


pub use cache::ElementCache;
pub use types::{
    AvailableActions, ElementCategory, ElementSummary, InteractiveElement, KeyboardActions,
    SliderRange,
};
