//! # 游戏驱动层
//!
//! 定义本核心消费的抽象驱动能力：对象发现、属性读写、按键与触摸原语。
//! 具体的驱动传输（连接游戏进程的协议）不在本层范围内，由外部实现注入。
//!
//! ## 主要功能
//! - **对象发现**: 按组件类型描述符查找场景对象
//! - **元素句柄**: 针对单个元素读取属性、设置属性、发出点击
//! - **输入原语**: 按键按下/抬起、触摸开始/移动/结束
//! - **场景方法调用**: 调用指定场景组件上的方法（帧桥接使用）
//! - **边界提供者**: 报告设备旋转与应用屏幕矩形
//!
//! ## 模块结构
//! - `traits`: 驱动能力的核心 trait 定义与边界类型
//! - `mock`: 用于测试的 Mock 实现（记录全部输入原语）

pub mod traits;
pub mod mock;


pub use traits::{
    BoundsProvider, ComponentDescriptor, ElementHandle, GameDriver,
    Bounds, Rotation,
};

// Re-export mock for development/testing
pub use mock::{MockBoundsProvider, MockElementHandle, MockGameDriver};
