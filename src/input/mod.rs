//! # 输入层
//!
//! 提供键盘按键映射与坐标变换，将代理决策中的语义输入转换为驱动可执行的设备输入。
//!
//! ## 主要功能
//! - **按键映射**: 语义按键名到引擎按键码的静态映射表
//! - **坐标变换**: 游戏空间坐标到设备屏幕坐标的旋转感知变换
//!
//! ## 模块结构
//! - `keymap`: 按键码定义与映射表
//! - `translate`: 旋转分支坐标变换

pub mod keymap;
pub mod translate;

pub use keymap::{resolve_key, KeyCode};
pub use translate::translate;
