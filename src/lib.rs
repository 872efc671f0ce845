//! # Task Generator UI
//!
//! 组合数学考试题生成页面的客户端控制器：向生成服务请求一批题目，
//! 并把它们渲染为可交互的卡片（条件、分数/小数答案、可折叠的分步解答）。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 请求、响应、任务类型及其静态查找表
//!
//! ### ② 传输层（Clients）
//! - `TaskTransport` - 生成服务的抽象
//! - `GeneratorClient` - 基于 reqwest 的 HTTP 实现
//! - `ScriptedTransport` - 内存回放实现
//!
//! ### ③ 渲染层（Render）
//! - `render/solution` - 解答文本 → 展示块（纯函数）
//! - `render/card` - 一道题 → 一张卡片（纯函数）
//!
//! ### ④ 界面层（UI）
//! - `FeedbackController` - 结果区域状态机、提示框、打印按钮、入场动画
//! - `RequestController` - 校验 → 加载 → 请求 → 渲染/回退
//! - `AnchorScroller` / `EntranceObserver` - 锚点滚动与卡片入场
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod ui;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{GeneratorClient, ScriptedReply, ScriptedTransport, TaskTransport};
pub use config::Config;
pub use error::{AlertLevel, AppError, AppResult, ValidationError};
pub use models::{Difficulty, FormInput, GenerationRequest, GenerationResponse, Task, TaskType};
pub use render::{format_solution, render_card, SolutionBlock, TaskCard};
pub use ui::{FeedbackController, PageView, RequestController, SharedPage, UiState, ViewState};
