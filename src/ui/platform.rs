//! 平台能力：打印、滚动
//!
//! 控制器只通过这个 trait 触达宿主环境。

use std::sync::Mutex;
use tracing::info;

pub trait Platform: Send + Sync {
    /// 调用宿主的打印能力
    fn print(&self);

    /// 平滑滚动，使目标顶部与视口顶部对齐
    fn scroll_into_view(&self, target: &str);
}

/// 只写日志的平台实现，命令行模式下使用
#[derive(Debug, Default)]
pub struct TracingPlatform;

impl Platform for TracingPlatform {
    fn print(&self) {
        info!("🖨️ 请求打印任务列表");
    }

    fn scroll_into_view(&self, target: &str) {
        info!("滚动到 #{}", target);
    }
}

/// 平台调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Print,
    Scroll { target: String },
}

/// 记录所有调用的平台实现
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, call: PlatformCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl Platform for RecordingPlatform {
    fn print(&self) {
        self.record(PlatformCall::Print);
    }

    fn scroll_into_view(&self, target: &str) {
        self.record(PlatformCall::Scroll {
            target: target.to_string(),
        });
    }
}
