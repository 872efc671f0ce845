//! 反馈控制器
//!
//! 结果区域的唯一写入方。状态：
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Results ──submit──▶ Loading ...
//!                     │
//!                     └──fail──▶ 上一次的 Results（若有）或 Idle
//! ```
//!
//! 提示框是叠加层，不替换上述状态；每个提示框有自己的自动消失计时器。
//! 计时器不会因状态变化被取消，目标已不存在时执行结果为空操作。

use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AlertLevel, AppError};
use crate::render::TaskCard;
use crate::ui::page::{PrintButton, ResultsSnapshot, SharedPage, ViewState};
use crate::ui::platform::Platform;

pub struct FeedbackController {
    page: SharedPage,
    alert_dismiss: Duration,
    reveal_initial: Duration,
    reveal_step: Duration,
}

impl FeedbackController {
    pub fn new(page: SharedPage, config: &Config) -> Self {
        Self::with_timings(
            page,
            config.alert_dismiss_delay(),
            config.reveal_initial_delay(),
            config.reveal_step(),
        )
    }

    pub fn with_timings(
        page: SharedPage,
        alert_dismiss: Duration,
        reveal_initial: Duration,
        reveal_step: Duration,
    ) -> Self {
        Self {
            page,
            alert_dismiss,
            reveal_initial,
            reveal_step,
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// 进入加载状态
    ///
    /// 已显示的结果被暂存并隐藏，只有新的成功结果才会真正替换它们。
    pub fn enter_loading(&self) {
        self.page.with(|page| {
            if page.view == ViewState::Results {
                page.stashed = Some(ResultsSnapshot {
                    cards: std::mem::take(&mut page.cards),
                    summary: page.summary.take(),
                    print_button: page.print_button.take(),
                });
            } else {
                page.cards.clear();
            }
            page.placeholder_visible = false;
            page.loader_visible = true;
            page.view = ViewState::Loading;
        });
        debug!("进入加载状态");
    }

    /// 展示新一批卡片
    pub fn show_results(&self, cards: Vec<TaskCard>, count: i64) {
        let card_count = cards.len();
        let generation = self.page.with(|page| {
            page.stashed = None;
            page.loader_visible = false;
            page.placeholder_visible = false;
            page.cards = cards;
            page.summary = Some(summary_text(count));
            // 替换旧按钮，始终最多一个
            if page.print_button.replace(PrintButton::default()).is_some() {
                debug!("移除旧的打印按钮");
            }
            page.view = ViewState::Results;
            page.render_generation += 1;
            page.render_generation
        });

        info!("✓ 已展示 {} 张任务卡片", card_count);
        self.schedule_reveal(generation, card_count);
    }

    /// 请求失败：提示错误，并回到上一次结果或占位状态
    pub fn fail(&self, error: &AppError) -> u64 {
        self.page.with(|page| {
            page.loader_visible = false;
            if page.view == ViewState::Loading {
                match page.stashed.take() {
                    Some(snapshot) => {
                        page.cards = snapshot.cards;
                        page.summary = snapshot.summary;
                        page.print_button = snapshot.print_button;
                        page.view = ViewState::Results;
                    }
                    None => {
                        page.placeholder_visible = true;
                        page.view = ViewState::Idle;
                    }
                }
            }
        });

        self.show_alert(error.alert_level(), format!("An error occurred: {}", error))
    }

    /// 显示提示框，到期后自动移除
    pub fn show_alert(&self, level: AlertLevel, message: impl Into<String>) -> u64 {
        let id = self.page.with(|page| page.push_alert(level, message));

        let page = self.page.clone();
        let delay = self.alert_dismiss;
        tokio::spawn(async move {
            sleep(delay).await;
            if page.with(|page| page.remove_alert(id)) {
                debug!("提示框 {} 已自动关闭", id);
            }
        });

        id
    }

    /// 用户手动关闭提示框
    pub fn dismiss_alert(&self, id: u64) -> bool {
        self.page.with(|page| page.remove_alert(id))
    }

    /// 点击打印按钮，页面上没有按钮时返回 false
    pub fn click_print(&self, platform: &dyn Platform) -> bool {
        let present = self.page.with(|page| page.print_button.is_some());
        if present {
            platform.print();
        }
        present
    }

    /// 展开/折叠某张卡片的解答
    pub fn toggle_solution(&self, card_id: i64) -> Option<bool> {
        self.page
            .with(|page| page.card_mut(card_id).map(TaskCard::toggle_solution))
    }

    /// 依次显示卡片：第 i 张在 initial + i * step 时出现
    fn schedule_reveal(&self, generation: u64, card_count: usize) {
        if card_count == 0 {
            return;
        }

        let page = self.page.clone();
        let start = Instant::now() + self.reveal_initial;
        let step = self.reveal_step;
        tokio::spawn(async move {
            for index in 0..card_count {
                sleep_until(start + step * index as u32).await;
                let applied = page.with(|page| {
                    if page.render_generation != generation {
                        return false;
                    }
                    if let Some(card) = page.cards.get_mut(index) {
                        card.revealed = true;
                    }
                    true
                });
                if !applied {
                    debug!("卡片批次 {} 已被替换，停止入场动画", generation);
                    return;
                }
            }
        });
    }
}

/// 统计文字
pub fn summary_text(count: i64) -> String {
    format!("Generated: {} tasks", count)
}
