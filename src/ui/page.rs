//! 页面文档模型
//!
//! 用内存中的结构代替 DOM：占位区、加载指示、结果区、统计文字、打印按钮、
//! 提示框，以及"关于"区域的静态卡片和可跳转的锚点目标。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::AlertLevel;
use crate::render::TaskCard;

/// 结果区域当前显示的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Results,
}

/// 对外可见的界面状态，提示框存在时叠加为 Error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Results,
    Error,
}

/// 提示框
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="alert alert-{} alert-dismissible fade show position-fixed top-0 start-50 translate-middle-x mt-3" style="z-index: 9999;" data-alert-id="{}">{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
            self.level.css_suffix(),
            self.id,
            self.message
        )
    }
}

/// 浮动打印按钮
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintButton {
    pub title: String,
}

impl PrintButton {
    pub const CLASS: &'static str = "print-btn";

    pub fn to_html(&self) -> String {
        format!(
            r#"<button class="{}" title="{}"><i class="bi bi-printer"></i></button>"#,
            Self::CLASS,
            self.title
        )
    }
}

impl Default for PrintButton {
    fn default() -> Self {
        Self {
            title: "Print tasks".to_string(),
        }
    }
}

/// "关于"区域的静态信息卡片
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub id: String,
    /// 相对文档顶部的位置（像素）
    pub top: f64,
    pub height: f64,
    pub classes: Vec<String>,
}

impl InfoCard {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
            classes: vec!["card".to_string()],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// 加载期间暂存的上一次结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSnapshot {
    pub cards: Vec<TaskCard>,
    pub summary: Option<String>,
    pub print_button: Option<PrintButton>,
}

/// 页面
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub view: ViewState,
    pub placeholder_visible: bool,
    pub loader_visible: bool,
    pub cards: Vec<TaskCard>,
    pub summary: Option<String>,
    pub print_button: Option<PrintButton>,
    pub alerts: Vec<Alert>,
    pub stashed: Option<ResultsSnapshot>,
    /// 每次插入新一批卡片时递增，过期的出现计时器据此失效
    pub render_generation: u64,
    pub about_cards: Vec<InfoCard>,
    /// 锚点目标：元素 id → 文档内位置
    pub anchor_targets: BTreeMap<String, f64>,
    next_alert_id: u64,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            view: ViewState::Idle,
            placeholder_visible: true,
            loader_visible: false,
            cards: Vec::new(),
            summary: None,
            print_button: None,
            alerts: Vec::new(),
            stashed: None,
            render_generation: 0,
            about_cards: Vec::new(),
            anchor_targets: BTreeMap::new(),
            next_alert_id: 1,
        }
    }
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_about_cards(mut self, cards: Vec<InfoCard>) -> Self {
        self.about_cards = cards;
        self
    }

    pub fn with_anchor_target(mut self, id: impl Into<String>, top: f64) -> Self {
        self.anchor_targets.insert(id.into(), top);
        self
    }

    pub fn ui_state(&self) -> UiState {
        if !self.alerts.is_empty() {
            return UiState::Error;
        }
        match self.view {
            ViewState::Idle => UiState::Idle,
            ViewState::Loading => UiState::Loading,
            ViewState::Results => UiState::Results,
        }
    }

    pub fn push_alert(&mut self, level: AlertLevel, message: impl Into<String>) -> u64 {
        let id = self.next_alert_id;
        self.next_alert_id += 1;
        self.alerts.push(Alert {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// 移除提示框，目标不存在时不做任何事
    pub fn remove_alert(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    pub fn card(&self, id: i64) -> Option<&TaskCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: i64) -> Option<&mut TaskCard> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    /// 结果区域的 HTML
    pub fn results_html(&self) -> String {
        let mut html = String::new();

        if let Some(summary) = &self.summary {
            html.push_str(&format!(r#"<p id="statsText">{}</p>"#, summary));
            html.push('\n');
        }
        if self.placeholder_visible {
            html.push_str(r#"<div id="placeholder"></div>"#);
            html.push('\n');
        }
        if self.loader_visible {
            html.push_str(r#"<div id="loader"></div>"#);
            html.push('\n');
        }

        html.push_str(r#"<div id="tasksContainer">"#);
        html.push('\n');
        for card in &self.cards {
            html.push_str(&card.to_html());
            html.push('\n');
        }
        html.push_str("</div>\n");

        if let Some(button) = &self.print_button {
            html.push_str(&button.to_html());
            html.push('\n');
        }
        for alert in &self.alerts {
            html.push_str(&alert.to_html());
            html.push('\n');
        }

        html
    }
}

/// 页面共享句柄
///
/// 所有修改都在短暂持锁期间完成，计时器持有克隆的句柄。
#[derive(Debug, Clone, Default)]
pub struct SharedPage(Arc<Mutex<PageView>>);

impl SharedPage {
    pub fn new(page: PageView) -> Self {
        Self(Arc::new(Mutex::new(page)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut PageView) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    pub fn snapshot(&self) -> PageView {
        self.with(|page| page.clone())
    }
}
