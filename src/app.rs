//! 应用装配
//!
//! 持有页面和各控制器，把外部事件（提交、点击、滚动）分发给对应的控制器。

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{GeneratorClient, TaskTransport};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::task_type::{TaskType, ALL_TYPES_LABEL, ALL_TYPES_SENTINEL};
use crate::models::FormInput;
use crate::ui::{
    AnchorScroller, BatchSummary, ClickOutcome, EntranceObserver, FeedbackController, InfoCard,
    PageView, Platform, RequestController, SharedPage, TracingPlatform, Viewport,
};
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App<T: TaskTransport = GeneratorClient> {
    config: Config,
    page: SharedPage,
    requests: RequestController<T>,
    anchors: AnchorScroller,
    entrance: EntranceObserver,
    platform: Arc<dyn Platform>,
}

impl App<GeneratorClient> {
    /// 初始化应用：连接真实的生成服务
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);
        let transport = GeneratorClient::new(&config)?;
        Ok(Self::with_transport(
            config,
            transport,
            Arc::new(TracingPlatform),
            default_page(),
        ))
    }
}

impl<T: TaskTransport> App<T> {
    pub fn with_transport(
        config: Config,
        transport: T,
        platform: Arc<dyn Platform>,
        page: PageView,
    ) -> Self {
        let page = SharedPage::new(page);
        let feedback = FeedbackController::new(page.clone(), &config);
        let requests = RequestController::new(transport, feedback, config.verbose_logging);

        Self {
            config,
            page,
            requests,
            anchors: AnchorScroller,
            entrance: EntranceObserver::default(),
            platform,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.requests.transport()
    }

    pub fn page(&self) -> PageView {
        self.page.snapshot()
    }

    /// 表单提交
    pub async fn submit(&self, form: &FormInput) -> AppResult<BatchSummary> {
        self.requests.submit(form).await
    }

    /// 下拉框选项：优先使用服务端列表，失败时使用内置表
    pub async fn task_type_options(&self) -> Vec<(String, String)> {
        match self.requests.transport().task_types().await {
            Ok(types) if !types.is_empty() => {
                let all = types
                    .iter()
                    .find(|(key, _)| key == ALL_TYPES_SENTINEL)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_else(|| ALL_TYPES_LABEL.to_string());
                std::iter::once((ALL_TYPES_SENTINEL.to_string(), all))
                    .chain(
                        types
                            .into_iter()
                            .filter(|(key, _)| key != ALL_TYPES_SENTINEL),
                    )
                    .collect()
            }
            Ok(_) => TaskType::static_options(),
            Err(e) => {
                warn!("⚠️ 获取任务类型失败，使用内置列表: {}", e);
                TaskType::static_options()
            }
        }
    }

    pub fn click_anchor(&self, href: &str) -> ClickOutcome {
        self.anchors.on_click(href, &self.page, self.platform.as_ref())
    }

    pub fn scroll(&self, viewport: Viewport) -> Vec<String> {
        self.entrance.on_viewport_change(&self.page, viewport)
    }

    pub fn click_print(&self) -> bool {
        self.requests.feedback().click_print(self.platform.as_ref())
    }

    pub fn dismiss_alert(&self, id: u64) -> bool {
        self.requests.feedback().dismiss_alert(id)
    }

    pub fn toggle_solution(&self, card_id: i64) -> Option<bool> {
        self.requests.feedback().toggle_solution(card_id)
    }

    /// 将当前结果区域写入配置的输出文件
    pub async fn write_results_html(&self) -> AppResult<String> {
        let path = self.config.output_html_file.clone();
        let html = self.page.snapshot().results_html();
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| AppError::Output {
                path: path.clone(),
                source,
            })?;
        info!("📄 结果已写入: {}", path);
        Ok(path)
    }
}

/// 默认页面：生成器区域和"关于"区域的三张卡片
pub fn default_page() -> PageView {
    PageView::new()
        .with_anchor_target("generator", 0.0)
        .with_anchor_target("about", 1200.0)
        .with_about_cards(vec![
            InfoCard::new("about-method", 1300.0, 240.0),
            InfoCard::new("about-types", 1300.0, 240.0),
            InfoCard::new("about-solutions", 1600.0, 240.0),
        ])
}
