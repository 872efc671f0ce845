//! 请求控制器
//!
//! 一次提交的完整流程：
//! 1. 校验表单（失败 → 警告提示，不发请求、不进入加载）
//! 2. 进入加载状态
//! 3. 发送一次生成请求
//! 4. 成功 → 逐条渲染卡片 → 展示结果；失败 → 错误提示并回退
//!
//! 不重试，不取消：新的提交直接发起新请求，先发出的请求若晚到，仍会覆盖结果。

use tracing::{debug, error, info, warn};

use crate::clients::TaskTransport;
use crate::error::{AlertLevel, AppResult};
use crate::models::{FormInput, GenerationRequest, GenerationResponse};
use crate::render::{render_card, TaskCard};
use crate::ui::feedback::FeedbackController;
use crate::utils::logging::{log_batch_rendered, truncate_text};

/// 一次成功提交的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// 实际展示的卡片数
    pub shown: usize,
    /// 损坏而跳过的记录数
    pub skipped: usize,
    /// 服务端声明的数量
    pub count: i64,
}

pub struct RequestController<T> {
    transport: T,
    feedback: FeedbackController,
    verbose_logging: bool,
}

impl<T: TaskTransport> RequestController<T> {
    pub fn new(transport: T, feedback: FeedbackController, verbose_logging: bool) -> Self {
        Self {
            transport,
            feedback,
            verbose_logging,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 处理一次表单提交
    ///
    /// 所有错误在返回前都已展示给用户。
    pub async fn submit(&self, form: &FormInput) -> AppResult<BatchSummary> {
        let request = match GenerationRequest::from_form(form) {
            Ok(request) => request,
            Err(e) => {
                warn!("⚠️ 表单校验失败: {}", e);
                self.feedback.show_alert(AlertLevel::Warning, e.to_string());
                return Err(e.into());
            }
        };

        self.feedback.enter_loading();
        info!(
            "📤 请求生成 {} 道题 (难度: {}, 类型: {})",
            request.count,
            request.difficulty,
            request
                .task_type
                .as_ref()
                .map_or("全部", |task_type| task_type.as_str())
        );

        match self.fetch(&request).await {
            Ok(response) => Ok(self.display(response)),
            Err(e) => {
                error!("❌ 生成任务失败: {}", e);
                self.feedback.fail(&e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        let body = self.transport.generate(request).await?;
        GenerationResponse::from_value(body)
    }

    /// 按数组顺序渲染卡片并展示
    fn display(&self, response: GenerationResponse) -> BatchSummary {
        let cards: Vec<TaskCard> = response
            .tasks
            .iter()
            .map(|task| {
                if self.verbose_logging {
                    debug!(
                        "[任务 {}] {} | {}",
                        task.id,
                        task.task_type,
                        truncate_text(&task.condition, 80)
                    );
                }
                render_card(task)
            })
            .collect();

        let summary = BatchSummary {
            shown: cards.len(),
            skipped: response.skipped,
            count: response.count,
        };

        self.feedback.show_results(cards, response.count);
        log_batch_rendered(summary.shown, summary.skipped, summary.count);
        summary
    }
}

impl<T> RequestController<T> {
    pub fn feedback(&self) -> &FeedbackController {
        &self.feedback
    }
}
