use serde::Serialize;

use crate::error::ValidationError;
use crate::models::task::Difficulty;
use crate::models::task_type::TaskType;

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 20;

/// 表单原始输入
///
/// 与页面控件一一对应：数量输入框、难度单选组、类型下拉框。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub count: String,
    /// 当前选中的单选值，未选中为 None
    pub difficulty: Option<String>,
    pub task_type: String,
}

impl FormInput {
    pub fn new(count: impl Into<String>, difficulty: &str, task_type: &str) -> Self {
        Self {
            count: count.into(),
            difficulty: Some(difficulty.to_string()),
            task_type: task_type.to_string(),
        }
    }
}

impl Default for FormInput {
    fn default() -> Self {
        Self::new("5", "medium", "all")
    }
}

/// 生成请求体
///
/// `task_type` 为 None 时序列化为 `null`，对应"全部类型"。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub count: i64,
    pub difficulty: Difficulty,
    pub task_type: Option<TaskType>,
}

impl GenerationRequest {
    /// 校验表单输入并构建请求
    pub fn from_form(form: &FormInput) -> Result<Self, ValidationError> {
        let raw = form.count.trim();
        let count: i64 = raw.parse().map_err(|_| ValidationError::CountNotANumber {
            raw: raw.to_string(),
        })?;

        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return Err(ValidationError::CountOutOfRange {
                count,
                min: MIN_COUNT,
                max: MAX_COUNT,
            });
        }

        let value = form
            .difficulty
            .as_deref()
            .ok_or(ValidationError::MissingDifficulty)?;
        let difficulty = Difficulty::parse(value).ok_or_else(|| ValidationError::UnknownDifficulty {
            value: value.to_string(),
        })?;

        Ok(Self {
            count,
            difficulty,
            task_type: TaskType::from_select(&form.task_type),
        })
    }
}
