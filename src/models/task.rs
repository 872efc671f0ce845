use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::task_type::TaskType;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 难度徽章文字
    pub fn badge_label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 难度徽章样式
    pub fn badge_class(self) -> &'static str {
        match self {
            Difficulty::Easy => "bg-success",
            Difficulty::Medium => "bg-warning text-dark",
            Difficulty::Hard => "bg-danger",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 服务端生成的一道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub difficulty: Difficulty,
    pub condition: String,
    pub answer: f64,
    pub answer_fraction: String,
    pub solution: String,
}

/// 生成接口的响应
///
/// `count` 用于统计文字，`tasks` 用于展示，两者互不校验。
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    pub tasks: Vec<Task>,
    pub count: i64,
    /// 无法解析而被跳过的记录数
    pub skipped: usize,
}

impl GenerationResponse {
    /// 解析响应体
    ///
    /// 单条记录损坏只会跳过该记录；响应体本身不是带 `tasks` 数组的对象时才整体失败。
    pub fn from_value(body: Value) -> AppResult<Self> {
        let Value::Object(mut object) = body else {
            return Err(AppError::malformed("response body is not a JSON object"));
        };

        let raw_tasks = match object.remove("tasks") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(AppError::malformed("`tasks` is not an array")),
            None => return Err(AppError::malformed("missing `tasks` field")),
        };
        let raw_len = raw_tasks.len();

        let mut tasks = Vec::with_capacity(raw_len);
        let mut skipped = 0;
        for (index, raw) in raw_tasks.into_iter().enumerate() {
            match serde_json::from_value::<Task>(raw) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    skipped += 1;
                    warn!("⚠️ 跳过第 {} 条无法解析的任务记录: {}", index + 1, e);
                }
            }
        }

        let count = object
            .get("count")
            .and_then(Value::as_i64)
            .unwrap_or(raw_len as i64);

        Ok(Self {
            tasks,
            count,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lottery_task(id: i64) -> Value {
        json!({
            "id": id,
            "type": "lottery",
            "difficulty": "easy",
            "condition": "A ball is drawn from the urn.",
            "answer": 0.25,
            "answer_fraction": "1/4",
            "solution": "**Step 1**\nPick a ball\n\nDone"
        })
    }

    #[test]
    fn test_parse_full_batch() {
        let body = json!({
            "success": true,
            "tasks": [lottery_task(1), lottery_task(2)],
            "count": 2
        });

        let response = GenerationResponse::from_value(body).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.skipped, 0);
        assert_eq!(
            response.tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(response.tasks[0].difficulty, Difficulty::Easy);
        assert_eq!(response.tasks[0].task_type, TaskType::new("lottery"));
    }

    #[test]
    fn test_bad_record_does_not_sink_batch() {
        let body = json!({
            "tasks": [lottery_task(1), {"id": "two", "type": "lottery"}, lottery_task(3)],
            "count": 3
        });

        let response = GenerationResponse::from_value(body).unwrap();
        assert_eq!(response.skipped, 1);
        assert_eq!(
            response.tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        // count 与 tasks 长度不做强制一致
        assert_eq!(response.count, 3);
    }

    #[test]
    fn test_unknown_type_is_accepted() {
        let mut raw = lottery_task(7);
        raw["type"] = json!("dice_rolls");
        let body = json!({ "tasks": [raw], "count": 1 });

        let response = GenerationResponse::from_value(body).unwrap();
        assert_eq!(response.tasks[0].task_type.as_str(), "dice_rolls");
    }

    #[test]
    fn test_missing_count_falls_back_to_array_length() {
        let body = json!({ "tasks": [lottery_task(1), {"broken": true}] });
        let response = GenerationResponse::from_value(body).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.tasks.len(), 1);
    }

    #[test]
    fn test_malformed_bodies() {
        for body in [json!([1, 2]), json!({"count": 1}), json!({"tasks": "nope"})] {
            let err = GenerationResponse::from_value(body).unwrap_err();
            assert!(matches!(err, AppError::MalformedData { .. }));
        }

        let err = serde_json::from_str::<Value>("<html>oops</html>")
            .map_err(AppError::from)
            .and_then(GenerationResponse::from_value)
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedData { .. }));
    }

    #[test]
    fn test_difficulty_badges() {
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("extreme"), None);
        assert_eq!(Difficulty::Hard.badge_class(), "bg-danger");
        assert_eq!(Difficulty::Easy.badge_label(), "Easy");
    }
}
