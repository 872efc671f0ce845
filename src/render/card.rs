//! 任务卡片渲染
//!
//! 纯函数：一道题 + 静态查找表 → 一张卡片。卡片本身不负责动画，
//! 整批插入后的依次出现由反馈控制器驱动。

use crate::models::{Difficulty, Task, TaskType};
use crate::render::solution::{format_solution, solution_to_html, SolutionBlock};

/// 一张任务卡片
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: i64,
    pub task_type: TaskType,
    pub icon: &'static str,
    pub type_label: &'static str,
    pub difficulty: Difficulty,
    pub condition: String,
    pub answer_line: String,
    pub solution: Vec<SolutionBlock>,
    /// 解答区域是否展开（默认折叠）
    pub solution_expanded: bool,
    /// 入场动画是否已执行
    pub revealed: bool,
}

/// 渲染一道题
pub fn render_card(task: &Task) -> TaskCard {
    TaskCard {
        id: task.id,
        task_type: task.task_type.clone(),
        icon: task.task_type.icon(),
        type_label: task.task_type.label(),
        difficulty: task.difficulty,
        condition: task.condition.clone(),
        answer_line: format_answer(&task.answer_fraction, task.answer),
        solution: format_solution(&task.solution),
        solution_expanded: false,
        revealed: false,
    }
}

/// 答案行：精确分数 ≈ 四位小数
pub fn format_answer(fraction: &str, value: f64) -> String {
    format!("{} ≈ {}", fraction, fixed4(value))
}

/// 保留四位小数，恰好落在中点时远离零舍入（`{:.4}` 在中点取偶）
fn fixed4(value: f64) -> String {
    let scaled = value * 1e4;
    // 乘积无舍入误差时才可能是真正的中点
    let exact = value.mul_add(1e4, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        format!("{:.4}", scaled.round() / 1e4)
    } else {
        format!("{:.4}", value)
    }
}

impl TaskCard {
    pub fn title(&self) -> String {
        format!("Task #{}", self.id)
    }

    /// 展开/折叠本卡片的解答，不影响其它卡片
    pub fn toggle_solution(&mut self) -> bool {
        self.solution_expanded = !self.solution_expanded;
        self.solution_expanded
    }

    pub fn css_class(&self) -> String {
        format!("card task-card type-{} shadow-sm mb-4", class_token(self.task_type.as_str()))
    }

    fn style(&self) -> &'static str {
        if self.revealed {
            "opacity: 1; transform: translateX(0); transition: all 0.5s ease;"
        } else {
            "opacity: 0; transform: translateX(-30px); transition: all 0.5s ease;"
        }
    }

    pub fn to_html(&self) -> String {
        let (button_class, collapse_class) = if self.solution_expanded {
            ("accordion-button", "accordion-collapse collapse show")
        } else {
            ("accordion-button collapsed", "accordion-collapse collapse")
        };

        format!(
            r##"<div class="{class}" style="{style}" data-task-id="{id}">
  <div class="task-header">
    <div class="d-flex justify-content-between align-items-center">
      <h5 class="mb-0"><i class="bi {icon} me-2"></i>{title}</h5>
      <div>
        <span class="badge {difficulty_class}">{difficulty_label}</span>
        <span class="badge bg-info ms-2">{type_label}</span>
      </div>
    </div>
  </div>
  <div class="task-body">
    <div class="mb-4">
      <h6 class="text-muted mb-2"><i class="bi bi-clipboard-check text-primary"></i> Condition:</h6>
      <p class="lead">{condition}</p>
    </div>
    <div class="answer-highlight mb-4"><i class="bi bi-check-circle me-2"></i>Answer: {answer}</div>
    <div class="accordion" id="accordion{id}">
      <div class="accordion-item">
        <h2 class="accordion-header">
          <button class="{button_class}" type="button" data-bs-toggle="collapse" data-bs-target="#solution{id}"><i class="bi bi-book me-2"></i>Show solution</button>
        </h2>
        <div id="solution{id}" class="{collapse_class}">
          <div class="accordion-body"><div class="solution-box">{solution}</div></div>
        </div>
      </div>
    </div>
  </div>
</div>"##,
            class = self.css_class(),
            style = self.style(),
            id = self.id,
            icon = self.icon,
            title = self.title(),
            difficulty_class = self.difficulty.badge_class(),
            difficulty_label = self.difficulty.badge_label(),
            type_label = self.type_label,
            condition = self.condition,
            answer = self.answer_line,
            button_class = button_class,
            collapse_class = collapse_class,
            solution = solution_to_html(&self.solution),
        )
    }
}

/// 服务端类型名只保留可用于 CSS 类名的字符
fn class_token(key: &str) -> String {
    let token: String = key
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if token.is_empty() {
        "unknown".to_string()
    } else {
        token
    }
}
