//! 解答格式化
//!
//! 按行把原始解答文本转换为展示块：
//! - 以 `**` 开头（忽略前导空白）的行是步骤标题，去掉所有 `**` 后展示
//! - 空行保留为间隔块
//! - 其余行原样作为正文
//!
//! 逐行独立分类，不做跨行合并或嵌套。

/// 步骤标题标记
pub const STEP_MARKER: &str = "**";

/// 解答展示块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionBlock {
    Heading(String),
    Body(String),
    Spacer,
}

impl SolutionBlock {
    /// 单行分类
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with(STEP_MARKER) {
            SolutionBlock::Heading(line.replace(STEP_MARKER, ""))
        } else if trimmed.is_empty() {
            SolutionBlock::Spacer
        } else {
            SolutionBlock::Body(line.to_string())
        }
    }

    /// 内容视为可信标记，不做转义
    pub fn to_html(&self) -> String {
        match self {
            SolutionBlock::Heading(text) => {
                format!(r#"<div class="fw-bold text-primary mt-3 mb-2">{}</div>"#, text)
            }
            SolutionBlock::Body(text) => format!(r#"<div class="solution-step">{}</div>"#, text),
            SolutionBlock::Spacer => r#"<div class="mb-2"></div>"#.to_string(),
        }
    }
}

/// 将解答文本格式化为展示块，输出顺序与输入行顺序一致
pub fn format_solution(raw: &str) -> Vec<SolutionBlock> {
    raw.split('\n').map(SolutionBlock::classify).collect()
}

pub fn solution_to_html(blocks: &[SolutionBlock]) -> String {
    blocks.iter().map(SolutionBlock::to_html).collect()
}
