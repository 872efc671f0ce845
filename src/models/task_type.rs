use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 任务类型 → 图标
static TYPE_ICONS: phf::Map<&'static str, &'static str> = phf_map! {
    "exam_tickets" => "bi-journal-text",
    "tv_channels" => "bi-tv",
    "lottery" => "bi-ticket-perforated",
    "objects_selection" => "bi-boxes",
    "colored_balls" => "bi-circle-fill",
};

/// 任务类型 → 显示名称
static TYPE_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "exam_tickets" => "Exam tickets",
    "tv_channels" => "TV channels",
    "lottery" => "Lottery",
    "objects_selection" => "Objects selection",
    "colored_balls" => "Colored balls",
};

/// 未知类型使用的通用图标
pub const GENERIC_ICON: &str = "bi-question-circle";
/// 未知类型使用的通用名称
pub const GENERIC_LABEL: &str = "Other";

/// 表单中表示"全部类型"的取值
pub const ALL_TYPES_SENTINEL: &str = "all";
pub const ALL_TYPES_LABEL: &str = "All types (random mix)";

/// 任务类型
///
/// 服务端可能新增类型，因此这里不做枚举限制，未知类型在展示时回退到通用图标和名称。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskType(String);

impl TaskType {
    /// 客户端已知的类型（按展示顺序）
    pub const KNOWN: [&'static str; 5] = [
        "exam_tickets",
        "tv_channels",
        "lottery",
        "objects_selection",
        "colored_balls",
    ];

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        TYPE_ICONS.contains_key(self.0.as_str())
    }

    pub fn icon(&self) -> &'static str {
        TYPE_ICONS.get(self.0.as_str()).copied().unwrap_or(GENERIC_ICON)
    }

    pub fn label(&self) -> &'static str {
        TYPE_LABELS.get(self.0.as_str()).copied().unwrap_or(GENERIC_LABEL)
    }

    /// 从下拉框取值解析，`"all"` 表示不过滤
    pub fn from_select(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == ALL_TYPES_SENTINEL {
            None
        } else {
            Some(Self::new(value))
        }
    }

    /// 下拉框的静态选项（`"all"` 在最前）
    pub fn static_options() -> Vec<(String, String)> {
        std::iter::once((ALL_TYPES_SENTINEL.to_string(), ALL_TYPES_LABEL.to_string()))
            .chain(Self::KNOWN.iter().map(|key| {
                let label = TYPE_LABELS.get(*key).copied().unwrap_or(GENERIC_LABEL);
                (key.to_string(), label.to_string())
            }))
            .collect()
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
