pub mod feedback;
pub mod page;
pub mod platform;
pub mod request_controller;
pub mod visibility;

pub use feedback::{summary_text, FeedbackController};
pub use page::{Alert, InfoCard, PageView, PrintButton, SharedPage, UiState, ViewState};
pub use platform::{Platform, PlatformCall, RecordingPlatform, TracingPlatform};
pub use request_controller::{BatchSummary, RequestController};
pub use visibility::{AnchorScroller, ClickOutcome, EntranceObserver, Viewport};
