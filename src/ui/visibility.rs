//! 可见性观察
//!
//! 两个互不相关的行为：
//! - 页内锚点链接：阻止默认跳转，改为平滑滚动到目标
//! - "关于"区域卡片首次进入视口时添加入场样式，离开视口后不撤销

use tracing::debug;

use crate::ui::page::{InfoCard, SharedPage};
use crate::ui::platform::Platform;

/// 入场样式
pub const ENTRANCE_CLASS: &str = "animate-fade-in";
/// 触发所需的可见比例
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// 视口底部收缩量（像素），让动画在元素到达底边前触发
pub const DEFAULT_BOTTOM_MARGIN: f64 = -100.0;

/// 锚点点击的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub scrolled_to: Option<String>,
}

/// 页内锚点滚动
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorScroller;

impl AnchorScroller {
    pub fn on_click(&self, href: &str, page: &SharedPage, platform: &dyn Platform) -> ClickOutcome {
        let Some(target) = href.strip_prefix('#') else {
            return ClickOutcome {
                default_prevented: false,
                scrolled_to: None,
            };
        };

        let exists = !target.is_empty()
            && page.with(|page| {
                page.anchor_targets.contains_key(target)
                    || page.about_cards.iter().any(|card| card.id == target)
            });

        if !exists {
            debug!("锚点目标 #{} 不存在", target);
            return ClickOutcome {
                default_prevented: true,
                scrolled_to: None,
            };
        }

        platform.scroll_into_view(target);
        ClickOutcome {
            default_prevented: true,
            scrolled_to: Some(target.to_string()),
        }
    }
}

/// 视口（文档坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

/// 卡片入场观察器
#[derive(Debug, Clone, Copy)]
pub struct EntranceObserver {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl Default for EntranceObserver {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
        }
    }
}

impl EntranceObserver {
    /// 卡片在（收缩后的）视口内的可见比例
    pub fn intersection_ratio(&self, card: &InfoCard, viewport: Viewport) -> f64 {
        let root_top = viewport.scroll_top;
        let root_bottom = viewport.scroll_top + viewport.height + self.bottom_margin;
        let card_bottom = card.top + card.height;

        let visible = card_bottom.min(root_bottom) - card.top.max(root_top);
        if visible < 0.0 || root_bottom <= root_top {
            return 0.0;
        }
        if card.height <= 0.0 {
            return 1.0;
        }
        (visible / card.height).min(1.0)
    }

    /// 视口变化时调用，返回本次新触发入场样式的卡片
    pub fn on_viewport_change(&self, page: &SharedPage, viewport: Viewport) -> Vec<String> {
        page.with(|page| {
            let mut triggered = Vec::new();
            for card in page.about_cards.iter_mut() {
                if card.has_class(ENTRANCE_CLASS) {
                    continue;
                }
                let ratio = self.intersection_ratio(card, viewport);
                if ratio > 0.0 && ratio >= self.threshold {
                    card.classes.push(ENTRANCE_CLASS.to_string());
                    triggered.push(card.id.clone());
                }
            }
            if !triggered.is_empty() {
                debug!("卡片入场: {:?}", triggered);
            }
            triggered
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::page::PageView;
    use crate::ui::platform::{PlatformCall, RecordingPlatform};

    fn about_page() -> SharedPage {
        SharedPage::new(
            PageView::new()
                .with_about_cards(vec![
                    InfoCard::new("about-method", 1000.0, 200.0),
                    InfoCard::new("about-types", 1300.0, 200.0),
                ])
                .with_anchor_target("generator", 0.0)
                .with_anchor_target("about", 950.0),
        )
    }

    #[test]
    fn test_anchor_scrolls_smoothly() {
        let page = about_page();
        let platform = RecordingPlatform::new();

        let outcome = AnchorScroller.on_click("#about", &page, &platform);
        assert!(outcome.default_prevented);
        assert_eq!(outcome.scrolled_to.as_deref(), Some("about"));
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::Scroll {
                target: "about".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_anchor_is_noop() {
        let page = about_page();
        let platform = RecordingPlatform::new();

        for href in ["#nowhere", "#"] {
            let outcome = AnchorScroller.on_click(href, &page, &platform);
            assert!(outcome.default_prevented);
            assert_eq!(outcome.scrolled_to, None);
        }
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_external_link_is_not_intercepted() {
        let page = about_page();
        let platform = RecordingPlatform::new();

        let outcome = AnchorScroller.on_click("https://fipi.ru", &page, &platform);
        assert!(!outcome.default_prevented);
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_bottom_margin_delays_trigger() {
        let observer = EntranceObserver::default();
        let card = InfoCard::new("c", 1000.0, 200.0);

        // 视口底边 1050，收缩后 950：尚未进入
        let viewport = Viewport {
            scroll_top: 250.0,
            height: 800.0,
        };
        assert_eq!(observer.intersection_ratio(&card, viewport), 0.0);

        // 收缩后底边 1030：可见 30/200 = 0.15
        let viewport = Viewport {
            scroll_top: 330.0,
            height: 800.0,
        };
        let ratio = observer.intersection_ratio(&card, viewport);
        assert!((ratio - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_entrance_is_one_shot() {
        let page = about_page();
        let observer = EntranceObserver::default();

        let top = Viewport {
            scroll_top: 0.0,
            height: 800.0,
        };
        assert!(observer.on_viewport_change(&page, top).is_empty());

        // 第一张卡片可见 1050-1000=50 → 0.25；第二张不可见
        let middle = Viewport {
            scroll_top: 350.0,
            height: 800.0,
        };
        assert_eq!(observer.on_viewport_change(&page, middle), vec!["about-method"]);

        // 回到顶部不撤销，也不重复触发
        assert!(observer.on_viewport_change(&page, top).is_empty());
        let cards = page.snapshot().about_cards;
        assert!(cards[0].has_class(ENTRANCE_CLASS));
        assert!(!cards[1].has_class(ENTRANCE_CLASS));

        let bottom = Viewport {
            scroll_top: 1000.0,
            height: 800.0,
        };
        assert_eq!(observer.on_viewport_change(&page, bottom), vec!["about-types"]);
    }

    #[test]
    fn test_below_threshold_does_not_trigger() {
        let page = about_page();
        let observer = EntranceObserver::default();

        // 可见 10/200 = 0.05
        let viewport = Viewport {
            scroll_top: 310.0,
            height: 800.0,
        };
        assert!(observer.on_viewport_change(&page, viewport).is_empty());
    }
}
