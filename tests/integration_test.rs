use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use task_generator_ui::app::default_page;
use task_generator_ui::ui::{PlatformCall, RecordingPlatform, Viewport};
use task_generator_ui::{
    AlertLevel, App, Config, FormInput, ScriptedReply, ScriptedTransport, SolutionBlock, UiState,
    ViewState,
};
use tokio_test::{assert_err, assert_ok};

fn task(id: i64, task_type: &str) -> Value {
    json!({
        "id": id,
        "type": task_type,
        "difficulty": "easy",
        "condition": "There are 4 balls in the urn, one of them is red.",
        "answer": 0.25,
        "answer_fraction": "1/4",
        "solution": "**Step 1**\nPick a ball\n\nDone"
    })
}

fn batch(ids: &[i64]) -> Value {
    let tasks: Vec<Value> = ids.iter().map(|&id| task(id, "colored_balls")).collect();
    json!({ "success": true, "tasks": tasks, "count": ids.len() })
}

fn app_with(
    replies: Vec<ScriptedReply>,
) -> (App<ScriptedTransport>, Arc<RecordingPlatform>) {
    let platform = Arc::new(RecordingPlatform::new());
    let app = App::with_transport(
        Config::default(),
        ScriptedTransport::new(replies),
        platform.clone(),
        default_page(),
    );
    (app, platform)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_example_batch_end_to_end() {
    let body = json!({ "tasks": [task(1, "lottery")], "count": 1 });
    let (app, platform) = app_with(vec![ScriptedReply::body(body)]);

    assert_eq!(app.page().ui_state(), UiState::Idle);
    assert_ok!(app.submit(&FormInput::new("1", "easy", "all")).await);

    let page = app.page();
    assert_eq!(page.summary.as_deref(), Some("Generated: 1 tasks"));
    assert_eq!(page.cards.len(), 1);

    let card = &page.cards[0];
    assert_eq!(card.title(), "Task #1");
    assert_eq!(card.answer_line, "1/4 ≈ 0.2500");
    assert_eq!(card.type_label, "Lottery");
    assert!(!card.solution_expanded);
    assert_eq!(
        &card.solution[..3],
        &[
            SolutionBlock::Heading("Step 1".to_string()),
            SolutionBlock::Body("Pick a ball".to_string()),
            SolutionBlock::Spacer,
        ]
    );

    // 入场动画
    assert!(!card.revealed);
    advance(20).await;
    assert!(app.page().cards[0].revealed);

    // 展开解答、打印
    assert_eq!(app.toggle_solution(1), Some(true));
    assert!(app.click_print());
    assert_eq!(platform.calls(), vec![PlatformCall::Print]);

    let html = app.page().results_html();
    assert!(html.contains("Generated: 1 tasks"));
    assert!(html.contains(r#"class="accordion-collapse collapse show""#));
    assert!(html.contains(r#"class="print-btn""#));
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_keeps_results_and_alert_expires() {
    let (app, _) = app_with(vec![
        ScriptedReply::body(batch(&[1, 2, 3])),
        ScriptedReply::network_error("connection reset by peer"),
    ]);

    assert_ok!(app.submit(&FormInput::new("3", "medium", "all")).await);
    let err = assert_err!(app.submit(&FormInput::new("3", "medium", "all")).await);
    assert!(err.to_string().contains("connection reset by peer"));

    let page = app.page();
    assert_eq!(page.view, ViewState::Results);
    assert_eq!(page.cards.len(), 3);
    assert!(!page.loader_visible);
    assert_eq!(page.alerts.len(), 1);
    assert_eq!(page.alerts[0].level, AlertLevel::Danger);
    assert!(page.alerts[0]
        .message
        .starts_with("An error occurred: "));
    assert_eq!(page.ui_state(), UiState::Error);

    advance(4_900).await;
    assert_eq!(app.page().alerts.len(), 1);

    advance(200).await;
    let page = app.page();
    assert!(page.alerts.is_empty());
    assert_eq!(page.ui_state(), UiState::Results);
    assert_eq!(page.cards.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_restores_placeholder() {
    let (app, _) = app_with(vec![ScriptedReply::status(503)]);

    assert_err!(app.submit(&FormInput::new("2", "hard", "lottery")).await);

    let page = app.page();
    assert_eq!(page.view, ViewState::Idle);
    assert!(page.placeholder_visible);
    assert!(!page.loader_visible);
    assert!(page.summary.is_none());
    assert!(page.print_button.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_validation_alert_without_network() {
    let (app, _) = app_with(vec![]);

    assert_err!(app.submit(&FormInput::new("25", "easy", "all")).await);

    assert!(app.transport().requests().is_empty());
    let page = app.page();
    assert_eq!(page.view, ViewState::Idle);
    assert_eq!(page.alerts.len(), 1);
    assert_eq!(page.alerts[0].level, AlertLevel::Warning);

    assert!(app.dismiss_alert(page.alerts[0].id));
    assert_eq!(app.page().ui_state(), UiState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_last_resolved_response_wins() {
    // 第一次提交较慢，晚于第二次返回
    let (app, _) = app_with(vec![
        ScriptedReply::body(batch(&[1, 2])).after(Duration::from_millis(300)),
        ScriptedReply::body(batch(&[7, 8, 9])).after(Duration::from_millis(100)),
    ]);

    let first = FormInput::new("2", "easy", "all");
    let second = FormInput::new("3", "easy", "all");
    let (a, b) = tokio::join!(app.submit(&first), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let loading = app.page();
        assert_eq!(loading.view, ViewState::Loading);
        app.submit(&second).await
    });
    assert_ok!(a);
    assert_ok!(b);

    assert_eq!(app.transport().requests().len(), 2);
    let page = app.page();
    assert_eq!(
        page.cards.iter().map(|card| card.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(page.summary.as_deref(), Some("Generated: 2 tasks"));
    assert!(page.print_button.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_about_cards_and_anchors() {
    let (app, platform) = app_with(vec![]);

    let outcome = app.click_anchor("#about");
    assert!(outcome.default_prevented);

    let triggered = app.scroll(Viewport {
        scroll_top: 700.0,
        height: 900.0,
    });
    assert_eq!(triggered, vec!["about-method", "about-types"]);

    let triggered = app.scroll(Viewport {
        scroll_top: 0.0,
        height: 900.0,
    });
    assert!(triggered.is_empty());

    assert_eq!(platform.calls().len(), 1);
}

#[tokio::test]
async fn test_task_type_options_put_all_first() {
    let (app, _) = app_with(vec![]);

    let options = app.task_type_options().await;
    assert_eq!(options[0].0, "all");
    assert_eq!(options.len(), 6);
}

#[tokio::test]
async fn test_write_results_html() {
    let path = std::env::temp_dir().join("task_generator_ui_results_test.html");
    let config = Config {
        output_html_file: path.display().to_string(),
        ..Config::default()
    };
    let app = App::with_transport(
        config,
        ScriptedTransport::new(vec![ScriptedReply::body(batch(&[4]))]),
        Arc::new(RecordingPlatform::new()),
        default_page(),
    );

    assert_ok!(app.submit(&FormInput::new("1", "easy", "all")).await);
    let written = assert_ok!(app.write_results_html().await);

    let html = std::fs::read_to_string(&written).unwrap();
    assert!(html.contains("Task #4"));
    let _ = std::fs::remove_file(&written);
}

#[tokio::test]
#[ignore] // 需要本地运行生成服务：cargo test -- --ignored
async fn test_live_backend() {
    task_generator_ui::utils::logging::init(true);

    let app = App::initialize(Config::from_env()).expect("创建应用失败");
    let summary = app
        .submit(&FormInput::new("3", "medium", "all"))
        .await
        .expect("生成任务失败");

    assert_eq!(summary.shown, 3);
    assert_eq!(app.page().cards.len(), 3);
}
