use labeler_api::server::{AppState, serve};
use labeler_api::types::{ApiErrorResponse, ApiResponse, ClickRequest, JumpRequest, SessionViewResponse};
use labeler_session::SessionManager;
use labeler_store::FileDatasetStore;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

const MT5_EXPORT: &str = "<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>
2023.09.01\t00:00:00\t1.0\t1.2\t0.9\t1.1\t12
2023.09.01\t00:15:00\t1.1\t1.6\t1.0\t1.5\t11
2023.09.01\t00:30:00\t1.5\t1.9\t1.4\t1.8\t10
";

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server() -> (String, PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = tmp_dir.path().join("mt5_data.csv");
    let output = tmp_dir.path().join("labeled_data.csv");
    std::fs::write(&input, MT5_EXPORT).unwrap();

    let store = Arc::new(FileDatasetStore::new(&input, &output));
    let session_manager = SessionManager::start(store, 2).await.unwrap();
    let state = AppState { session_manager };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });

    (addr, output, tmp_dir)
}

async fn post(client: &reqwest::Client, url: String) -> ApiResponse<SessionViewResponse> {
    let res = client.post(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_full_api_workflow() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let (base_url, output, _tmp) = spawn_test_server().await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: 初始视图
    // ============================================
    let res = client
        .get(format!("{}/api/v1/session", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<SessionViewResponse> = res.json().await.unwrap();
    assert!(body.success);
    let view = body.data.unwrap();
    assert_eq!(view.page_info, "Page 1 / 2");
    assert_eq!(view.chart.layout.title, "Page 1 of 2");
    assert_eq!(view.chart.primary.points.len(), 2);
    assert_eq!(view.chart.primary.points[0].time, "2023-09-01 00:00:00");
    assert!(view.chart.markers.is_none());

    // ============================================
    // Case 2: 翻页与越界跳转
    // ============================================
    let view = post(&client, format!("{}/api/v1/session/next", base_url))
        .await
        .data
        .unwrap();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.chart.layout.view_revision, "page-1");
    assert_eq!(view.chart.primary.points.len(), 1);

    let res = client
        .post(format!("{}/api/v1/session/jump", base_url))
        .json(&JumpRequest::new(9))
        .send()
        .await
        .unwrap();
    let view = res.json::<ApiResponse<SessionViewResponse>>().await.unwrap().data.unwrap();
    assert_eq!(view.jump_value, 2);

    // 数字输入框上报的浮点页码按整数处理
    let res = client
        .post(format!("{}/api/v1/session/jump", base_url))
        .json(&JumpRequest::new(1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view = res.json::<ApiResponse<SessionViewResponse>>().await.unwrap().data.unwrap();
    assert_eq!(view.current_page, 0);
    let view = post(&client, format!("{}/api/v1/session/next", base_url))
        .await
        .data
        .unwrap();
    assert_eq!(view.current_page, 1);

    // ============================================
    // Case 3: 点击其他页的 K 线并保存
    // ============================================
    let res = client
        .post(format!("{}/api/v1/session/click", base_url))
        .json(&ClickRequest {
            time: "2023-09-01 00:15".to_string(),
        })
        .send()
        .await
        .unwrap();
    let view = res.json::<ApiResponse<SessionViewResponse>>().await.unwrap().data.unwrap();
    assert_eq!(view.labeled_candles, 1);
    // 被标注的 K 线不在当前页
    assert!(view.chart.markers.is_none());

    let view = post(&client, format!("{}/api/v1/session/save", base_url))
        .await
        .data
        .unwrap();
    assert_eq!(view.save_status, "Saved!");
    let saved = std::fs::read_to_string(&output).unwrap();
    assert!(saved.contains("2023-09-01 00:15:00,1.1,1.6,1,1.5,True"));

    // 仅查看不会清除保存状态
    let res = client
        .get(format!("{}/api/v1/session", base_url))
        .send()
        .await
        .unwrap();
    let view = res.json::<ApiResponse<SessionViewResponse>>().await.unwrap().data.unwrap();
    assert_eq!(view.save_status, "Saved!");

    let view = post(&client, format!("{}/api/v1/session/previous", base_url))
        .await
        .data
        .unwrap();
    assert_eq!(view.save_status, "");
    let markers = view.chart.markers.unwrap();
    assert_eq!(markers.points[0].time, "2023-09-01 00:15:00");
    assert_eq!(markers.points[0].y, 1.6);
    assert_eq!(markers.style.symbol, "triangle-down");

    // ============================================
    // Case 4: 重新加载失败时会话保持不变
    // ============================================
    std::fs::write(&output, "time,open\nbroken,1\n").unwrap();
    let res = client
        .post(format!("{}/api/v1/session/reload", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ApiErrorResponse = res.json().await.unwrap();
    assert!(!err.success);

    let res = client
        .get(format!("{}/api/v1/session", base_url))
        .send()
        .await
        .unwrap();
    let view = res.json::<ApiResponse<SessionViewResponse>>().await.unwrap().data.unwrap();
    assert_eq!(view.labeled_candles, 1);
    assert_eq!(view.current_page, 0);

    // ============================================
    // Case 5: 重新加载成功后从进度文件恢复
    // ============================================
    std::fs::write(
        &output,
        "time,open,high,low,close,label_breakout\n2023-09-01 00:30:00,1.5,1.9,1.4,1.8,True\n",
    )
    .unwrap();
    let view = post(&client, format!("{}/api/v1/session/reload", base_url))
        .await
        .data
        .unwrap();
    assert_eq!(view.total_candles, 1);
    assert_eq!(view.labeled_candles, 1);
    assert_eq!(view.page_info, "Page 1 / 1");
}

#[tokio::test]
async fn test_openapi_document_lists_session_routes() {
    let (base_url, _output, _tmp) = spawn_test_server().await;
    let res = reqwest::get(format!("{}/api-docs/openapi.json", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = res.json().await.unwrap();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/v1/session",
        "/api/v1/session/previous",
        "/api/v1/session/next",
        "/api/v1/session/jump",
        "/api/v1/session/click",
        "/api/v1/session/save",
        "/api/v1/session/reload",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}
