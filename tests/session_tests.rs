use mode_runner::mode::load_mode_file;
use mode_runner::{ModeError, ModeSession, RecordingExecutor};
use std::path::Path;
use std::sync::Arc;

const NETSTAT_OUTPUT: &str = "  TCP    0.0.0.0:5520           0.0.0.0:0              LISTENING       24536\r\n\
  TCP    127.0.0.1:5520         127.0.0.1:50312        ESTABLISHED     24536\r\n\
  TCP    [::]:5520              [::]:0                 LISTENING       24536\r\n\
\r\n\
  UDP    0.0.0.0:5520           *:*                                    900\r\n";

async fn netstat_session(executor: Arc<RecordingExecutor>) -> ModeSession {
    let session = ModeSession::new(executor);
    let doc = load_mode_file(Path::new("modes/netstat.json")).unwrap();
    session.load_mode(&doc).await.unwrap();
    session
}

#[tokio::test]
async fn test_search_to_action_cycle() {
    let executor = Arc::new(
        RecordingExecutor::new().with_output("netstat -ano | findstr 5520", NETSTAT_OUTPUT),
    );
    let mut session = netstat_session(executor.clone()).await;

    let rows = session.search("5520").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cells, vec!["TCP", "0.0.0.0:5520", "0.0.0.0:0", "24536"]);
    assert_eq!(rows[1].cells, vec!["TCP", "[::]:5520", "[::]:0", "24536"]);

    let actions = session.resolve_actions(&[0]).await.unwrap();
    let names: Vec<_> = actions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["End process", "Show process"]);
    assert_eq!(actions[0].bound_command, "taskkill /pid 24536 /f");

    let report = session.invoke(&actions[0], &[0, 1]).await.unwrap();
    assert_eq!(report.ran, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.refresh_requested);

    let reselected = session.refresh(&[0, 1]).await.unwrap();
    assert_eq!(reselected, vec![0, 1]);

    assert_eq!(
        executor.executed(),
        vec![
            "netstat -ano | findstr 5520",
            "taskkill /pid 24536 /f",
            "taskkill /pid 24536 /f",
            "netstat -ano | findstr 5520",
        ]
    );
}

#[tokio::test]
async fn test_process_key_uses_second_rule() {
    let executor = Arc::new(RecordingExecutor::new().with_output(
        "tasklist | findstr /i chrome.exe",
        "chrome.exe                   1200 Console                    1    215,344 K\n\
         chrome.exe                   1388 Console                    1     12,004 K\n",
    ));
    let mut session = netstat_session(executor.clone()).await;

    let rows = session.search("chrome.exe").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].cells[1], "1388");

    let actions = session.resolve_actions(&[1]).await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].bound_command, "taskkill /pid 1388 /f");
}

#[tokio::test]
async fn test_unknown_key() {
    let executor = Arc::new(RecordingExecutor::new());
    let mut session = netstat_session(executor.clone()).await;

    let err = session.search("two words").await.unwrap_err();
    assert!(matches!(err, ModeError::NoRuleMatched { .. }));
    assert!(executor.executed().is_empty());
}

#[tokio::test]
async fn test_mixed_selection_offers_nothing() {
    let executor = Arc::new(RecordingExecutor::new().with_output(
        "netstat -ano | findstr 1",
        "TCP 0.0.0.0:1 0.0.0.0:0 LISTENING 1\nsvchost.exe 1 Services 0 9,000 K\n",
    ));
    let mut session = netstat_session(executor).await;

    let rows = session.search("1").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(session.resolve_actions(&[0, 1]).await.unwrap().is_empty());
    assert_eq!(session.resolve_actions(&[1]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_after_load_is_lossless() {
    let executor = Arc::new(RecordingExecutor::new());
    let session = netstat_session(executor).await;
    let doc = load_mode_file(Path::new("modes/netstat.json")).unwrap();
    assert_eq!(session.save_mode().await, doc);
}
