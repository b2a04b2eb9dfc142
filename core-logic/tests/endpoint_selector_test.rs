use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use core_logic::rpc::first_reachable;
use core_logic::NetworkError;

#[tokio::test]
async fn first_responding_endpoint_wins_and_later_ones_are_not_probed() {
    let urls: Vec<String> = ["down-1", "down-2", "up", "never-touched"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let probes = AtomicUsize::new(0);

    let (index, selected) = first_reachable(&urls, |url| {
        probes.fetch_add(1, Ordering::SeqCst);
        async move {
            if url == "up" {
                Ok(url)
            } else {
                anyhow::bail!("unreachable")
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(index, 2);
    assert_eq!(selected, "up");
    // exactly three probes: the two failures plus the winner
    assert_eq!(probes.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn all_unreachable_is_a_fatal_selection_error() {
    let urls: Vec<String> = vec!["a".into(), "b".into(), "c".into()];

    let err = first_reachable::<(), _, _>(&urls, |_url| async { anyhow::bail!("down") })
        .await
        .unwrap_err();

    match err {
        NetworkError::NoUsableEndpoint { attempted } => assert_eq!(attempted, 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn connect_aborts_when_nothing_answers() {
    // discard port: refused immediately, no real traffic leaves the host
    let urls = vec![
        "http://127.0.0.1:9".to_string(),
        "http://127.0.0.1:9/rpc".to_string(),
    ];

    let err = core_logic::connect(&urls, None, Duration::from_millis(500))
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::NoUsableEndpoint { attempted: 2 }));
}
