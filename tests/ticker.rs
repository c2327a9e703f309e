use std::{sync::Arc, time::Duration};

use named_timers::{tasks::ticker_task, AppState, Phase, TimerStatus};

fn state() -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string()))
}

#[tokio::test(start_paused = true)]
async fn running_timer_counts_down_with_virtual_time() {
    let state = state();
    let id = state.add_timer("Focus").unwrap().id;

    let task = tokio::spawn(ticker_task(Arc::clone(&state), Duration::from_secs(1)));
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    let remaining = state.get(id).unwrap().remaining;
    assert_eq!(remaining, Duration::from_secs(2390));
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn ticker_finishes_running_timers_and_spares_paused_ones() {
    let state = state();
    let focus = state.add_timer("Focus").unwrap().id;
    let paused = state.add_timer("Later").unwrap().id;
    state.pause(paused).unwrap();

    let task = tokio::spawn(ticker_task(Arc::clone(&state), Duration::from_secs(1)));
    tokio::time::sleep(Duration::from_secs(2401)).await;

    let done = state.get(focus).unwrap();
    assert_eq!(done.status, TimerStatus::Finished);
    assert_eq!(done.remaining, Duration::ZERO);
    assert_eq!(done.phase, Phase::Done);

    let later = state.get(paused).unwrap();
    assert_eq!(later.status, TimerStatus::Paused);
    assert_eq!(later.remaining, Duration::from_secs(2400));
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn long_period_passes_the_whole_delta() {
    let state = state();
    let id = state.add_timer("Focus").unwrap().id;

    let task = tokio::spawn(ticker_task(Arc::clone(&state), Duration::from_secs(60)));
    tokio::time::sleep(Duration::from_secs(150)).await;

    assert_eq!(state.get(id).unwrap().remaining, Duration::from_secs(2280));
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn stalled_ticker_catches_up_with_one_large_delta() {
    let state = state();
    let id = state.add_timer("Focus").unwrap().id;

    let task = tokio::spawn(ticker_task(Arc::clone(&state), Duration::from_secs(1)));
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(state.get(id).unwrap().remaining, Duration::from_secs(2399));

    // Jump the clock as if the runtime had been blocked for 30 seconds.
    tokio::time::advance(Duration::from_secs(30)).await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    let remaining = state.get(id).unwrap().remaining;
    assert!(
        remaining <= Duration::from_millis(2_368_500) && remaining >= Duration::from_secs(2368),
        "remaining={remaining:?}"
    );

    // The next tick is a full period after the late one.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let after_next = state.get(id).unwrap().remaining;
    assert!(remaining - after_next <= Duration::from_secs(1), "after_next={after_next:?}");
    task.abort();
}
