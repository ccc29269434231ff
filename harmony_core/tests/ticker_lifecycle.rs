//! Ticker thread lifecycle: ticks arrive, drop cancels and joins promptly.

use harmony_core::Ticker;
use std::time::{Duration, Instant};

#[test]
fn ticker_emits_ticks() {
    let ticker = Ticker::spawn(Duration::from_millis(5));
    let first = ticker.wait(Duration::from_secs(2));
    assert_eq!(first, Some(1));
    assert!(ticker.wait(Duration::from_secs(2)).is_some());
    assert!(ticker.last_emitted() >= 2);
}

#[test]
fn drop_does_not_wait_out_the_period() {
    let ticker = Ticker::spawn(Duration::from_secs(30));
    let start = Instant::now();
    drop(ticker);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn many_tickers_dont_leak_threads() {
    for _ in 0..20 {
        let ticker = Ticker::spawn(Duration::from_millis(2));
        std::thread::sleep(Duration::from_millis(5));
        let _ = ticker.drain();
        drop(ticker);
    }
}

#[test]
fn undrained_ticks_coalesce_without_blocking() {
    let ticker = Ticker::spawn(Duration::from_millis(1));
    std::thread::sleep(Duration::from_millis(150));
    // the thread keeps running instead of blocking on a full channel
    assert!(ticker.drain() >= 1);
    assert!(ticker.wait(Duration::from_secs(2)).is_some());
}

#[test]
fn zero_period_is_clamped() {
    let ticker = Ticker::spawn(Duration::ZERO);
    assert_eq!(ticker.period(), Duration::from_millis(1));
    assert!(ticker.wait(Duration::from_secs(2)).is_some());
}
