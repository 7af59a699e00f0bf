//! End-to-end capture tests: scripted edges through the async task.
//!
//! All tests run on the paused tokio clock, so the inactivity window is
//! exercised deterministically and without real sleeping.

use std::time::Duration;
use tokio::sync::mpsc;
use wiegand_capture::{CaptureTask, MockWiegand, MockWiegandHandle};
use wiegand_core::FrameSnapshot;
use wiegand_core::constants::MAX_BITS;

const WINDOW: Duration = Duration::from_micros(3000);

fn spawn_capture() -> (MockWiegandHandle, mpsc::Receiver<FrameSnapshot>) {
    let (reader, handle) = MockWiegand::new();
    let (frames_tx, frames_rx) = mpsc::channel(8);
    tokio::spawn(CaptureTask::new(reader, WINDOW, frames_tx).run());
    (handle, frames_rx)
}

#[tokio::test(start_paused = true)]
async fn test_frame_completes_on_line_silence() {
    let (handle, mut frames) = spawn_capture();

    handle.present_bits("0110").await.unwrap();
    handle.silence(WINDOW * 2).await;

    let snapshot = frames.recv().await.unwrap();
    assert_eq!(snapshot.frame().to_binary_string(), "0110");
    assert_eq!(snapshot.holders().bit_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_silence_shorter_than_window_keeps_frame_open() {
    let (handle, mut frames) = spawn_capture();

    handle.present_bits("10").await.unwrap();
    handle.silence(WINDOW / 2).await;
    handle.present_bits("01").await.unwrap();
    handle.silence(WINDOW * 2).await;

    let snapshot = frames.recv().await.unwrap();
    assert_eq!(snapshot.frame().to_binary_string(), "1001");
}

#[tokio::test(start_paused = true)]
async fn test_two_frames_separated_by_silence() {
    let (handle, mut frames) = spawn_capture();

    handle.present_bits("101").await.unwrap();
    handle.silence(WINDOW * 2).await;
    handle.present_bits("0001").await.unwrap();
    handle.silence(WINDOW * 2).await;

    let first = frames.recv().await.unwrap();
    let second = frames.recv().await.unwrap();
    assert_eq!(first.frame().to_binary_string(), "101");
    assert_eq!(second.frame().to_binary_string(), "0001");
}

#[tokio::test(start_paused = true)]
async fn test_identical_frames_yield_identical_snapshots() {
    let (handle, mut frames) = spawn_capture();
    let bits = "00000001100000010011101010";

    handle.present_bits(bits).await.unwrap();
    handle.silence(WINDOW * 2).await;
    handle.present_bits(bits).await.unwrap();
    handle.silence(WINDOW * 2).await;

    let first = frames.recv().await.unwrap();
    let second = frames.recv().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_no_edges_no_frame() {
    let (handle, mut frames) = spawn_capture();

    handle.silence(WINDOW * 10).await;
    drop(handle);

    // Task exits without ever emitting.
    assert!(frames.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_overflow_burst_truncated_to_max_bits() {
    let (handle, mut frames) = spawn_capture();

    handle.present_bits(&"1".repeat(MAX_BITS + 20)).await.unwrap();
    handle.silence(WINDOW * 2).await;

    let snapshot = frames.recv().await.unwrap();
    assert_eq!(snapshot.bit_count(), MAX_BITS);
}

#[tokio::test(start_paused = true)]
async fn test_inflight_frame_flushed_on_disconnect() {
    let (handle, mut frames) = spawn_capture();

    handle.present_bits("111000").await.unwrap();
    drop(handle);

    let snapshot = frames.recv().await.unwrap();
    assert_eq!(snapshot.frame().to_binary_string(), "111000");
    assert!(frames.recv().await.is_none());
}
