#![cfg(unix)]

use std::process::Command;
use std::time::{Duration, Instant};

use jsxt::CancelToken;
use jsxt::interrupt::cancel_on_signal;

#[test]
fn sigterm_cancels_the_token() {
    let token = CancelToken::new();
    cancel_on_signal(token.clone()).unwrap();

    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    while !token.is_cancelled() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(token.is_cancelled());
}
