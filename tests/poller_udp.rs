//! Poller integration tests using real UDP sockets on loopback.
//!
//! Each test stands up a fake device bound to 127.0.0.1:0 and points the
//! poller at the ephemeral port.

use std::time::Duration;

use tokio::net::UdpSocket;

use leontp_exporter::error::PollError;
use leontp_exporter::poller::StatusPoller;
use leontp_exporter::protocol::{NtpTimestamp, STATUS_REQUEST, StatusReply};

fn live_reply() -> StatusReply {
    StatusReply {
        reference_time: NtpTimestamp::new(4_000_000_000, 0),
        uptime_seconds: 86_400,
        ntp_requests_served: 500,
        command_requests_served: 12,
        lock_time_seconds: 3_600,
        flags: 0x01,
        satellites: 9,
        serial: 100,
        firmware_version: Some(0x0102_0304),
    }
}

/// Spawn a fake device that answers one status request with `reply_bytes`,
/// or swallows the request when `None`. Returns the device port.
async fn spawn_device(reply_bytes: Option<Vec<u8>>) -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut buf = [0u8; 64];
        if let Ok((len, src)) = socket.recv_from(&mut buf).await {
            assert_eq!(&buf[..len], &STATUS_REQUEST, "unexpected request bytes");
            if let Some(bytes) = reply_bytes {
                socket.send_to(&bytes, src).await.unwrap();
            } else {
                // Silent device: hold the socket open so no ICMP
                // port-unreachable is generated.
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    });
    port
}

// ===== Successful exchange =====

#[tokio::test]
async fn poll_decodes_well_formed_reply() {
    let port = spawn_device(Some(live_reply().encode().to_vec())).await;
    let poller = StatusPoller::with_port(port, Duration::from_secs(2));

    let reply = poller.poll("127.0.0.1").await.unwrap();
    assert_eq!(reply, live_reply());
    assert_eq!(reply.serial, 100);
    assert_eq!(reply.satellites, 9);
    assert!((reply.ntp_time() - 4_000_000_000.0).abs() < 1e-6);
}

#[tokio::test]
async fn poll_accepts_minimum_length_reply() {
    let bytes = live_reply().encode()[..StatusReply::MIN_SIZE].to_vec();
    let port = spawn_device(Some(bytes)).await;
    let poller = StatusPoller::with_port(port, Duration::from_secs(2));

    let reply = poller.poll("127.0.0.1").await.unwrap();
    assert_eq!(reply.firmware_version, None);
    assert_eq!(reply.serial, 100);
}

// ===== Failure stages =====

#[tokio::test]
async fn silent_device_times_out() {
    let port = spawn_device(None).await;
    let poller = StatusPoller::with_port(port, Duration::from_millis(200));

    let started = std::time::Instant::now();
    let err = poller.poll("127.0.0.1").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
    // The deadline bounds the exchange; it must not hang.
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn short_reply_is_a_parse_error() {
    let port = spawn_device(Some(vec![0u8; 20])).await;
    let poller = StatusPoller::with_port(port, Duration::from_secs(2));

    let err = poller.poll("127.0.0.1").await.unwrap_err();
    assert!(matches!(err, PollError::Parse(_)), "got {err}");
}

#[tokio::test]
async fn unresolvable_host_fails_cleanly() {
    // `.invalid` is reserved and never resolves. Depending on the resolver
    // this surfaces as a resolution error or, at worst, the poll deadline.
    let poller = StatusPoller::with_port(9123, Duration::from_secs(2));
    let err = poller.poll("leontp-device.invalid").await.unwrap_err();
    assert!(
        matches!(err, PollError::Resolve { .. } | PollError::Timeout { .. }),
        "got {err}"
    );
}

#[tokio::test]
async fn consecutive_polls_use_fresh_sockets() {
    // Two polls against two one-shot devices both succeed, so each
    // exchange owned and released its own socket.
    let port_a = spawn_device(Some(live_reply().encode().to_vec())).await;
    let port_b = spawn_device(Some(live_reply().encode().to_vec())).await;

    let poller_a = StatusPoller::with_port(port_a, Duration::from_secs(2));
    let poller_b = StatusPoller::with_port(port_b, Duration::from_secs(2));

    assert!(poller_a.poll("127.0.0.1").await.is_ok());
    assert!(poller_b.poll("127.0.0.1").await.is_ok());
}
