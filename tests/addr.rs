extern crate bsd_addr;
extern crate env_logger;

use std::net::{SocketAddr, TcpListener, TcpStream};

use bsd_addr::{AddrError, SockAddr};

fn v4(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

#[test]
fn empty_record() {
    let addr = SockAddr::new();
    assert!(addr.is_empty());
    assert_eq!(addr.len(), 0);
    assert_eq!(addr.family(), 0);
    assert_eq!(addr.ip(), None);
    assert_eq!(addr.ip_len(), None);
    assert_eq!(addr.port(), None);
    assert!(addr.native().is_empty());
    assert_eq!(addr.to_socket_addr(), Err(AddrError::UnsupportedFamily(0)));
}

#[test]
fn populate_round_trip() {
    let native = SockAddr::from(v4("10.1.2.3:443")).native().to_vec();

    let mut addr = SockAddr::new();
    addr.populate(&native).unwrap();
    assert_eq!(addr.native(), native.as_slice());
    assert_eq!(addr.len(), native.len());
    assert_eq!(addr.to_socket_addr(), Ok(v4("10.1.2.3:443")));
}

#[test]
fn populate_oversize_is_rejected() {
    let mut addr = SockAddr::from(v4("10.1.2.3:443"));
    addr.format().unwrap();
    let before = addr.clone();

    let cap = addr.capacity();
    let huge = vec![0u8; cap + 1];
    assert_eq!(
        addr.populate(&huge),
        Err(AddrError::InvalidLength {
            len: cap + 1,
            capacity: cap,
        })
    );
    // No partial copy, caches intact.
    assert_eq!(addr, before);
}

#[test]
fn populate_at_capacity() {
    let mut addr = SockAddr::new();
    let max = vec![0u8; addr.capacity()];
    addr.populate(&max).unwrap();
    assert_eq!(addr.len(), addr.capacity());
}

#[test]
fn populate_drops_stale_cache() {
    let mut addr = SockAddr::from(v4("127.0.0.1:8080"));
    addr.format().unwrap();
    assert_eq!(addr.ip(), Some("127.0.0.1"));

    let native = SockAddr::from(v4("10.1.2.3:443")).native().to_vec();
    addr.populate(&native).unwrap();
    assert_eq!(addr.ip(), None);
    assert_eq!(addr.port(), None);
    addr.format().unwrap();
    assert_eq!(addr.ip(), Some("10.1.2.3"));
    assert_eq!(addr.port(), Some(443));
}

#[test]
fn set_ip_twice_keeps_last() {
    let mut addr = SockAddr::new();
    addr.set_ip("192.168.0.1".to_string());
    addr.set_ip("10.0.0.1");
    assert_eq!(addr.ip(), Some("10.0.0.1"));
    assert_eq!(addr.ip_len(), Some(8));
}

#[test]
fn clear_is_idempotent() {
    let mut addr = SockAddr::new();
    addr.clear();
    addr.clear();
    assert!(addr.is_empty());

    let mut addr = SockAddr::from(v4("127.0.0.1:8080"));
    addr.set_ip("127.0.0.1");
    addr.set_port(8080);
    addr.clear();
    assert!(addr.is_empty());
    assert_eq!(addr.ip(), None);
    assert_eq!(addr.port(), None);
    assert_eq!(addr.family(), 0);
    addr.clear();
    assert!(addr.is_empty());
}

#[test]
fn format_v4() {
    let mut addr = SockAddr::from(v4("127.0.0.1:8080"));
    addr.format().unwrap();
    assert_eq!(addr.ip(), Some("127.0.0.1"));
    assert_eq!(addr.ip_len(), Some(9));
    assert_eq!(addr.port(), Some(8080));
}

#[test]
fn format_v6() {
    let mut addr = SockAddr::from("[::1]:8080".parse::<SocketAddr>().unwrap());
    addr.format().unwrap();
    assert_eq!(addr.ip(), Some("::1"));
    assert_eq!(addr.ip_len(), Some(3));
    assert_eq!(addr.port(), Some(8080));
}

#[test]
fn text_formats_lazily() {
    let mut addr = SockAddr::from(v4("127.0.0.1:8080"));
    assert_eq!(addr.ip(), None);
    assert_eq!(addr.text(), Ok("127.0.0.1"));
    // Cached now.
    assert_eq!(addr.ip(), Some("127.0.0.1"));
    assert_eq!(addr.text(), Ok("127.0.0.1"));
}

#[test]
fn port_zero_is_not_unset() {
    let mut addr = SockAddr::from(v4("127.0.0.1:0"));
    assert_eq!(addr.port(), None);
    addr.format().unwrap();
    assert_eq!(addr.port(), Some(0));
}

#[test]
fn display_uses_native_bytes() {
    let addr = SockAddr::from(v4("10.1.2.3:443"));
    assert_eq!(addr.to_string(), "10.1.2.3:443");
    assert_eq!(SockAddr::new().to_string(), "<address family 0>");
}

#[test]
fn socket_addr_round_trip() {
    for s in &["127.0.0.1:8080", "10.1.2.3:0", "[::1]:443", "[2001:db8::1]:65535"] {
        let std_addr: SocketAddr = s.parse().unwrap();
        let addr = SockAddr::from(std_addr);
        assert_eq!(addr.to_socket_addr(), Ok(std_addr));
    }
}

#[test]
fn local_addr_of_bound_socket() {
    let _ = env_logger::init();
    bsd_addr::init();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let bound = listener.local_addr().unwrap();

    let mut addr = bsd_addr::local_addr(&listener).unwrap();
    assert!(!addr.is_empty());
    addr.format().unwrap();
    assert_eq!(addr.ip(), Some("127.0.0.1"));
    assert_eq!(addr.port(), Some(bound.port()));
}

#[test]
fn peer_addr_of_connected_socket() {
    bsd_addr::init();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let bound = listener.local_addr().unwrap();
    let stream = TcpStream::connect(bound).unwrap();

    let peer = bsd_addr::peer_addr(&stream).unwrap();
    assert_eq!(peer.to_socket_addr(), Ok(bound));
}
