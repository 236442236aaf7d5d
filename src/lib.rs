//! Platform-native socket address storage.
//!
//! The std [`SocketAddr`](std::net::SocketAddr) type has its own internal
//! layout and cannot be handed directly to OS socket calls. This crate
//! provides [`SockAddr`], a record holding a `sockaddr_storage`-sized
//! buffer in the platform's native encoding together with its occupied
//! length, plus an independently owned cached textual IP and numeric port
//! so the same address can be displayed many times without reformatting.
//!
//! ```
//! use bsd_addr::SockAddr;
//!
//! let mut addr = SockAddr::from("127.0.0.1:8080".parse::<std::net::SocketAddr>().unwrap());
//! addr.format().unwrap();
//! assert_eq!(addr.ip(), Some("127.0.0.1"));
//! assert_eq!(addr.port(), Some(8080));
//! ```

#[macro_use]
extern crate log;

#[cfg(unix)]
extern crate libc;

#[cfg(windows)]
extern crate winapi;

/// Portable re-export of the platform's generic `sockaddr`.
#[cfg(unix)]
pub use libc::sockaddr;
/// Portable re-export of the platform's generic `sockaddr`.
#[cfg(windows)]
pub use winapi::shared::ws2def::SOCKADDR as sockaddr;

/// Portable re-export of the platform's `socklen_t`.
#[cfg(unix)]
pub use libc::socklen_t;
/// Portable re-export of the platform's `socklen_t`.
#[cfg(windows)]
#[allow(non_camel_case_types)]
pub type socklen_t = ::std::os::raw::c_int;

mod addr;
pub use self::addr::{local_addr, peer_addr, SockAddr};

mod err;
pub use self::err::AddrError;

mod sys;

/// Initializes the platform socket stack.
///
/// Required on Windows before any address-retrieval call; a no-op
/// elsewhere. Safe to call more than once.
#[inline]
pub fn init() {
    ::sys::init()
}
