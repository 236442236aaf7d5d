use std::error;
use std::fmt;

/// Errors local to populating or formatting a [`SockAddr`](crate::SockAddr).
///
/// OS-call failures are reported separately as [`std::io::Error`].
#[derive(Debug, PartialEq, Eq)]
pub enum AddrError {
    /// A native address did not fit the fixed storage buffer. The record
    /// is left unchanged; the address is never truncated.
    InvalidLength { len: usize, capacity: usize },
    /// The storage holds an address family other than `AF_INET` or
    /// `AF_INET6`, so no textual form exists for it.
    UnsupportedFamily(i32),
}

impl fmt::Display for AddrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddrError::InvalidLength { len, capacity } => write!(
                f,
                "native address of {} bytes exceeds storage capacity of {}",
                len, capacity
            ),
            AddrError::UnsupportedFamily(family) => {
                write!(f, "unsupported address family {}", family)
            }
        }
    }
}

impl error::Error for AddrError {}
