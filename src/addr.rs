use std::fmt;
use std::io;
use std::mem;
use std::net::SocketAddr;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;
#[cfg(windows)]
use std::os::windows::io::AsRawSocket;
use std::ptr;
use std::slice;

use err::AddrError;
use sys;
use {sockaddr, socklen_t};

/// A platform-native socket address record.
///
/// Holds a buffer big enough for any supported address family
/// (`sockaddr_storage`) together with the number of bytes actually
/// occupied, plus a cached textual IP and numeric port derived from the
/// native bytes by [`format`](SockAddr::format). The caches are owned by
/// the record and released whenever it is cleared, re-populated or
/// dropped.
///
/// A record starts empty (zeroed storage, caches unset) and is filled
/// either from an existing [`SocketAddr`], from raw native bytes via
/// [`populate`](SockAddr::populate), or by an OS retrieval call such as
/// [`local_addr`].
pub struct SockAddr {
    mem: sys::Storage,
    len: socklen_t,
    ip: Option<String>,
    port: Option<u16>,
}

impl SockAddr {
    /// Creates an empty record: zeroed storage, no occupied bytes, no
    /// cached textual form.
    pub fn new() -> Self {
        SockAddr {
            mem: unsafe { mem::zeroed() },
            len: 0,
            ip: None,
            port: None,
        }
    }

    /// Copies a native address into the storage buffer.
    ///
    /// Fails with [`AddrError::InvalidLength`] when `native` exceeds the
    /// buffer capacity, before any byte is copied; the record is left
    /// unchanged in that case. On success any previously cached textual
    /// form is released.
    pub fn populate(&mut self, native: &[u8]) -> Result<(), AddrError> {
        if native.len() > sys::MAX_ADDR_LEN {
            return Err(AddrError::InvalidLength {
                len: native.len(),
                capacity: sys::MAX_ADDR_LEN,
            });
        }
        self.clear();
        unsafe {
            ptr::copy_nonoverlapping(
                native.as_ptr(),
                &mut self.mem as *mut _ as *mut u8,
                native.len(),
            );
        }
        self.len = native.len() as socklen_t;
        Ok(())
    }

    /// FFI twin of [`populate`](SockAddr::populate) for C callers.
    ///
    /// `addr` must point to `len` readable bytes holding a native
    /// `sockaddr`, and `len` must be non-negative.
    pub unsafe fn copy_from_raw(
        &mut self,
        addr: *const sockaddr,
        len: socklen_t,
    ) -> Result<(), AddrError> {
        self.populate(slice::from_raw_parts(addr as *const u8, len as usize))
    }

    /// Derives the textual IP and port from the native bytes, caching
    /// both. Fails when the storage holds an unsupported address family;
    /// the caches are then left as they were.
    pub fn format(&mut self) -> Result<(), AddrError> {
        let addr = sys::to_socket_addr(&self.mem, self.len as usize)?;
        self.ip = Some(addr.ip().to_string());
        self.port = Some(addr.port());
        Ok(())
    }

    /// Returns the cached textual form, formatting it first if unset.
    pub fn text(&mut self) -> Result<&str, AddrError> {
        if self.ip.is_none() {
            self.format()?;
        }
        Ok(self.ip.as_ref().map_or("", |ip| ip.as_str()))
    }

    /// Resets the record to its empty state: zeroes the storage, drops
    /// the cached textual form, unsets the port. Idempotent.
    pub fn clear(&mut self) {
        self.mem = unsafe { mem::zeroed() };
        self.len = 0;
        self.ip = None;
        self.port = None;
    }

    /// Replaces the cached textual form, releasing the previous one.
    #[inline]
    pub fn set_ip<S: Into<String>>(&mut self, ip: S) {
        self.ip = Some(ip.into());
    }

    #[inline]
    pub fn set_port(&mut self, port: u16) {
        self.port = Some(port);
    }

    /// The cached textual form, if one has been set or formatted.
    #[inline]
    pub fn ip(&self) -> Option<&str> {
        self.ip.as_ref().map(|ip| ip.as_str())
    }

    /// Length in bytes of the cached textual form.
    #[inline]
    pub fn ip_len(&self) -> Option<usize> {
        self.ip.as_ref().map(|ip| ip.len())
    }

    /// The cached port. `None` until set or formatted, so port 0 stays
    /// distinguishable from "no port".
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The occupied native bytes, exactly `len` of them.
    #[inline]
    pub fn native(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(&self.mem as *const _ as *const u8, self.len as usize) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity of the storage buffer, sized for the largest supported
    /// address family.
    #[inline]
    pub fn capacity(&self) -> usize {
        sys::MAX_ADDR_LEN
    }

    /// The native address family tag (`AF_INET`, `AF_INET6`, ...), 0 for
    /// an empty record.
    #[inline]
    pub fn family(&self) -> i32 {
        self.mem.ss_family as i32
    }

    #[inline]
    pub fn as_ptr(&self) -> *const sockaddr {
        &self.mem as *const _ as *const sockaddr
    }

    /// Mutable pointer into the storage buffer, for OS calls that write
    /// an address. Follow up with [`set_len`](SockAddr::set_len).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut sockaddr {
        &mut self.mem as *mut _ as *mut sockaddr
    }

    /// Records how many bytes an OS call wrote through
    /// [`as_mut_ptr`](SockAddr::as_mut_ptr) and drops the stale textual
    /// cache. `len` must not exceed [`capacity`](SockAddr::capacity).
    #[inline]
    pub unsafe fn set_len(&mut self, len: socklen_t) {
        debug_assert!(len as usize <= sys::MAX_ADDR_LEN);
        self.len = len;
        self.ip = None;
        self.port = None;
    }

    /// Converts the native bytes into a std [`SocketAddr`].
    #[inline]
    pub fn to_socket_addr(&self) -> Result<SocketAddr, AddrError> {
        sys::to_socket_addr(&self.mem, self.len as usize)
    }
}

impl Default for SockAddr {
    #[inline]
    fn default() -> Self {
        SockAddr::new()
    }
}

impl From<SocketAddr> for SockAddr {
    fn from(addr: SocketAddr) -> Self {
        let (mem, len) = sys::from_socket_addr(&addr);
        SockAddr {
            mem,
            len,
            ip: None,
            port: None,
        }
    }
}

impl Clone for SockAddr {
    fn clone(&self) -> Self {
        SockAddr {
            mem: self.mem,
            len: self.len,
            ip: self.ip.clone(),
            port: self.port,
        }
    }
}

impl PartialEq for SockAddr {
    fn eq(&self, other: &SockAddr) -> bool {
        self.native() == other.native() && self.ip == other.ip && self.port == other.port
    }
}

impl fmt::Debug for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SockAddr")
            .field("family", &self.family())
            .field("len", &self.len)
            .field("ip", &self.ip)
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Display for SockAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match sys::to_socket_addr(&self.mem, self.len as usize) {
            Ok(addr) => addr.fmt(f),
            Err(..) => write!(f, "<address family {}>", self.family()),
        }
    }
}

/// Retrieves the local address the socket is bound to, as a fresh
/// populated record.
#[cfg(unix)]
pub fn local_addr<T: AsRawFd>(sock: &T) -> io::Result<SockAddr> {
    let (mem, len) = sys::local_addr(sock.as_raw_fd())?;
    trace!("getsockname filled {} bytes", len);
    Ok(SockAddr {
        mem,
        len,
        ip: None,
        port: None,
    })
}

/// Retrieves the local address the socket is bound to, as a fresh
/// populated record.
#[cfg(windows)]
pub fn local_addr<T: AsRawSocket>(sock: &T) -> io::Result<SockAddr> {
    let (mem, len) = sys::local_addr(sock.as_raw_socket())?;
    trace!("getsockname filled {} bytes", len);
    Ok(SockAddr {
        mem,
        len,
        ip: None,
        port: None,
    })
}

/// Retrieves the remote address of a connected socket, as a fresh
/// populated record.
#[cfg(unix)]
pub fn peer_addr<T: AsRawFd>(sock: &T) -> io::Result<SockAddr> {
    let (mem, len) = sys::peer_addr(sock.as_raw_fd())?;
    trace!("getpeername filled {} bytes", len);
    Ok(SockAddr {
        mem,
        len,
        ip: None,
        port: None,
    })
}

/// Retrieves the remote address of a connected socket, as a fresh
/// populated record.
#[cfg(windows)]
pub fn peer_addr<T: AsRawSocket>(sock: &T) -> io::Result<SockAddr> {
    let (mem, len) = sys::peer_addr(sock.as_raw_socket())?;
    trace!("getpeername filled {} bytes", len);
    Ok(SockAddr {
        mem,
        len,
        ip: None,
        port: None,
    })
}
