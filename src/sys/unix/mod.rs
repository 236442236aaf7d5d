mod err;
use self::err::cvt;

use std::io;
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::os::unix::io::RawFd;

use libc;

use err::AddrError;

pub(crate) type Storage = libc::sockaddr_storage;

pub(crate) const MAX_ADDR_LEN: usize = mem::size_of::<Storage>();

#[inline]
pub(crate) fn init() {}

pub(crate) fn to_socket_addr(storage: &Storage, len: usize) -> Result<SocketAddr, AddrError> {
    match storage.ss_family as libc::c_int {
        libc::AF_INET => {
            debug_assert!(len >= mem::size_of::<libc::sockaddr_in>());
            let addr = unsafe { &*(storage as *const _ as *const libc::sockaddr_in) };
            let ip = Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr));
            Ok(SocketAddr::V4(SocketAddrV4::new(
                ip,
                u16::from_be(addr.sin_port),
            )))
        }
        libc::AF_INET6 => {
            debug_assert!(len >= mem::size_of::<libc::sockaddr_in6>());
            let addr = unsafe { &*(storage as *const _ as *const libc::sockaddr_in6) };
            let ip = Ipv6Addr::from(addr.sin6_addr.s6_addr);
            Ok(SocketAddr::V6(SocketAddrV6::new(
                ip,
                u16::from_be(addr.sin6_port),
                addr.sin6_flowinfo,
                addr.sin6_scope_id,
            )))
        }
        family => Err(AddrError::UnsupportedFamily(family)),
    }
}

pub(crate) fn from_socket_addr(addr: &SocketAddr) -> (Storage, libc::socklen_t) {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let len = match *addr {
        SocketAddr::V4(ref a) => {
            let sin = unsafe { &mut *(&mut storage as *mut _ as *mut libc::sockaddr_in) };
            sin.sin_family = libc::AF_INET as libc::sa_family_t;
            sin.sin_port = u16::to_be(a.port());
            sin.sin_addr.s_addr = u32::to_be(u32::from(*a.ip()));
            mem::size_of::<libc::sockaddr_in>()
        }
        SocketAddr::V6(ref a) => {
            let sin6 = unsafe { &mut *(&mut storage as *mut _ as *mut libc::sockaddr_in6) };
            sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
            sin6.sin6_port = u16::to_be(a.port());
            sin6.sin6_addr.s6_addr = a.ip().octets();
            sin6.sin6_flowinfo = a.flowinfo();
            sin6.sin6_scope_id = a.scope_id();
            mem::size_of::<libc::sockaddr_in6>()
        }
    };
    set_sa_len(&mut storage, len);
    (storage, len as libc::socklen_t)
}

#[cfg(any(target_os = "dragonfly", target_os = "freebsd", target_os = "ios",
          target_os = "macos", target_os = "netbsd", target_os = "openbsd"))]
#[inline]
fn set_sa_len(storage: &mut Storage, len: usize) {
    storage.ss_len = len as u8;
}

#[cfg(not(any(target_os = "dragonfly", target_os = "freebsd", target_os = "ios",
              target_os = "macos", target_os = "netbsd", target_os = "openbsd")))]
#[inline]
fn set_sa_len(_storage: &mut Storage, _len: usize) {}

pub(crate) fn local_addr(fd: RawFd) -> io::Result<(Storage, libc::socklen_t)> {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let mut len = MAX_ADDR_LEN as libc::socklen_t;
    cvt(unsafe { libc::getsockname(fd, &mut storage as *mut _ as *mut _, &mut len) })?;
    Ok((storage, len))
}

pub(crate) fn peer_addr(fd: RawFd) -> io::Result<(Storage, libc::socklen_t)> {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let mut len = MAX_ADDR_LEN as libc::socklen_t;
    cvt(unsafe { libc::getpeername(fd, &mut storage as *mut _ as *mut _, &mut len) })?;
    Ok((storage, len))
}
