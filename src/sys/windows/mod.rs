use std::io;
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::os::raw::c_int;
use std::os::windows::io::RawSocket;

use winapi::shared::ws2def::{AF_INET, AF_INET6, SOCKADDR_IN, SOCKADDR_STORAGE};
use winapi::shared::ws2ipdef::SOCKADDR_IN6_LH;
use winapi::um::winsock2::{getpeername, getsockname, WSAGetLastError, SOCKET, SOCKET_ERROR};

use err::AddrError;

pub(crate) type Storage = SOCKADDR_STORAGE;

pub(crate) const MAX_ADDR_LEN: usize = mem::size_of::<Storage>();

pub(crate) fn init() {
    use std::net::UdpSocket;
    use std::sync::Once;

    static ONCE: Once = Once::new();

    // Binding any std socket runs WSAStartup for the process.
    ONCE.call_once(|| drop(UdpSocket::bind("127.0.0.1:0")));
}

#[inline]
fn last_error() -> io::Error {
    io::Error::from_raw_os_error(unsafe { WSAGetLastError() })
}

#[inline]
fn cvt(res: c_int) -> io::Result<c_int> {
    if res != SOCKET_ERROR {
        Ok(res)
    } else {
        Err(last_error())
    }
}

pub(crate) fn to_socket_addr(storage: &Storage, len: usize) -> Result<SocketAddr, AddrError> {
    match storage.ss_family as c_int {
        AF_INET => {
            debug_assert!(len >= mem::size_of::<SOCKADDR_IN>());
            let addr = unsafe { &*(storage as *const _ as *const SOCKADDR_IN) };
            let raw_ip = unsafe { *addr.sin_addr.S_un.S_addr() };
            let ip = Ipv4Addr::from(u32::from_be(raw_ip));
            Ok(SocketAddr::V4(SocketAddrV4::new(
                ip,
                u16::from_be(addr.sin_port),
            )))
        }
        AF_INET6 => {
            debug_assert!(len >= mem::size_of::<SOCKADDR_IN6_LH>());
            let addr = unsafe { &*(storage as *const _ as *const SOCKADDR_IN6_LH) };
            let ip = Ipv6Addr::from(unsafe { *addr.sin6_addr.u.Byte() });
            Ok(SocketAddr::V6(SocketAddrV6::new(
                ip,
                u16::from_be(addr.sin6_port),
                addr.sin6_flowinfo,
                unsafe { *addr.u.sin6_scope_id() },
            )))
        }
        family => Err(AddrError::UnsupportedFamily(family)),
    }
}

pub(crate) fn from_socket_addr(addr: &SocketAddr) -> (Storage, c_int) {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let len = match *addr {
        SocketAddr::V4(ref a) => {
            let sin = unsafe { &mut *(&mut storage as *mut _ as *mut SOCKADDR_IN) };
            sin.sin_family = AF_INET as u16;
            sin.sin_port = u16::to_be(a.port());
            unsafe {
                *sin.sin_addr.S_un.S_addr_mut() = u32::to_be(u32::from(*a.ip()));
            }
            mem::size_of::<SOCKADDR_IN>()
        }
        SocketAddr::V6(ref a) => {
            let sin6 = unsafe { &mut *(&mut storage as *mut _ as *mut SOCKADDR_IN6_LH) };
            sin6.sin6_family = AF_INET6 as u16;
            sin6.sin6_port = u16::to_be(a.port());
            sin6.sin6_flowinfo = a.flowinfo();
            unsafe {
                *sin6.sin6_addr.u.Byte_mut() = a.ip().octets();
                *sin6.u.sin6_scope_id_mut() = a.scope_id();
            }
            mem::size_of::<SOCKADDR_IN6_LH>()
        }
    };
    (storage, len as c_int)
}

pub(crate) fn local_addr(sock: RawSocket) -> io::Result<(Storage, c_int)> {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let mut len = MAX_ADDR_LEN as c_int;
    cvt(unsafe { getsockname(sock as SOCKET, &mut storage as *mut _ as *mut _, &mut len) })?;
    Ok((storage, len))
}

pub(crate) fn peer_addr(sock: RawSocket) -> io::Result<(Storage, c_int)> {
    let mut storage: Storage = unsafe { mem::zeroed() };
    let mut len = MAX_ADDR_LEN as c_int;
    cvt(unsafe { getpeername(sock as SOCKET, &mut storage as *mut _ as *mut _, &mut len) })?;
    Ok((storage, len))
}
