use std::io;

use libc;

#[inline]
pub(super) fn cvt(res: libc::c_int) -> io::Result<libc::c_int> {
    if res != -1 {
        Ok(res)
    } else {
        Err(io::Error::last_os_error())
    }
}
