#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use self::windows::*;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use self::unix::*;
