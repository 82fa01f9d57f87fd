//! I/O request descriptions.
//!
//! An [`IoRequest`] encodes one pending operation intent: which kind of
//! operation, which descriptor, and the kind-specific arguments a
//! submission backend copies verbatim into a kernel entry. Construction
//! goes through one factory per kind; after that the value is immutable
//! and trivially copyable. The crate performs no I/O itself.
//!
//! A submission backend dispatches on the kind first, either by matching
//! the enum exhaustively or by calling [`IoRequest::opcode`] and then only
//! the accessors that kind defines. Accessors outside the defining kind
//! set panic rather than return garbage.
//!
//! # Safety
//!
//! Requests borrow caller memory. Every buffer, segment array, message
//! header and socket address a request points at must remain valid, and
//! untouched by other actors, from submission until the reactor reports
//! completion. The lifetime parameter enforces the "outlives the request
//! value" half of that contract; the completion half is the caller's.

use core::fmt;
use std::os::fd::RawFd;

use libc::{c_int, c_void};

use crate::buf::{AddrSlot, BufMut, MsgHdrMut};
use crate::token::MatchToken;

/// Readiness interest mask for [`IoRequest::poll_add`].
///
/// A thin newtype over the `poll(2)` event bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollFlags(u32);

impl PollFlags {
  /// Data available to read.
  pub const IN: Self = Self(libc::POLLIN as u32);

  /// Writing is possible without blocking.
  pub const OUT: Self = Self(libc::POLLOUT as u32);

  /// Error condition on the descriptor.
  pub const ERR: Self = Self(libc::POLLERR as u32);

  /// Hang up.
  pub const HUP: Self = Self(libc::POLLHUP as u32);

  /// Peer closed its end of the connection.
  pub const RDHUP: Self = Self(libc::POLLRDHUP as u32);

  pub const fn empty() -> Self {
    Self(0)
  }

  /// Wraps raw `poll(2)` bits unchecked.
  pub const fn from_bits_retain(bits: u32) -> Self {
    Self(bits)
  }

  pub const fn bits(self) -> u32 {
    self.0
  }

  pub const fn contains(self, other: Self) -> bool {
    self.0 & other.0 == other.0
  }
}

impl core::ops::BitOr for PollFlags {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}

impl core::ops::BitOrAssign for PollFlags {
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}

/// The closed set of operation kinds a request can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
  Read,
  Readv,
  Write,
  Writev,
  Fdatasync,
  Recv,
  RecvMsg,
  Send,
  SendMsg,
  Accept,
  Connect,
  PollAdd,
  PollRemove,
  Cancel,
}

impl Opcode {
  /// Every kind, in declaration order.
  pub const ALL: [Opcode; 14] = [
    Opcode::Read,
    Opcode::Readv,
    Opcode::Write,
    Opcode::Writev,
    Opcode::Fdatasync,
    Opcode::Recv,
    Opcode::RecvMsg,
    Opcode::Send,
    Opcode::SendMsg,
    Opcode::Accept,
    Opcode::Connect,
    Opcode::PollAdd,
    Opcode::PollRemove,
    Opcode::Cancel,
  ];

  /// Stable human-readable name, for diagnostics only.
  pub const fn name(self) -> &'static str {
    match self {
      Opcode::Read => "read",
      Opcode::Readv => "readv",
      Opcode::Write => "write",
      Opcode::Writev => "writev",
      Opcode::Fdatasync => "fdatasync",
      Opcode::Recv => "recv",
      Opcode::RecvMsg => "recvmsg",
      Opcode::Send => "send",
      Opcode::SendMsg => "sendmsg",
      Opcode::Accept => "accept",
      Opcode::Connect => "connect",
      Opcode::PollAdd => "poll_add",
      Opcode::PollRemove => "poll_remove",
      Opcode::Cancel => "cancel",
    }
  }

  /// True exactly for kinds that move data from the kernel into caller
  /// memory: read, readv, recv, recvmsg.
  pub const fn is_read(self) -> bool {
    matches!(
      self,
      Opcode::Read | Opcode::Readv | Opcode::Recv | Opcode::RecvMsg
    )
  }

  /// True exactly for kinds that move data from caller memory to the
  /// kernel: write, writev, send, sendmsg.
  pub const fn is_write(self) -> bool {
    matches!(
      self,
      Opcode::Write | Opcode::Writev | Opcode::Send | Opcode::SendMsg
    )
  }
}

impl fmt::Display for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// One pending asynchronous I/O operation intent.
///
/// Each variant carries exactly the fields its kind defines, so a
/// submission backend that matches exhaustively can never read a slot the
/// kind left undefined. Fields are public for that purpose; the factory
/// functions are the intended construction path.
///
/// The value borrows every buffer and structure it points at and owns
/// none of them. It is `Copy`, has no destructor obligations, and does
/// not track submission or completion state.
#[derive(Clone, Copy)]
pub enum IoRequest<'a> {
  /// Positioned byte read, equivalent to `pread(2)`.
  Read { fd: RawFd, pos: u64, buf: BufMut<'a> },
  /// Positioned vectored read, equivalent to `preadv(2)`.
  Readv { fd: RawFd, pos: u64, iov: &'a [libc::iovec] },
  /// Positioned byte write, equivalent to `pwrite(2)`.
  Write { fd: RawFd, pos: u64, buf: &'a [u8] },
  /// Positioned vectored write, equivalent to `pwritev(2)`.
  Writev { fd: RawFd, pos: u64, iov: &'a [libc::iovec] },
  /// Flush file data to disk, equivalent to `fdatasync(2)`.
  Fdatasync { fd: RawFd },
  /// Socket receive, equivalent to `recv(2)`.
  Recv { fd: RawFd, buf: BufMut<'a>, flags: c_int },
  /// Socket receive with header, equivalent to `recvmsg(2)`.
  RecvMsg { fd: RawFd, msg: MsgHdrMut<'a>, flags: c_int },
  /// Socket send, equivalent to `send(2)`.
  Send { fd: RawFd, buf: &'a [u8], flags: c_int },
  /// Socket send with header, equivalent to `sendmsg(2)`.
  SendMsg { fd: RawFd, msg: &'a libc::msghdr, flags: c_int },
  /// Connection accept, equivalent to `accept4(2)`. The kernel writes the
  /// peer address back through the slot.
  Accept { fd: RawFd, addr: AddrSlot<'a>, flags: c_int },
  /// Connection establishment, equivalent to `connect(2)`.
  Connect { fd: RawFd, addr: &'a libc::sockaddr, addrlen: libc::socklen_t },
  /// Edge-triggered readiness interest on a descriptor.
  PollAdd { fd: RawFd, events: PollFlags },
  /// Withdraw a previously added poll interest, matched by token.
  PollRemove { fd: RawFd, token: MatchToken },
  /// Cancel an in-flight operation, matched by token.
  Cancel { fd: RawFd, token: MatchToken },
}

impl<'a> IoRequest<'a> {
  /// Positioned read into `buf`, equivalent to `pread(2)`.
  pub const fn read(fd: RawFd, pos: u64, buf: BufMut<'a>) -> Self {
    Self::Read { fd, pos, buf }
  }

  /// Positioned vectored read, equivalent to `preadv(2)`. The kernel
  /// writes through the `iov_base` pointers of the borrowed segments.
  pub const fn readv(fd: RawFd, pos: u64, iov: &'a [libc::iovec]) -> Self {
    Self::Readv { fd, pos, iov }
  }

  /// Positioned write from `buf`, equivalent to `pwrite(2)`.
  pub const fn write(fd: RawFd, pos: u64, buf: &'a [u8]) -> Self {
    Self::Write { fd, pos, buf }
  }

  /// Positioned vectored write, equivalent to `pwritev(2)`.
  pub const fn writev(fd: RawFd, pos: u64, iov: &'a [libc::iovec]) -> Self {
    Self::Writev { fd, pos, iov }
  }

  /// Flush file data to disk, equivalent to `fdatasync(2)`.
  pub const fn fdatasync(fd: RawFd) -> Self {
    Self::Fdatasync { fd }
  }

  /// Socket receive into `buf`, equivalent to `recv(2)`.
  pub const fn recv(fd: RawFd, buf: BufMut<'a>, flags: c_int) -> Self {
    Self::Recv { fd, buf, flags }
  }

  /// Socket receive through a message header, equivalent to `recvmsg(2)`.
  pub const fn recvmsg(fd: RawFd, msg: MsgHdrMut<'a>, flags: c_int) -> Self {
    Self::RecvMsg { fd, msg, flags }
  }

  /// Socket send from `buf`, equivalent to `send(2)`.
  pub const fn send(fd: RawFd, buf: &'a [u8], flags: c_int) -> Self {
    Self::Send { fd, buf, flags }
  }

  /// Socket send through a message header, equivalent to `sendmsg(2)`.
  pub const fn sendmsg(
    fd: RawFd,
    msg: &'a libc::msghdr,
    flags: c_int,
  ) -> Self {
    Self::SendMsg { fd, msg, flags }
  }

  /// Connection accept, equivalent to `accept4(2)`.
  pub const fn accept(fd: RawFd, addr: AddrSlot<'a>, flags: c_int) -> Self {
    Self::Accept { fd, addr, flags }
  }

  /// Connection establishment, equivalent to `connect(2)`. `addrlen` is
  /// the length of the address actually stored behind `addr`.
  pub const fn connect(
    fd: RawFd,
    addr: &'a libc::sockaddr,
    addrlen: libc::socklen_t,
  ) -> Self {
    Self::Connect { fd, addr, addrlen }
  }

  /// Register readiness interest in `events` on the descriptor.
  pub const fn poll_add(fd: RawFd, events: PollFlags) -> Self {
    Self::PollAdd { fd, events }
  }

  /// Withdraw the poll interest previously submitted under `token`.
  pub const fn poll_remove(fd: RawFd, token: MatchToken) -> Self {
    Self::PollRemove { fd, token }
  }

  /// Cancel the in-flight operation submitted under `token`.
  pub const fn cancel(fd: RawFd, token: MatchToken) -> Self {
    Self::Cancel { fd, token }
  }

  /// The operation kind tag.
  pub const fn opcode(&self) -> Opcode {
    match self {
      Self::Read { .. } => Opcode::Read,
      Self::Readv { .. } => Opcode::Readv,
      Self::Write { .. } => Opcode::Write,
      Self::Writev { .. } => Opcode::Writev,
      Self::Fdatasync { .. } => Opcode::Fdatasync,
      Self::Recv { .. } => Opcode::Recv,
      Self::RecvMsg { .. } => Opcode::RecvMsg,
      Self::Send { .. } => Opcode::Send,
      Self::SendMsg { .. } => Opcode::SendMsg,
      Self::Accept { .. } => Opcode::Accept,
      Self::Connect { .. } => Opcode::Connect,
      Self::PollAdd { .. } => Opcode::PollAdd,
      Self::PollRemove { .. } => Opcode::PollRemove,
      Self::Cancel { .. } => Opcode::Cancel,
    }
  }

  /// Stable human-readable name of the kind, for diagnostics only.
  pub const fn name(&self) -> &'static str {
    self.opcode().name()
  }

  /// The descriptor the operation targets.
  pub const fn fd(&self) -> RawFd {
    match *self {
      Self::Read { fd, .. }
      | Self::Readv { fd, .. }
      | Self::Write { fd, .. }
      | Self::Writev { fd, .. }
      | Self::Fdatasync { fd, .. }
      | Self::Recv { fd, .. }
      | Self::RecvMsg { fd, .. }
      | Self::Send { fd, .. }
      | Self::SendMsg { fd, .. }
      | Self::Accept { fd, .. }
      | Self::Connect { fd, .. }
      | Self::PollAdd { fd, .. }
      | Self::PollRemove { fd, .. }
      | Self::Cancel { fd, .. } => fd,
    }
  }

  /// See [`Opcode::is_read`].
  pub const fn is_read(&self) -> bool {
    self.opcode().is_read()
  }

  /// See [`Opcode::is_write`].
  pub const fn is_write(&self) -> bool {
    self.opcode().is_write()
  }

  /// File offset of a positioned operation.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is read, readv, write or writev.
  pub fn pos(&self) -> u64 {
    match *self {
      Self::Read { pos, .. }
      | Self::Readv { pos, .. }
      | Self::Write { pos, .. }
      | Self::Writev { pos, .. } => pos,
      _ => panic!("io-request: `pos` is undefined for {} requests", self.opcode()),
    }
  }

  /// Socket flags of a send/receive/accept operation.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is recv, recvmsg, send, sendmsg or accept.
  pub fn flags(&self) -> c_int {
    match *self {
      Self::Recv { flags, .. }
      | Self::RecvMsg { flags, .. }
      | Self::Send { flags, .. }
      | Self::SendMsg { flags, .. }
      | Self::Accept { flags, .. } => flags,
      _ => panic!("io-request: `flags` is undefined for {} requests", self.opcode()),
    }
  }

  /// Readiness interest of a poll_add operation.
  ///
  /// # Panics
  ///
  /// Panics for every other kind.
  pub fn events(&self) -> PollFlags {
    match *self {
      Self::PollAdd { events, .. } => events,
      _ => panic!("io-request: `events` is undefined for {} requests", self.opcode()),
    }
  }

  /// Base address of a byte buffer. For write and send the kernel only
  /// reads the memory; the pointer is still returned as `*mut` so it can
  /// be copied verbatim into a kernel entry.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is read, write, recv or send.
  pub fn address(&self) -> *mut c_void {
    match *self {
      Self::Read { buf, .. } | Self::Recv { buf, .. } => {
        buf.as_mut_ptr().cast()
      }
      Self::Write { buf, .. } | Self::Send { buf, .. } => {
        buf.as_ptr().cast_mut().cast()
      }
      _ => panic!("io-request: `address` is undefined for {} requests", self.opcode()),
    }
  }

  /// Byte length of a buffer operation.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is read, write, recv or send.
  pub fn len(&self) -> usize {
    match *self {
      Self::Read { buf, .. } | Self::Recv { buf, .. } => buf.len(),
      Self::Write { buf, .. } | Self::Send { buf, .. } => buf.len(),
      _ => panic!("io-request: `len` is undefined for {} requests", self.opcode()),
    }
  }

  /// Base of the borrowed segment array of a vectored operation.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is readv or writev.
  pub fn iov(&self) -> *const libc::iovec {
    match *self {
      Self::Readv { iov, .. } | Self::Writev { iov, .. } => iov.as_ptr(),
      _ => panic!("io-request: `iov` is undefined for {} requests", self.opcode()),
    }
  }

  /// Segment count of a vectored operation.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is readv or writev.
  pub fn iov_len(&self) -> usize {
    match *self {
      Self::Readv { iov, .. } | Self::Writev { iov, .. } => iov.len(),
      _ => panic!("io-request: `iov_len` is undefined for {} requests", self.opcode()),
    }
  }

  /// Message header of a recvmsg/sendmsg operation. For sendmsg the
  /// kernel only reads the header.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is recvmsg or sendmsg.
  pub fn msghdr(&self) -> *mut libc::msghdr {
    match *self {
      Self::RecvMsg { msg, .. } => msg.as_ptr(),
      Self::SendMsg { msg, .. } => core::ptr::from_ref(msg).cast_mut(),
      _ => panic!("io-request: `msghdr` is undefined for {} requests", self.opcode()),
    }
  }

  /// Socket address structure of an accept/connect operation. For connect
  /// the kernel only reads the address.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is accept or connect.
  pub fn sockaddr(&self) -> *mut libc::sockaddr {
    match *self {
      Self::Accept { addr, .. } => addr.sockaddr(),
      Self::Connect { addr, .. } => core::ptr::from_ref(addr).cast_mut(),
      _ => panic!("io-request: `sockaddr` is undefined for {} requests", self.opcode()),
    }
  }

  /// Address length value of a connect operation. Connect passes the
  /// length by value; only accept carries a length pointer.
  ///
  /// # Panics
  ///
  /// Panics for every kind but connect.
  pub fn socklen(&self) -> libc::socklen_t {
    match *self {
      Self::Connect { addrlen, .. } => addrlen,
      _ => panic!("io-request: `socklen` is undefined for {} requests", self.opcode()),
    }
  }

  /// Address length cell of an accept operation, written back by the
  /// kernel on completion.
  ///
  /// # Panics
  ///
  /// Panics for every kind but accept.
  pub fn socklen_ptr(&self) -> *mut libc::socklen_t {
    match *self {
      Self::Accept { addr, .. } => addr.socklen_ptr(),
      _ => panic!("io-request: `socklen_ptr` is undefined for {} requests", self.opcode()),
    }
  }

  /// Matching token of a poll_remove/cancel operation. Compared by the
  /// completion matcher against in-flight submissions, never dereferenced.
  ///
  /// # Panics
  ///
  /// Panics unless the kind is poll_remove or cancel.
  pub fn match_token(&self) -> MatchToken {
    match *self {
      Self::PollRemove { token, .. } | Self::Cancel { token, .. } => token,
      _ => panic!("io-request: `match_token` is undefined for {} requests", self.opcode()),
    }
  }
}

impl fmt::Debug for IoRequest<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("IoRequest")
      .field("op", &self.opcode())
      .field("fd", &self.fd())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use core::mem;
  use core::ptr;
  use std::collections::HashSet;

  use super::*;

  fn zeroed_iovec() -> libc::iovec {
    libc::iovec { iov_base: ptr::null_mut(), iov_len: 0 }
  }

  macro_rules! opname_test {
    ($op:ident, $expect:literal) => {
      pastey::paste! {
        #[test]
        fn [<opname_ $op:snake>]() {
          assert_eq!(Opcode::$op.name(), $expect);
        }
      }
    };
  }

  opname_test!(Read, "read");
  opname_test!(Readv, "readv");
  opname_test!(Write, "write");
  opname_test!(Writev, "writev");
  opname_test!(Fdatasync, "fdatasync");
  opname_test!(Recv, "recv");
  opname_test!(RecvMsg, "recvmsg");
  opname_test!(Send, "send");
  opname_test!(SendMsg, "sendmsg");
  opname_test!(Accept, "accept");
  opname_test!(Connect, "connect");
  opname_test!(PollAdd, "poll_add");
  opname_test!(PollRemove, "poll_remove");
  opname_test!(Cancel, "cancel");

  #[test]
  fn opnames_distinct_and_nonempty() {
    let names: HashSet<&str> = Opcode::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(names.len(), Opcode::ALL.len());
    assert!(names.iter().all(|name| !name.is_empty()));
  }

  #[test]
  fn classification_matches_kind_table() {
    let reads = [Opcode::Read, Opcode::Readv, Opcode::Recv, Opcode::RecvMsg];
    let writes = [Opcode::Write, Opcode::Writev, Opcode::Send, Opcode::SendMsg];

    for op in Opcode::ALL {
      assert_eq!(op.is_read(), reads.contains(&op), "is_read for {op}");
      assert_eq!(op.is_write(), writes.contains(&op), "is_write for {op}");
      assert!(!(op.is_read() && op.is_write()), "{op} classified as both");
    }
  }

  #[test]
  fn read_round_trips_every_field() {
    let mut backing = vec![0u8; 4096];
    let expected = backing.as_mut_ptr();
    let req = IoRequest::read(3, 100, BufMut::from(&mut backing[..]));

    assert_eq!(req.opcode(), Opcode::Read);
    assert_eq!(req.fd(), 3);
    assert_eq!(req.pos(), 100);
    assert_eq!(req.address(), expected.cast());
    assert_eq!(req.len(), 4096);
    assert!(req.is_read());
    assert!(!req.is_write());
  }

  #[test]
  fn write_round_trips_every_field() {
    let backing = [7u8; 10];
    let req = IoRequest::write(5, 0, &backing);

    assert_eq!(req.opcode(), Opcode::Write);
    assert_eq!(req.fd(), 5);
    assert_eq!(req.pos(), 0);
    assert_eq!(req.address(), backing.as_ptr().cast_mut().cast());
    assert_eq!(req.len(), 10);
    assert!(req.is_write());
    assert!(!req.is_read());
  }

  #[test]
  fn readv_round_trips_segments() {
    let iov = [zeroed_iovec(), zeroed_iovec(), zeroed_iovec()];
    let req = IoRequest::readv(4, 512, &iov);

    assert_eq!(req.opcode(), Opcode::Readv);
    assert_eq!(req.fd(), 4);
    assert_eq!(req.pos(), 512);
    assert_eq!(req.iov(), iov.as_ptr());
    assert_eq!(req.iov_len(), 3);
    assert!(req.is_read());
  }

  #[test]
  fn writev_round_trips_segments() {
    let iov = [zeroed_iovec(); 2];
    let req = IoRequest::writev(4, 0, &iov);

    assert_eq!(req.opcode(), Opcode::Writev);
    assert_eq!(req.iov(), iov.as_ptr());
    assert_eq!(req.iov_len(), 2);
    assert!(req.is_write());
  }

  #[test]
  fn fdatasync_carries_descriptor_only() {
    let req = IoRequest::fdatasync(12);
    assert_eq!(req.opcode(), Opcode::Fdatasync);
    assert_eq!(req.fd(), 12);
    assert!(!req.is_read());
    assert!(!req.is_write());
  }

  #[test]
  fn recv_round_trips_every_field() {
    let mut backing = [0u8; 256];
    let expected = backing.as_mut_ptr();
    let req =
      IoRequest::recv(6, BufMut::from(&mut backing[..]), libc::MSG_PEEK);

    assert_eq!(req.opcode(), Opcode::Recv);
    assert_eq!(req.fd(), 6);
    assert_eq!(req.flags(), libc::MSG_PEEK);
    assert_eq!(req.address(), expected.cast());
    assert_eq!(req.len(), 256);
    assert!(req.is_read());
  }

  #[test]
  fn send_round_trips_every_field() {
    let backing = [1u8; 16];
    let req = IoRequest::send(6, &backing, libc::MSG_NOSIGNAL);

    assert_eq!(req.opcode(), Opcode::Send);
    assert_eq!(req.flags(), libc::MSG_NOSIGNAL);
    assert_eq!(req.address(), backing.as_ptr().cast_mut().cast());
    assert_eq!(req.len(), 16);
    assert!(req.is_write());
  }

  #[test]
  fn recvmsg_round_trips_header() {
    let mut msg: libc::msghdr = unsafe { mem::zeroed() };
    let expected = ptr::from_mut(&mut msg);
    let req = IoRequest::recvmsg(8, MsgHdrMut::from(&mut msg), 0);

    assert_eq!(req.opcode(), Opcode::RecvMsg);
    assert_eq!(req.fd(), 8);
    assert_eq!(req.flags(), 0);
    assert_eq!(req.msghdr(), expected);
    assert!(req.is_read());
  }

  #[test]
  fn sendmsg_round_trips_header() {
    let msg: libc::msghdr = unsafe { mem::zeroed() };
    let req = IoRequest::sendmsg(8, &msg, 0);

    assert_eq!(req.opcode(), Opcode::SendMsg);
    assert_eq!(req.msghdr(), ptr::from_ref(&msg).cast_mut());
    assert!(req.is_write());
  }

  #[test]
  fn accept_round_trips_address_cells() {
    let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
    let mut len: libc::socklen_t = 0;
    let expected_addr = ptr::from_mut(&mut storage).cast::<libc::sockaddr>();
    let expected_len = ptr::from_mut(&mut len);

    let slot = AddrSlot::new(&mut storage, &mut len);
    let req = IoRequest::accept(9, slot, 0);

    assert_eq!(req.opcode(), Opcode::Accept);
    assert_eq!(req.fd(), 9);
    assert_eq!(req.flags(), 0);
    assert_eq!(req.sockaddr(), expected_addr);
    assert_eq!(req.socklen_ptr(), expected_len);
    assert!(!req.is_read());
    assert!(!req.is_write());
  }

  #[test]
  fn connect_round_trips_address_value() {
    let addr: libc::sockaddr = unsafe { mem::zeroed() };
    let addrlen = mem::size_of::<libc::sockaddr_in>() as libc::socklen_t;
    let req = IoRequest::connect(9, &addr, addrlen);

    assert_eq!(req.opcode(), Opcode::Connect);
    assert_eq!(req.sockaddr(), ptr::from_ref(&addr).cast_mut());
    assert_eq!(req.socklen(), addrlen);
    assert!(!req.is_read());
    assert!(!req.is_write());
  }

  #[test]
  fn poll_add_round_trips_interest() {
    let req = IoRequest::poll_add(7, PollFlags::IN);

    assert_eq!(req.opcode(), Opcode::PollAdd);
    assert_eq!(req.fd(), 7);
    assert_eq!(req.events(), PollFlags::IN);
    assert!(!req.is_read());
    assert!(!req.is_write());
  }

  #[test]
  fn cancel_tokens_round_trip_untouched() {
    let token = MatchToken::from_raw(0xdead_beef);
    let cancel = IoRequest::cancel(9, token);
    let remove = IoRequest::poll_remove(9, token);

    assert_eq!(cancel.match_token(), token);
    assert_eq!(remove.match_token(), token);
    assert_ne!(cancel.opcode(), remove.opcode());
    assert_ne!(cancel.name(), remove.name());
  }

  #[test]
  fn poll_flags_combine_and_contain() {
    let mask = PollFlags::IN | PollFlags::HUP;
    assert!(mask.contains(PollFlags::IN));
    assert!(mask.contains(PollFlags::HUP));
    assert!(!mask.contains(PollFlags::OUT));
    assert_eq!(mask.bits(), PollFlags::IN.bits() | PollFlags::HUP.bits());
    assert_eq!(PollFlags::empty().bits(), 0);
  }

  #[test]
  fn requests_are_copyable() {
    fn assert_copy<T: Copy>(_: &T) {}
    let req = IoRequest::fdatasync(1);
    assert_copy(&req);
    let dup = req;
    assert_eq!(dup.fd(), req.fd());
  }

  #[test]
  fn request_stays_small() {
    assert!(mem::size_of::<IoRequest<'static>>() <= 40);
  }

  #[test]
  #[should_panic]
  fn pos_panics_for_recv() {
    let mut backing = [0u8; 8];
    let req = IoRequest::recv(1, BufMut::from(&mut backing[..]), 0);
    let _ = req.pos();
  }

  #[test]
  #[should_panic]
  fn flags_panics_for_read() {
    let mut backing = [0u8; 8];
    let req = IoRequest::read(1, 0, BufMut::from(&mut backing[..]));
    let _ = req.flags();
  }

  #[test]
  #[should_panic]
  fn socklen_panics_for_accept() {
    let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
    let mut len: libc::socklen_t = 0;
    let req = IoRequest::accept(1, AddrSlot::new(&mut storage, &mut len), 0);
    let _ = req.socklen();
  }

  #[test]
  #[should_panic]
  fn socklen_ptr_panics_for_connect() {
    let addr: libc::sockaddr = unsafe { mem::zeroed() };
    let req = IoRequest::connect(1, &addr, 0);
    let _ = req.socklen_ptr();
  }

  #[test]
  #[should_panic]
  fn match_token_panics_for_poll_add() {
    let req = IoRequest::poll_add(1, PollFlags::IN);
    let _ = req.match_token();
  }

  #[test]
  #[should_panic]
  fn events_panics_for_cancel() {
    let req = IoRequest::cancel(1, MatchToken::from_raw(1));
    let _ = req.events();
  }
}
