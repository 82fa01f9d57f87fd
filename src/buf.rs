//! Caller-owned memory handed to the kernel.
//!
//! A request borrows every buffer and structure it points at; it owns none
//! of them. Slots the kernel only reads are stored as plain shared
//! references on the request itself. Slots the kernel writes into cannot be
//! stored as `&mut` (the request must stay `Copy`, and the kernel aliases
//! the memory until completion), so they are wrapped here: a raw pointer
//! plus a borrow marker that keeps the caller's allocation pinned for the
//! request's lifetime.
//!
//! # Safety
//!
//! The borrow checker ties a wrapper to the scope it was created from, but
//! it cannot see the kernel. The memory behind a wrapper must remain valid,
//! and must not be touched by any other actor, until the reactor reports
//! the operation complete.

use core::marker::PhantomData;
use core::mem;
use core::ptr;

/// A byte buffer the kernel will fill, the target of `read` and `recv`
/// requests.
#[derive(Clone, Copy, Debug)]
pub struct BufMut<'a> {
  ptr: *mut u8,
  len: usize,
  _life: PhantomData<&'a mut [u8]>,
}

impl<'a> BufMut<'a> {
  /// Wraps a raw allocation.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for writes of `len` bytes for the whole
  /// submission-to-completion window, and `'a` must not outlive the
  /// allocation.
  pub const unsafe fn from_raw_parts(ptr: *mut u8, len: usize) -> Self {
    Self { ptr, len, _life: PhantomData }
  }

  pub const fn as_mut_ptr(&self) -> *mut u8 {
    self.ptr
  }

  /// Capacity in bytes, the most the kernel may write.
  pub const fn len(&self) -> usize {
    self.len
  }

  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl<'a> From<&'a mut [u8]> for BufMut<'a> {
  fn from(buf: &'a mut [u8]) -> Self {
    Self { ptr: buf.as_mut_ptr(), len: buf.len(), _life: PhantomData }
  }
}

/// A message header the kernel fills during `recvmsg`.
///
/// `sendmsg` headers are only read by the kernel and travel as plain
/// `&msghdr` references instead.
#[derive(Clone, Copy, Debug)]
pub struct MsgHdrMut<'a> {
  ptr: *mut libc::msghdr,
  _life: PhantomData<&'a mut libc::msghdr>,
}

impl<'a> MsgHdrMut<'a> {
  /// Wraps a raw header.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for reads and writes for the whole
  /// submission-to-completion window, including the buffers its
  /// `msg_iov` and `msg_control` fields point at.
  pub const unsafe fn from_raw(ptr: *mut libc::msghdr) -> Self {
    Self { ptr, _life: PhantomData }
  }

  pub const fn as_ptr(&self) -> *mut libc::msghdr {
    self.ptr
  }
}

impl<'a> From<&'a mut libc::msghdr> for MsgHdrMut<'a> {
  fn from(msg: &'a mut libc::msghdr) -> Self {
    Self { ptr: ptr::from_mut(msg), _life: PhantomData }
  }
}

/// The peer-address cell an `accept` request hands to the kernel.
///
/// Accept is the one operation that writes back through its size slot: the
/// kernel stores the peer address into the `sockaddr` cell and the actual
/// address length into the `socklen_t` cell. Both cells stay caller-owned.
#[derive(Clone, Copy, Debug)]
pub struct AddrSlot<'a> {
  addr: *mut libc::sockaddr,
  len: *mut libc::socklen_t,
  _life: PhantomData<&'a mut libc::sockaddr_storage>,
}

impl<'a> AddrSlot<'a> {
  /// Borrows a `sockaddr_storage` cell and its length cell.
  ///
  /// The length cell is initialized to the storage capacity, as
  /// `accept(2)` expects on entry.
  pub fn new(
    addr: &'a mut libc::sockaddr_storage,
    len: &'a mut libc::socklen_t,
  ) -> Self {
    *len = mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
    Self {
      addr: ptr::from_mut(addr).cast(),
      len: ptr::from_mut(len),
      _life: PhantomData,
    }
  }

  /// Wraps raw address and length cells.
  ///
  /// # Safety
  ///
  /// Both pointers must be valid for writes for the whole
  /// submission-to-completion window, and `*len` must hold the capacity
  /// of the address cell.
  pub const unsafe fn from_raw_parts(
    addr: *mut libc::sockaddr,
    len: *mut libc::socklen_t,
  ) -> Self {
    Self { addr, len, _life: PhantomData }
  }

  pub const fn sockaddr(&self) -> *mut libc::sockaddr {
    self.addr
  }

  pub const fn socklen_ptr(&self) -> *mut libc::socklen_t {
    self.len
  }
}
