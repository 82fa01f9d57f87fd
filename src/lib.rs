//! Compact, copyable descriptions of asynchronous I/O operations.
//!
//! This crate defines the message application code hands to a reactor's
//! submission layer: one [`IoRequest`] per pending operation. Fourteen
//! operation kinds — byte and vectored read/write, fdatasync, socket
//! send/receive with and without headers, accept, connect, readiness
//! polling and cancellation — share one small, stack-allocated sum type
//! whose variants each carry exactly the fields their kind defines.
//!
//! The crate performs no I/O, takes no locks and raises no runtime
//! errors; it only encodes intent. Submission queues, completion
//! matching, errno translation and buffer lifecycle management all live
//! in the reactor that consumes these values.
//!
//! # Safety
//!
//! A request borrows every buffer and structure it points at. The borrow
//! checker guarantees the memory outlives the request *value*; keeping it
//! valid and untouched until the reactor reports completion is the
//! caller's obligation, exactly as with any kernel submission interface.
//! Cancellation does not reference memory at all: poll_remove and cancel
//! carry a [`MatchToken`] identifier that completion matchers compare and
//! never dereference.
//!
//! # Examples
//!
//! ```rust
//! use io_request::{IoRequest, PollFlags};
//!
//! let payload = *b"hello ring";
//! let req = IoRequest::write(5, 0, &payload);
//! assert_eq!(req.fd(), 5);
//! assert!(req.is_write());
//!
//! // Submission backends dispatch on the kind first.
//! match req {
//!   IoRequest::Write { fd, pos, buf } => {
//!     assert_eq!((fd, pos, buf.len()), (5, 0, 10));
//!   }
//!   other => panic!("unexpected kind {}", other.name()),
//! }
//!
//! let poll = IoRequest::poll_add(7, PollFlags::IN | PollFlags::RDHUP);
//! assert!(poll.events().contains(PollFlags::IN));
//! ```

pub mod buf;
mod request;
mod token;

pub use buf::{AddrSlot, BufMut, MsgHdrMut};
pub use request::{IoRequest, Opcode, PollFlags};
pub use token::MatchToken;
