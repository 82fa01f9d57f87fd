//! Identity for cancellation-style requests.

/// Opaque identifier naming an in-flight request.
///
/// A reactor that withdraws a poll interest or cancels an in-flight
/// operation must tell the kernel which submission it means. That identity
/// is the 64-bit word the reactor attached to the original submission (the
/// io_uring `user_data` word). `MatchToken` carries the word as a pure
/// identifier: completion matchers compare it, nothing ever dereferences
/// it, even when a reactor happens to mint tokens from addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchToken(u64);

impl MatchToken {
  /// Wraps the identity word attached to the original submission.
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// The identity word, ready to copy into a kernel cancellation entry.
  pub const fn as_raw(self) -> u64 {
    self.0
  }
}
