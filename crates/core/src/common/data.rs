//! Memory access classification.

/// Classification of a cache access.
///
/// The cache keeps separate access/hit counters for instruction fetches and
/// data accesses; stores are always classified as [`AccessKind::Data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch issued by the interpreter's fetch step.
    Instruction,

    /// Data access issued by a load or store instruction.
    Data,
}
