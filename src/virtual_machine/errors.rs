use neo_emulator_derive::Error;

/// Faults raised by syscalls and propagated to the hosting VM.
///
/// A fault is distinct from a syscall reporting failure through its boolean
/// result: faults mean the stack contract itself was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VMError {
    /// Pop from an empty evaluation stack.
    #[error("{syscall}: evaluation stack underflow")]
    StackUnderflow { syscall: &'static str },
    /// Top-of-stack item has the wrong kind.
    #[error("{syscall}: expected {expected} operand but got {actual}")]
    UnsupportedOperandType {
        syscall: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    /// No handler registered under this name.
    #[error("unknown syscall {0}")]
    UnknownSyscall(String),
}
