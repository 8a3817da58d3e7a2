use crate::crypto::key_pair::KeyPair;
use crate::virtual_machine::log_sink::LogSink;

/// Execution context a script runs under, as reported by `GetTrigger`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerType {
    /// Witness verification. Not modeled by the emulator.
    Verification = 0x00,
    /// Regular contract invocation.
    Application = 0x10,
}

/// Per-invocation state passed to every syscall.
///
/// The invoker identity is set by the caller between runs and is read-only for
/// the duration of a run.
#[derive(Clone, Copy, Debug)]
pub struct ExecContext<'a> {
    /// Key pair of the account invoking the contract, if one is loaded.
    pub invoker: Option<&'a KeyPair>,
    /// Sink receiving lines from `Log`, `Notify` and `CheckWitness`.
    pub log: &'a LogSink,
}

impl<'a> ExecContext<'a> {
    /// Creates a context without an invoker identity.
    pub fn new(log: &'a LogSink) -> Self {
        Self { invoker: None, log }
    }

    /// Sets the invoker identity.
    pub fn with_invoker(mut self, invoker: &'a KeyPair) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Trigger of the current invocation. Only application invocations run here.
    pub fn trigger(&self) -> TriggerType {
        TriggerType::Application
    }
}
