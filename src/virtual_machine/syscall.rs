//! Name-keyed syscall registration table.
//!
//! The hosting interpreter resolves `SYSCALL <name>` instructions through a
//! [`SyscallTable`] built once at startup. Each entry carries a cost hint the
//! host may use for gas accounting; the table itself does not meter anything.

use crate::debug;
use crate::virtual_machine::context::ExecContext;
use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::runtime;
use crate::virtual_machine::stack::EvaluationStack;
use std::collections::HashMap;
use std::fmt;

/// Syscall implementation.
///
/// `Ok(true)`/`Ok(false)` report whether the syscall succeeded; `Err` is a
/// fault the host must translate (typically by aborting the run).
pub type SyscallHandler = fn(&mut EvaluationStack, &ExecContext<'_>) -> Result<bool, VMError>;

/// Cost hint charged when a registration does not specify one, in units of 0.001 GAS.
pub const DEFAULT_SYSCALL_COST: u64 = 1;

/// A registered syscall.
#[derive(Clone, Copy)]
pub struct Syscall {
    /// Stable name used by compiled contracts, e.g. `Neo.Runtime.Log`.
    pub name: &'static str,
    pub handler: SyscallHandler,
    /// Execution cost hint in units of 0.001 GAS.
    pub cost: u64,
}

impl fmt::Debug for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syscall")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// Mapping from syscall name to handler and cost hint.
#[derive(Clone, Debug, Default)]
pub struct SyscallTable {
    entries: HashMap<&'static str, Syscall>,
}

impl SyscallTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the `Neo.Runtime.*` syscalls.
    pub fn runtime() -> Self {
        let mut table = Self::new();
        runtime::register(&mut table);
        table
    }

    /// Registers `handler` under `name`, returning the entry it replaced.
    pub fn register(
        &mut self,
        name: &'static str,
        handler: SyscallHandler,
        cost: u64,
    ) -> Option<Syscall> {
        self.entries.insert(
            name,
            Syscall {
                name,
                handler,
                cost,
            },
        )
    }

    pub fn get(&self, name: &str) -> Option<&Syscall> {
        self.entries.get(name)
    }

    /// Returns the cost hint registered for `name`.
    pub fn cost(&self, name: &str) -> Option<u64> {
        self.get(name).map(|syscall| syscall.cost)
    }

    /// Looks up `name` and runs its handler against `stack`.
    ///
    /// Returns [`VMError::UnknownSyscall`] if nothing is registered under `name`.
    pub fn invoke(
        &self,
        name: &str,
        stack: &mut EvaluationStack,
        ctx: &ExecContext<'_>,
    ) -> Result<bool, VMError> {
        let syscall = self
            .get(name)
            .ok_or_else(|| VMError::UnknownSyscall(name.to_string()))?;
        let succeeded = (syscall.handler)(stack, ctx)?;
        debug!("syscall {name} (cost {}) -> {succeeded}", syscall.cost);
        Ok(succeeded)
    }

    /// Returns all registrations sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Syscall> {
        let mut entries: Vec<&Syscall> = self.entries.values().collect();
        entries.sort_by_key(|syscall| syscall.name);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
