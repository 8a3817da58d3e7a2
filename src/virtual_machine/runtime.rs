//! `Neo.Runtime.*` syscalls exposing the invoker identity and logging to contracts.
//!
//! | name                       | stack effect                  | result           |
//! |----------------------------|-------------------------------|------------------|
//! | `Neo.Runtime.GetTrigger`   | pushes trigger tag            | always `true`    |
//! | `Neo.Runtime.CheckWitness` | pops ByteArray, pushes Bool   | always `true`    |
//! | `Neo.Runtime.Notify`       | pops Array, logs it           | `false` if not an Array |
//! | `Neo.Runtime.Log`          | pops any item, logs it        | always `true`    |

use crate::crypto::key_pair::COMPRESSED_PUBLIC_KEY_LEN;
use crate::types::script_hash::SCRIPT_HASH_LEN;
use crate::virtual_machine::context::ExecContext;
use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::stack::EvaluationStack;
use crate::virtual_machine::syscall::{DEFAULT_SYSCALL_COST, SyscallTable};
use std::fmt;

pub const GET_TRIGGER: &str = "Neo.Runtime.GetTrigger";
pub const CHECK_WITNESS: &str = "Neo.Runtime.CheckWitness";
pub const NOTIFY: &str = "Neo.Runtime.Notify";
pub const LOG: &str = "Neo.Runtime.Log";

/// CheckWitness cost hint (0.2 GAS).
pub const CHECK_WITNESS_COST: u64 = 200;

/// Registers the runtime syscalls in `table`.
pub fn register(table: &mut SyscallTable) {
    table.register(GET_TRIGGER, get_trigger, DEFAULT_SYSCALL_COST);
    table.register(CHECK_WITNESS, check_witness, CHECK_WITNESS_COST);
    table.register(NOTIFY, notify, DEFAULT_SYSCALL_COST);
    table.register(LOG, log, DEFAULT_SYSCALL_COST);
}

/// How a CheckWitness operand was interpreted, chosen by its length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WitnessKind {
    ScriptHash,
    PublicKey,
    Unknown,
}

impl WitnessKind {
    pub fn of(witness: &[u8]) -> Self {
        match witness.len() {
            SCRIPT_HASH_LEN => WitnessKind::ScriptHash,
            COMPRESSED_PUBLIC_KEY_LEN => WitnessKind::PublicKey,
            _ => WitnessKind::Unknown,
        }
    }
}

impl fmt::Display for WitnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessKind::ScriptHash => write!(f, "Script Hash"),
            WitnessKind::PublicKey => write!(f, "Public Key"),
            WitnessKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Pushes the integer tag of the current trigger. Never fails.
pub fn get_trigger(stack: &mut EvaluationStack, ctx: &ExecContext<'_>) -> Result<bool, VMError> {
    stack.push(i64::from(ctx.trigger() as u8));
    Ok(true)
}

/// Pops a witness and pushes whether the invoker satisfies it.
///
/// - 20 bytes (script hash): always authorized; the emulator does not run the
///   witness's verification script
/// - 33 bytes (compressed public key): authorized iff it equals the invoker's key
/// - anything else: not authorized
///
/// A failed check is a pushed `false`, never a failed syscall.
pub fn check_witness(stack: &mut EvaluationStack, ctx: &ExecContext<'_>) -> Result<bool, VMError> {
    let witness = stack.pop_bytes(CHECK_WITNESS)?;

    let kind = WitnessKind::of(&witness);
    let authorized = match kind {
        WitnessKind::ScriptHash => true,
        WitnessKind::PublicKey => ctx
            .invoker
            .is_some_and(|key| key.compressed_public_key().as_slice() == witness.as_slice()),
        WitnessKind::Unknown => false,
    };

    ctx.log.emit(&format!(
        "Checking Witness [{kind}]: {witness} => {authorized}"
    ));

    stack.push(authorized);
    Ok(true)
}

/// Pops an Array and logs its elements joined by `" / "`.
///
/// Returns `false` without logging if the popped item is not an Array.
pub fn notify(stack: &mut EvaluationStack, ctx: &ExecContext<'_>) -> Result<bool, VMError> {
    let state = stack.pop(NOTIFY)?;
    if state.as_array().is_none() {
        return Ok(false);
    }
    ctx.log.emit(&state.to_string());
    Ok(true)
}

/// Pops any item and logs its text rendering.
pub fn log(stack: &mut EvaluationStack, ctx: &ExecContext<'_>) -> Result<bool, VMError> {
    let message = stack.pop(LOG)?;
    ctx.log.emit(&message.to_string());
    Ok(true)
}

#[cfg(test)]
mod tests;
