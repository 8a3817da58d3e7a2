//! Syscall layer between a contract interpreter and the invoker identity.
//!
//! The bytecode interpreter itself lives outside this crate. It owns an
//! [`stack::EvaluationStack`] per invocation and, on each `SYSCALL` instruction,
//! resolves the name through a [`syscall::SyscallTable`], passing an
//! [`context::ExecContext`] that carries the active [`KeyPair`] (if any) and the
//! [`log_sink::LogSink`].
//!
//! # Modules
//!
//! - [`stack_item`]: tagged stack values and their text rendering
//! - [`stack`]: the evaluation stack with type-checked pops
//! - [`context`]: per-invocation context and trigger types
//! - [`log_sink`]: trace output plus a single registrable observer
//! - [`syscall`]: name → handler + cost registration table
//! - [`runtime`]: the `Neo.Runtime.*` syscalls
//! - [`errors`]: faults propagated to the host
//!
//! [`KeyPair`]: crate::crypto::key_pair::KeyPair

pub mod context;
pub mod errors;
pub mod log_sink;
pub mod runtime;
pub mod stack;
pub mod stack_item;
pub mod syscall;
