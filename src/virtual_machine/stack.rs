//! LIFO evaluation stack shared between the interpreter and syscalls.

use crate::types::bytes::Bytes;
use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::stack_item::StackItem;

/// Operand stack owned by a single running invocation.
///
/// Pops are attributed to the syscall performing them so faults name their origin.
#[derive(Clone, Debug, Default)]
pub struct EvaluationStack {
    items: Vec<StackItem>,
}

impl EvaluationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes any value convertible into a [`StackItem`].
    pub fn push(&mut self, item: impl Into<StackItem>) {
        self.items.push(item.into());
    }

    /// Removes and returns the top item.
    ///
    /// Returns [`VMError::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self, syscall: &'static str) -> Result<StackItem, VMError> {
        self.items.pop().ok_or(VMError::StackUnderflow { syscall })
    }

    /// Removes the top item, requiring it to be a ByteArray.
    ///
    /// Integer and Boolean items are not coerced. On a type mismatch the item
    /// has already been consumed, as it would be by the interpreter's own pop.
    pub fn pop_bytes(&mut self, syscall: &'static str) -> Result<Bytes, VMError> {
        match self.pop(syscall)? {
            StackItem::ByteArray(bytes) => Ok(bytes),
            other => Err(VMError::UnsupportedOperandType {
                syscall,
                expected: "ByteArray",
                actual: other.type_name(),
            }),
        }
    }

    /// Returns the top item without removing it.
    pub fn peek(&self) -> Option<&StackItem> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
