//! Tagged values held on the evaluation stack.

use crate::types::bytes::Bytes;
use num_bigint::BigInt;
use std::fmt;

/// Separator placed between array elements when an item is rendered as text.
pub const ARRAY_SEPARATOR: &str = " / ";

/// A value on the VM's evaluation stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackItem {
    Boolean(bool),
    /// Arbitrary-precision signed integer.
    Integer(BigInt),
    ByteArray(Bytes),
    Array(Vec<StackItem>),
}

impl StackItem {
    /// Returns the kind name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteArray(_) => "ByteArray",
            StackItem::Array(_) => "Array",
        }
    }

    /// Returns the elements if this item is an Array.
    pub fn as_array(&self) -> Option<&[StackItem]> {
        match self {
            StackItem::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Human-readable rendering used by the logging syscalls.
///
/// ByteArray renders as hex, Integer as decimal, Boolean as `true`/`false`,
/// and Array as its elements joined by [`ARRAY_SEPARATOR`]. Empty byte arrays
/// and empty arrays render as the empty string.
impl fmt::Display for StackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackItem::Boolean(value) => write!(f, "{value}"),
            StackItem::Integer(value) => write!(f, "{value}"),
            StackItem::ByteArray(bytes) => write!(f, "{bytes}"),
            StackItem::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(ARRAY_SEPARATOR)?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for StackItem {
    fn from(value: bool) -> Self {
        StackItem::Boolean(value)
    }
}

impl From<i64> for StackItem {
    fn from(value: i64) -> Self {
        StackItem::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for StackItem {
    fn from(value: BigInt) -> Self {
        StackItem::Integer(value)
    }
}

impl From<Bytes> for StackItem {
    fn from(value: Bytes) -> Self {
        StackItem::ByteArray(value)
    }
}

impl From<Vec<u8>> for StackItem {
    fn from(value: Vec<u8>) -> Self {
        StackItem::ByteArray(Bytes::from(value))
    }
}

impl From<&[u8]> for StackItem {
    fn from(value: &[u8]) -> Self {
        StackItem::ByteArray(Bytes::from(value))
    }
}

impl From<Vec<StackItem>> for StackItem {
    fn from(items: Vec<StackItem>) -> Self {
        StackItem::Array(items)
    }
}
