use super::*;
use crate::crypto::key_pair::{KeyPair, PRIVATE_KEY_LEN};
use crate::types::bytes::Bytes;
use crate::virtual_machine::context::TriggerType;
use crate::virtual_machine::log_sink::LogSink;
use crate::virtual_machine::log_sink::tests::capturing_sink;
use crate::virtual_machine::stack_item::StackItem;
use num_bigint::BigInt;

fn invoker() -> KeyPair {
    KeyPair::new(&[0x01; PRIVATE_KEY_LEN]).unwrap()
}

fn stack_with(item: impl Into<StackItem>) -> EvaluationStack {
    let mut stack = EvaluationStack::new();
    stack.push(item);
    stack
}

/// Runs CheckWitness on `witness` and returns (syscall result, pushed value).
fn run_check_witness(witness: &[u8], invoker: Option<&KeyPair>) -> (bool, StackItem) {
    let sink = LogSink::new();
    let mut ctx = ExecContext::new(&sink);
    ctx.invoker = invoker;

    let mut stack = stack_with(witness);
    let succeeded = check_witness(&mut stack, &ctx).unwrap();
    assert_eq!(stack.len(), 1);
    (succeeded, stack.pop("test").unwrap())
}

// ==================== GetTrigger ====================

#[test]
fn get_trigger_pushes_application_tag() {
    let sink = LogSink::new();
    let mut stack = EvaluationStack::new();
    assert_eq!(get_trigger(&mut stack, &ExecContext::new(&sink)), Ok(true));
    assert_eq!(
        stack.pop("test").unwrap(),
        StackItem::Integer(BigInt::from(0x10))
    );
    assert_eq!(TriggerType::Application as u8, 0x10);
}

#[test]
fn get_trigger_ignores_existing_stack() {
    let sink = LogSink::new();
    let ctx = ExecContext::new(&sink);
    let mut stack = stack_with(vec![0xFFu8; 4]);
    stack.push(true);

    assert_eq!(get_trigger(&mut stack, &ctx), Ok(true));
    assert_eq!(get_trigger(&mut stack, &ctx), Ok(true));
    assert_eq!(stack.len(), 4);
    assert_eq!(stack.pop("test").unwrap(), StackItem::from(0x10i64));
    assert_eq!(stack.pop("test").unwrap(), StackItem::from(0x10i64));
    assert_eq!(stack.pop("test").unwrap(), StackItem::Boolean(true));
}

// ==================== CheckWitness ====================

#[test]
fn check_witness_matching_public_key() {
    let key = invoker();
    let (ok, value) = run_check_witness(key.compressed_public_key(), Some(&key));
    assert!(ok);
    assert_eq!(value, StackItem::Boolean(true));
}

#[test]
fn check_witness_other_public_key() {
    let key = invoker();
    let other = KeyPair::new(&[0x02; PRIVATE_KEY_LEN]).unwrap();
    let (ok, value) = run_check_witness(other.compressed_public_key(), Some(&key));
    assert!(ok);
    assert_eq!(value, StackItem::Boolean(false));
}

#[test]
fn check_witness_public_key_without_invoker() {
    let key = invoker();
    let (ok, value) = run_check_witness(key.compressed_public_key(), None);
    assert!(ok);
    assert_eq!(value, StackItem::Boolean(false));
}

#[test]
fn check_witness_any_script_hash_authorizes() {
    let key = invoker();
    for witness in [[0u8; 20], [0xAB; 20], key.script_hash().0] {
        let (ok, value) = run_check_witness(&witness, Some(&key));
        assert!(ok);
        assert_eq!(value, StackItem::Boolean(true));
    }
    let (ok, value) = run_check_witness(&[0x11; 20], None);
    assert!(ok);
    assert_eq!(value, StackItem::Boolean(true));
}

#[test]
fn check_witness_unknown_length() {
    let key = invoker();
    for len in [0, 5, 19, 21, 32, 34, 64] {
        let (ok, value) = run_check_witness(&vec![0x01; len], Some(&key));
        assert!(ok);
        assert_eq!(value, StackItem::Boolean(false));
    }
}

#[test]
fn check_witness_logs_kind_and_outcome() {
    let key = invoker();
    let (sink, lines) = capturing_sink();
    let ctx = ExecContext::new(&sink).with_invoker(&key);

    let mut stack = stack_with(key.compressed_public_key().as_slice());
    check_witness(&mut stack, &ctx).unwrap();
    stack.push(vec![0xAAu8; 20]);
    check_witness(&mut stack, &ctx).unwrap();
    stack.push(vec![0x01u8, 0x02]);
    check_witness(&mut stack, &ctx).unwrap();

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        format!(
            "Checking Witness [Public Key]: {} => true",
            hex::encode(key.compressed_public_key())
        )
    );
    assert_eq!(
        lines[1],
        format!("Checking Witness [Script Hash]: {} => true", "aa".repeat(20))
    );
    assert_eq!(lines[2], "Checking Witness [Unknown]: 0102 => false");
}

#[test]
fn check_witness_rejects_non_byte_array() {
    let sink = LogSink::new();
    let mut stack = stack_with(42i64);
    assert_eq!(
        check_witness(&mut stack, &ExecContext::new(&sink)),
        Err(VMError::UnsupportedOperandType {
            syscall: CHECK_WITNESS,
            expected: "ByteArray",
            actual: "Integer",
        })
    );
}

#[test]
fn check_witness_empty_stack_underflows() {
    let sink = LogSink::new();
    let mut stack = EvaluationStack::new();
    assert_eq!(
        check_witness(&mut stack, &ExecContext::new(&sink)),
        Err(VMError::StackUnderflow {
            syscall: CHECK_WITNESS
        })
    );
}

#[test]
fn witness_kind_by_length() {
    assert_eq!(WitnessKind::of(&[0; 20]), WitnessKind::ScriptHash);
    assert_eq!(WitnessKind::of(&[0; 33]), WitnessKind::PublicKey);
    assert_eq!(WitnessKind::of(&[]), WitnessKind::Unknown);
    assert_eq!(WitnessKind::PublicKey.to_string(), "Public Key");
}

// ==================== Notify ====================

#[test]
fn notify_logs_array_elements() {
    let (sink, lines) = capturing_sink();
    let mut stack = stack_with(vec![
        StackItem::from(vec![0x01u8]),
        StackItem::from(vec![0x02u8]),
    ]);

    assert_eq!(notify(&mut stack, &ExecContext::new(&sink)), Ok(true));
    assert!(stack.is_empty());
    assert_eq!(*lines.lock().unwrap(), vec!["01 / 02"]);
}

#[test]
fn notify_formats_mixed_and_nested_items() {
    let (sink, lines) = capturing_sink();
    let mut stack = stack_with(vec![
        StackItem::from(Bytes::from("transfer")),
        StackItem::from(100i64),
        StackItem::from(vec![StackItem::from(false), StackItem::from(-1i64)]),
    ]);

    assert_eq!(notify(&mut stack, &ExecContext::new(&sink)), Ok(true));
    assert_eq!(
        *lines.lock().unwrap(),
        vec!["7472616e73666572 / 100 / false / -1"]
    );
}

#[test]
fn notify_rejects_non_array_without_logging() {
    let (sink, lines) = capturing_sink();
    let ctx = ExecContext::new(&sink);

    let mut stack = stack_with(42i64);
    assert_eq!(notify(&mut stack, &ctx), Ok(false));
    assert!(stack.is_empty());

    let mut stack = stack_with(vec![0x01u8, 0x02]);
    assert_eq!(notify(&mut stack, &ctx), Ok(false));

    assert!(lines.lock().unwrap().is_empty());
}

#[test]
fn notify_empty_array_logs_empty_line() {
    let (sink, lines) = capturing_sink();
    let mut stack = stack_with(Vec::<StackItem>::new());
    assert_eq!(notify(&mut stack, &ExecContext::new(&sink)), Ok(true));
    assert_eq!(*lines.lock().unwrap(), vec![""]);
}

#[test]
fn notify_empty_stack_underflows() {
    let sink = LogSink::new();
    let mut stack = EvaluationStack::new();
    assert_eq!(
        notify(&mut stack, &ExecContext::new(&sink)),
        Err(VMError::StackUnderflow { syscall: NOTIFY })
    );
}

// ==================== Log ====================

#[test]
fn log_formats_each_kind() {
    let (sink, lines) = capturing_sink();
    let ctx = ExecContext::new(&sink);
    let mut stack = EvaluationStack::new();

    for item in [
        StackItem::from(Bytes::from([0xCAu8, 0xFE])),
        StackItem::from(12345i64),
        StackItem::from(true),
        StackItem::from(vec![StackItem::from(1i64), StackItem::from(2i64)]),
        StackItem::from(Bytes::empty()),
    ] {
        stack.push(item);
        assert_eq!(log(&mut stack, &ctx), Ok(true));
    }

    assert_eq!(
        *lines.lock().unwrap(),
        vec!["cafe", "12345", "true", "1 / 2", ""]
    );
}

#[test]
fn log_without_observer_still_succeeds() {
    let sink = LogSink::new();
    let mut stack = stack_with(Bytes::from("hello"));
    assert_eq!(log(&mut stack, &ExecContext::new(&sink)), Ok(true));
    assert!(stack.is_empty());
}

#[test]
fn log_empty_stack_underflows() {
    let sink = LogSink::new();
    let mut stack = EvaluationStack::new();
    assert_eq!(
        log(&mut stack, &ExecContext::new(&sink)),
        Err(VMError::StackUnderflow { syscall: LOG })
    );
}

// ==================== Dispatch ====================

#[test]
fn table_routes_to_runtime_handlers() {
    let key = invoker();
    let table = SyscallTable::runtime();
    let (sink, lines) = capturing_sink();
    let ctx = ExecContext::new(&sink).with_invoker(&key);
    let mut stack = EvaluationStack::new();

    stack.push(key.compressed_public_key().as_slice());
    assert_eq!(table.invoke(CHECK_WITNESS, &mut stack, &ctx), Ok(true));
    assert_eq!(stack.pop("test").unwrap(), StackItem::Boolean(true));

    stack.push(vec![StackItem::from(Bytes::from("a"))]);
    assert_eq!(table.invoke(NOTIFY, &mut stack, &ctx), Ok(true));

    stack.push(7i64);
    assert_eq!(table.invoke(NOTIFY, &mut stack, &ctx), Ok(false));

    assert_eq!(table.invoke(GET_TRIGGER, &mut stack, &ctx), Ok(true));
    assert_eq!(table.invoke(LOG, &mut stack, &ctx), Ok(true));

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "61");
    assert_eq!(lines[2], "16");
}
