//! Command-line front end for the NEO contract emulator core.
//!
//! Loads or creates the invoker identity and runs runtime syscalls against it.
//!
//! # Usage
//! ```text
//! neo-emulator [OPTIONS]
//! ```
//!
//! # Options
//! - `--key <hex>`: Use a 32-byte hex private key and save it to the key file
//! - `--wif <wif>`: Import a WIF private key and save it to the key file
//! - `--generate`: Generate a new private key and save it to the key file
//! - `--key-file <path>`: Key file location (default `last.key`)
//! - `--address-version <n>`: Address version byte (default `0x17`)
//! - `--show-wif`: Also print the WIF of the loaded key
//! - `--check-witness <hex>`: Run `Neo.Runtime.CheckWitness` on a witness (repeatable)
//! - `--notify <text>`: Add a ByteArray to a `Neo.Runtime.Notify` payload (repeatable)
//! - `--syscalls`: List registered syscalls and their cost hints
//!
//! Without `--key`, `--wif` or `--generate` the key file is loaded if present.
//! Environment variables are described in [`neo_emulator::config`].

use neo_emulator::config::{Config, parse_address_version};
use neo_emulator::crypto::key_file::{load_key_file, save_key_file};
use neo_emulator::crypto::key_pair::KeyPair;
use neo_emulator::types::bytes::Bytes;
use neo_emulator::utils::log;
use neo_emulator::virtual_machine::context::ExecContext;
use neo_emulator::virtual_machine::log_sink::LogSink;
use neo_emulator::virtual_machine::runtime::{CHECK_WITNESS, NOTIFY};
use neo_emulator::virtual_machine::stack::EvaluationStack;
use neo_emulator::virtual_machine::stack_item::StackItem;
use neo_emulator::virtual_machine::syscall::SyscallTable;
use neo_emulator::{error, info};
use std::env;
use std::path::PathBuf;
use std::process;
use zeroize::Zeroizing;

/// Where the invoker key comes from when given on the command line.
enum KeySource {
    Hex(Zeroizing<String>),
    Wif(Zeroizing<String>),
    Generate,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        process::exit(0);
    }

    let mut config = Config::from_env();
    let mut key_source: Option<KeySource> = None;
    let mut show_wif = false;
    let mut list_syscalls = false;
    let mut witnesses: Vec<String> = Vec::new();
    let mut notify_items: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--key" => key_source = Some(KeySource::Hex(secret_value(&args, &mut i))),
            "--wif" => key_source = Some(KeySource::Wif(secret_value(&args, &mut i))),
            "--generate" => key_source = Some(KeySource::Generate),
            "--key-file" => config.key_file = PathBuf::from(flag_value(&args, &mut i)),
            "--address-version" => {
                let value = flag_value(&args, &mut i);
                config.address_version = parse_address_version(&value).unwrap_or_else(|e| {
                    eprintln!("{e}");
                    process::exit(1);
                });
            }
            "--show-wif" => show_wif = true,
            "--check-witness" => witnesses.push(flag_value(&args, &mut i)),
            "--notify" => notify_items.push(flag_value(&args, &mut i)),
            "--syscalls" => list_syscalls = true,
            other => {
                eprintln!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
        i += 1;
    }

    log::set_max_level(config.log_level);

    let invoker = match key_source {
        Some(source) => {
            let key = create_key(source, config.address_version);
            if let Err(e) = save_key_file(&config.key_file, &key) {
                error!("Failed to save key file {}: {e}", config.key_file.display());
                process::exit(1);
            }
            Some(key)
        }
        None => load_key_file(&config.key_file, config.address_version).unwrap_or_else(|e| {
            error!("{e}");
            process::exit(1);
        }),
    };

    match &invoker {
        Some(key) => print_identity(key, show_wif),
        None => println!("(No key loaded)"),
    }

    let table = SyscallTable::runtime();
    if list_syscalls {
        println!();
        for syscall in table.iter() {
            println!("{:<28} cost {}", syscall.name, syscall.cost);
        }
    }

    if witnesses.is_empty() && notify_items.is_empty() {
        return;
    }

    let mut sink = LogSink::new();
    sink.register(|line| println!("> {line}"));
    let mut ctx = ExecContext::new(&sink);
    if let Some(key) = &invoker {
        ctx = ctx.with_invoker(key);
    }
    let mut stack = EvaluationStack::new();

    println!();
    for witness in &witnesses {
        let bytes = hex::decode(witness.trim_start_matches("0x")).unwrap_or_else(|e| {
            error!("Invalid witness hex '{witness}': {e}");
            process::exit(1);
        });
        stack.push(bytes);
        run_syscall(&table, CHECK_WITNESS, &mut stack, &ctx);
        if let Some(result) = stack.peek() {
            println!("{CHECK_WITNESS} -> {result}");
        }
    }

    if !notify_items.is_empty() {
        let payload: Vec<StackItem> = notify_items
            .iter()
            .map(|text| StackItem::from(Bytes::from(text.as_str())))
            .collect();
        stack.push(payload);
        run_syscall(&table, NOTIFY, &mut stack, &ctx);
    }

    info!("Finished with {} item(s) left on the stack", stack.len());
}

/// Returns the value following the flag at `args[*i]`, advancing `i` past it.
fn flag_value(args: &[String], i: &mut usize) -> String {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("{flag} requires an argument");
            process::exit(1);
        }
    }
}

/// Like [`flag_value`], for values holding key material.
fn secret_value(args: &[String], i: &mut usize) -> Zeroizing<String> {
    Zeroizing::new(flag_value(args, i))
}

fn create_key(source: KeySource, address_version: u8) -> KeyPair {
    let result = match source {
        KeySource::Hex(text) => KeyPair::from_hex(&text, address_version),
        KeySource::Wif(text) => KeyPair::from_wif(&text, address_version),
        KeySource::Generate => Ok(KeyPair::random()),
    };
    result.unwrap_or_else(|e| {
        error!("Invalid private key: {e}");
        process::exit(1);
    })
}

fn run_syscall(
    table: &SyscallTable,
    name: &str,
    stack: &mut EvaluationStack,
    ctx: &ExecContext<'_>,
) {
    match table.invoke(name, stack, ctx) {
        Ok(true) => {}
        Ok(false) => error!("{name} reported failure"),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

fn print_identity(key: &KeyPair, show_wif: bool) {
    println!("Address:               {}", key.address());
    println!("Script hash:           {}", key.script_hash());
    println!(
        "Public key:            {}",
        hex::encode(key.compressed_public_key())
    );
    println!(
        "Signature script:      {}",
        hex::encode(key.signature_script())
    );
    if show_wif {
        println!("WIF:                   {}", key.wif());
    }
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} [OPTIONS]

Options:
  --key <hex>              Use a 32-byte hex private key and save it to the key file
  --wif <wif>              Import a WIF private key and save it to the key file
  --generate               Generate a new private key and save it to the key file
  --key-file <path>        Key file location (default: last.key)
  --address-version <n>    Address version byte (default: 0x17)
  --show-wif               Also print the WIF of the loaded key
  --check-witness <hex>    Run Neo.Runtime.CheckWitness on a witness (repeatable)
  --notify <text>          Add an item to a Neo.Runtime.Notify payload (repeatable)
  --syscalls               List registered syscalls and their cost hints
  -h, --help               Show this help

Environment:
  NEO_EMULATOR_LOG               trace | debug | info | warn | error
  NEO_EMULATOR_KEY_FILE          key file location
  NEO_EMULATOR_ADDRESS_VERSION   address version byte"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn secret_value_takes_next_argument() {
        let args = args(&["neo-emulator", "--key", "0x01", "--show-wif"]);
        let mut i = 1;
        let secret = secret_value(&args, &mut i);
        assert_eq!(secret.as_str(), "0x01");
        assert_eq!(i, 2);
    }

    #[test]
    fn create_key_from_hex_source() {
        let source = KeySource::Hex(Zeroizing::new("01".repeat(32)));
        let key = create_key(source, 0x17);
        assert_eq!(key.address(), "AYLadsx3W1g23kS8GD8UP65MgsS4dSFxhP");
    }
}
