//! # Operation Wire Codec
//!
//! Canonical binary bodies for each operation kind. The layout is fixed by
//! the chain and verified byte-for-byte by every node:
//!
//! - every integer is an unsigned LEB128 varint
//! - every byte blob is `varint(length) || bytes`
//! - addresses are embedded as their raw 34-byte form, no length prefix
//!
//! Field order is `fee, expire_period, tag, <kind-specific fields>`.
//!
//! Transfers have two serializer entry points. Early network deployments
//! accepted a different transfer field ordering than the one published
//! later, and wallets learned to resubmit with the older layout when a node
//! rejected the first attempt. Under current chain rules the two functions
//! produce identical bytes, but they are kept independent and swappable so
//! the resubmission path in [`crate::submit`] stays honest if they ever
//! diverge again.

use super::Operation;
use crate::codec::varint::encode_varint_into;
use crate::identity::Address;

/// Which transfer layout to serialize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    /// The layout published in the current node software.
    Current,
    /// The layout accepted by early deployments; used for one resubmission
    /// after a rejected transfer.
    Legacy,
}

/// Serializes an operation body with the given transfer layout.
///
/// `format` only matters for [`Operation::Transfer`]; every other kind has a
/// single wire layout.
pub fn serialize_operation(operation: &Operation, format: TransferFormat) -> Vec<u8> {
    match operation {
        Operation::Transfer {
            fee,
            expire_period,
            recipient,
            amount,
        } => match format {
            TransferFormat::Current => serialize_transfer(*fee, *expire_period, recipient, *amount),
            TransferFormat::Legacy => {
                serialize_transfer_legacy(*fee, *expire_period, recipient, *amount)
            }
        },
        Operation::RollBuy {
            fee,
            expire_period,
            roll_count,
        } => serialize_roll(*fee, *expire_period, operation.tag(), *roll_count),
        Operation::RollSell {
            fee,
            expire_period,
            roll_count,
        } => serialize_roll(*fee, *expire_period, operation.tag(), *roll_count),
        Operation::ExecuteBytecode {
            fee,
            expire_period,
            max_gas,
            coins,
            bytecode,
            datastore,
        } => serialize_execute_bytecode(*fee, *expire_period, *max_gas, *coins, bytecode, datastore),
        Operation::CallContract {
            fee,
            expire_period,
            max_gas,
            coins,
            target,
            function,
            parameter,
        } => serialize_call_contract(
            *fee,
            *expire_period,
            *max_gas,
            *coins,
            target,
            function,
            parameter,
        ),
    }
}

/// Transfer body, current layout:
/// `fee || expire_period || tag(0) || recipient(34) || amount`.
pub fn serialize_transfer(fee: u64, expire_period: u64, recipient: &Address, amount: u64) -> Vec<u8> {
    let mut body = Vec::with_capacity(64);
    encode_varint_into(&mut body, fee);
    encode_varint_into(&mut body, expire_period);
    encode_varint_into(&mut body, 0);
    body.extend_from_slice(&recipient.to_bytes());
    encode_varint_into(&mut body, amount);
    body
}

/// Transfer body, legacy layout.
///
/// Deliberately written out in full rather than delegating to
/// [`serialize_transfer`]: the two layouts are maintained as separate code
/// paths so a future divergence is a one-line edit here, not a refactor.
pub fn serialize_transfer_legacy(
    fee: u64,
    expire_period: u64,
    recipient: &Address,
    amount: u64,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(64);
    encode_varint_into(&mut body, fee);
    encode_varint_into(&mut body, expire_period);
    encode_varint_into(&mut body, 0);
    body.extend_from_slice(&recipient.to_bytes());
    encode_varint_into(&mut body, amount);
    body
}

/// Roll-buy / roll-sell body: `fee || expire_period || tag || roll_count`.
fn serialize_roll(fee: u64, expire_period: u64, tag: u64, roll_count: u64) -> Vec<u8> {
    let mut body = Vec::with_capacity(32);
    encode_varint_into(&mut body, fee);
    encode_varint_into(&mut body, expire_period);
    encode_varint_into(&mut body, tag);
    encode_varint_into(&mut body, roll_count);
    body
}

/// Bytecode-execution body:
/// `fee || expire_period || tag(3) || max_gas || coins ||
///  len(bytecode) || bytecode || entry_count ||
///  (len(key) || key || len(value) || value)*`.
fn serialize_execute_bytecode(
    fee: u64,
    expire_period: u64,
    max_gas: u64,
    coins: u64,
    bytecode: &[u8],
    datastore: &[(Vec<u8>, Vec<u8>)],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(64 + bytecode.len());
    encode_varint_into(&mut body, fee);
    encode_varint_into(&mut body, expire_period);
    encode_varint_into(&mut body, 3);
    encode_varint_into(&mut body, max_gas);
    encode_varint_into(&mut body, coins);
    write_blob(&mut body, bytecode);
    encode_varint_into(&mut body, datastore.len() as u64);
    for (key, value) in datastore {
        write_blob(&mut body, key);
        write_blob(&mut body, value);
    }
    body
}

/// Contract-call body:
/// `fee || expire_period || tag(4) || max_gas || coins || target(34) ||
///  len(function) || function || len(parameter) || parameter`.
fn serialize_call_contract(
    fee: u64,
    expire_period: u64,
    max_gas: u64,
    coins: u64,
    target: &Address,
    function: &str,
    parameter: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(96 + function.len() + parameter.len());
    encode_varint_into(&mut body, fee);
    encode_varint_into(&mut body, expire_period);
    encode_varint_into(&mut body, 4);
    encode_varint_into(&mut body, max_gas);
    encode_varint_into(&mut body, coins);
    body.extend_from_slice(&target.to_bytes());
    write_blob(&mut body, function.as_bytes());
    write_blob(&mut body, parameter);
    body
}

/// Length-prefixed blob: `varint(len) || bytes`.
fn write_blob(body: &mut Vec<u8>, bytes: &[u8]) {
    encode_varint_into(body, bytes.len() as u64);
    body.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::parse_amount;
    use crate::codec::encode_varint;
    use crate::identity::Keypair;

    fn sample_address() -> Address {
        Address::from_public_key(&Keypair::from_seed(&[1u8; 32]).public_key())
    }

    #[test]
    fn transfer_body_layout() {
        // The wire scenario every wallet implementation gets checked
        // against: 0.01 fee, expiry 1000, 1.5 transferred.
        let recipient = sample_address();
        let fee = parse_amount("0.01").unwrap();
        let amount = parse_amount("1.5").unwrap();

        let body = serialize_transfer(fee, 1000, &recipient, amount);

        let mut expected = Vec::new();
        expected.extend(encode_varint(10_000_000));
        expected.extend(encode_varint(1000));
        expected.extend(encode_varint(0));
        expected.extend_from_slice(&recipient.to_bytes());
        expected.extend(encode_varint(1_500_000_000));
        assert_eq!(body, expected);
    }

    #[test]
    fn legacy_transfer_matches_current_layout_today() {
        let recipient = sample_address();
        assert_eq!(
            serialize_transfer(123, 456, &recipient, 789),
            serialize_transfer_legacy(123, 456, &recipient, 789)
        );
    }

    #[test]
    fn serialize_operation_dispatches_transfer_formats() {
        let op = Operation::Transfer {
            fee: 5,
            expire_period: 10,
            recipient: sample_address(),
            amount: 99,
        };
        assert_eq!(
            serialize_operation(&op, TransferFormat::Current),
            serialize_operation(&op, TransferFormat::Legacy)
        );
    }

    #[test]
    fn roll_bodies_differ_only_in_tag() {
        let buy = serialize_operation(
            &Operation::RollBuy {
                fee: 1,
                expire_period: 2,
                roll_count: 3,
            },
            TransferFormat::Current,
        );
        let sell = serialize_operation(
            &Operation::RollSell {
                fee: 1,
                expire_period: 2,
                roll_count: 3,
            },
            TransferFormat::Current,
        );

        assert_eq!(buy, vec![1, 2, 1, 3]);
        assert_eq!(sell, vec![1, 2, 2, 3]);
    }

    #[test]
    fn execute_bytecode_body_layout() {
        let op = Operation::ExecuteBytecode {
            fee: 1,
            expire_period: 2,
            max_gas: 300,
            coins: 4,
            bytecode: vec![0xde, 0xad],
            datastore: vec![(vec![0x01], vec![0x02, 0x03])],
        };
        let body = serialize_operation(&op, TransferFormat::Current);

        let mut expected = Vec::new();
        expected.extend(encode_varint(1)); // fee
        expected.extend(encode_varint(2)); // expire period
        expected.extend(encode_varint(3)); // tag
        expected.extend(encode_varint(300)); // max gas
        expected.extend(encode_varint(4)); // coins
        expected.extend(encode_varint(2)); // bytecode length
        expected.extend_from_slice(&[0xde, 0xad]);
        expected.extend(encode_varint(1)); // datastore entries
        expected.extend(encode_varint(1)); // key length
        expected.push(0x01);
        expected.extend(encode_varint(2)); // value length
        expected.extend_from_slice(&[0x02, 0x03]);
        assert_eq!(body, expected);
    }

    #[test]
    fn empty_datastore_serializes_a_zero_count() {
        let op = Operation::ExecuteBytecode {
            fee: 0,
            expire_period: 0,
            max_gas: 0,
            coins: 0,
            bytecode: vec![],
            datastore: vec![],
        };
        // fee, expiry, tag, max_gas, coins, bytecode len, entry count
        assert_eq!(
            serialize_operation(&op, TransferFormat::Current),
            vec![0, 0, 3, 0, 0, 0, 0]
        );
    }

    #[test]
    fn call_contract_body_layout() {
        let target = sample_address();
        let op = Operation::CallContract {
            fee: 1,
            expire_period: 2,
            max_gas: 3,
            coins: 4,
            target,
            function: "mint".to_string(),
            parameter: vec![0x41, 0x42],
        };
        let body = serialize_operation(&op, TransferFormat::Current);

        let mut expected = Vec::new();
        expected.extend(encode_varint(1));
        expected.extend(encode_varint(2));
        expected.extend(encode_varint(4)); // tag
        expected.extend(encode_varint(3)); // max gas
        expected.extend(encode_varint(4)); // coins
        expected.extend_from_slice(&target.to_bytes());
        expected.extend(encode_varint(4)); // function name length
        expected.extend_from_slice(b"mint");
        expected.extend(encode_varint(2)); // parameter length
        expected.extend_from_slice(&[0x41, 0x42]);
        assert_eq!(body, expected);
    }

    #[test]
    fn empty_function_and_parameter_are_length_zero() {
        let op = Operation::CallContract {
            fee: 0,
            expire_period: 0,
            max_gas: 0,
            coins: 0,
            target: sample_address(),
            function: String::new(),
            parameter: vec![],
        };
        let body = serialize_operation(&op, TransferFormat::Current);
        // Last two bytes are the two zero length prefixes.
        assert_eq!(&body[body.len() - 2..], &[0, 0]);
    }

    #[test]
    fn large_values_use_multi_byte_varints() {
        let recipient = sample_address();
        let body = serialize_transfer(u64::MAX, 0, &recipient, 0);
        // A u64::MAX fee takes ten varint bytes.
        assert_eq!(&body[..10], encode_varint(u64::MAX).as_slice());
    }
}
