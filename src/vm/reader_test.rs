//! Tests for bytecode stream decoding

use crate::compiler::{
    Opcode, StructureTag, encode_op, encode_op_str, encode_op_u64, encode_str, encode_u16,
    encode_u64,
};
use crate::vm::RuntimeError;

use super::{ByteReader, read_function_table};

#[test]
fn test_reads_are_little_endian() {
    let bytes = [2u8, 0, 9, 0, 0, 0, 0, 0, 0, 0];
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_opcode().unwrap(), Opcode::PushInt);
    assert_eq!(reader.read_i64().unwrap(), 9);
    assert_eq!(reader.position(), bytes.len());
}

#[test]
fn test_round_trips_the_writer_encoding() {
    let bytes = encode_op_str(Opcode::Load, "value");
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_opcode().unwrap(), Opcode::Load);
    assert_eq!(reader.read_str().unwrap(), "value");
}

#[test]
fn test_negative_integers_round_trip() {
    let bytes = encode_op_u64(Opcode::PushInt, (-4i64) as u64);
    let mut reader = ByteReader::new(&bytes);

    reader.read_opcode().unwrap();
    assert_eq!(reader.read_i64().unwrap(), -4);
}

#[test]
fn test_truncated_stream_reports_the_offset() {
    let bytes = encode_u16(Opcode::PushInt as u16);
    let mut reader = ByteReader::new(&bytes);

    reader.read_opcode().unwrap();
    let error = reader.read_u64().unwrap_err();
    assert!(matches!(error, RuntimeError::TruncatedStream { offset: 2 }));
}

#[test]
fn test_unknown_opcode_reports_the_offset() {
    let bytes = encode_u16(999);
    let error = ByteReader::new(&bytes).read_opcode().unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::UnknownOpcode {
            opcode: 999,
            offset: 0,
        },
    ));
}

#[test]
fn test_malformed_string_reports_the_offset() {
    let mut bytes = encode_u64(2);
    bytes.extend([0xff, 0xfe]);
    let error = ByteReader::new(&bytes).read_str().unwrap_err();

    assert!(matches!(error, RuntimeError::MalformedString { offset: 0 }));
}

#[test]
fn test_function_table_records_offsets_and_skips_bodies() {
    let body = encode_op(Opcode::Ret);
    let mut bytes = Vec::new();
    bytes.extend(encode_u16(StructureTag::Function as u16));
    bytes.extend(encode_str("noop"));
    bytes.extend(encode_u16(1));
    bytes.extend(encode_str("arg"));
    bytes.extend(encode_u64(body.len() as u64));
    let body_offset = bytes.len();
    bytes.extend(&body);
    bytes.extend(encode_u16(StructureTag::End as u16));
    let epilogue_offset = bytes.len();
    bytes.extend(encode_op(Opcode::End));

    let mut reader = ByteReader::new(&bytes);
    let functions = read_function_table(&mut reader).unwrap();

    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "noop");
    assert_eq!(functions[0].arguments, vec!["arg".to_string()]);
    assert_eq!(functions[0].offset, body_offset);
    assert_eq!(functions[0].length, body.len());
    assert_eq!(reader.position(), epilogue_offset);
}

#[test]
fn test_unknown_structure_tag_is_rejected() {
    let bytes = encode_u16(7);
    let mut reader = ByteReader::new(&bytes);
    let error = read_function_table(&mut reader).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::UnknownStructureTag { tag: 7, offset: 0 },
    ));
}
