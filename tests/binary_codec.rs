mod common;

use common::{RS, generic_image, init_logger};
use nist_codec::nist::codec;
use nist_codec::nist::format::layout;
use nist_codec::{Charset, Cursor, NistError, RecordBuilder};

/// Length 1024, IDC 4, IMP 5, FGP [6], ISR 12, HLL 123, VLL 987, GCA 17, then
/// 1006 bytes of 3.
fn fingerprint_1024() -> Vec<u8> {
    let mut bytes = vec![0, 0, 4, 0, 4, 5, 6, 255, 255, 255, 255, 255, 12];
    bytes.extend_from_slice(&123u16.to_be_bytes());
    bytes.extend_from_slice(&987u16.to_be_bytes());
    bytes.push(17);
    bytes.extend(std::iter::repeat_n(3u8, 1006));
    bytes
}

#[test]
fn generic_layout_decodes_reference_record() {
    init_logger();
    let bytes = fingerprint_1024();
    assert_eq!(bytes.len(), 1024);

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let record = codec::decode_record(&mut cursor, 4).expect("decode type-4");

    assert_eq!(record.text(1), Some("1024"));
    assert_eq!(record.idc(), Some("4"));
    assert_eq!(record.text(3), Some("5"));
    assert_eq!(record.text(4), Some("6"));
    assert_eq!(record.text(5), Some("12"));
    assert_eq!(record.text(6), Some("123"));
    assert_eq!(record.text(7), Some("987"));
    assert_eq!(record.text(8), Some("17"));
    let data = record.binary(999).expect("image data");
    assert_eq!(data.len(), 1006);
    assert!(data.iter().all(|&b| b == 3));
    assert_eq!(cursor.position(), 1024);

    let encoded = codec::encode_record(&record, Charset::Ascii).expect("encode type-4");
    assert_eq!(encoded, bytes);
}

#[test]
fn short_payload_is_clamped() {
    let mut bytes = fingerprint_1024();
    bytes.truncate(118);

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let record = codec::decode_record(&mut cursor, 4).expect("truncated record still decodes");

    assert_eq!(record.binary(999).map(<[u8]>::len), Some(100));
    assert_eq!(record.text(1), Some("1024"));
    assert_eq!(cursor.position(), 1024, "cursor advances by the declared length");
    assert!(cursor.is_at_end());
}

#[test]
fn truncated_header_omits_missing_slots() {
    let bytes = fingerprint_1024()[..10].to_vec();
    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let record = codec::decode_record(&mut cursor, 4).expect("decode");

    assert_eq!(record.idc(), Some("4"));
    assert_eq!(record.text(3), Some("5"));
    assert_eq!(record.text(4), Some("6"), "partial finger positions are kept");
    assert!(!record.has_field(5));
    assert!(!record.has_field(6));
    assert!(!record.has_field(999));
}

#[test]
fn length_past_buffer_end_is_an_error() {
    let bytes = vec![0, 0, 4];
    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    assert!(matches!(
        codec::decode_record(&mut cursor, 4),
        Err(NistError::Decode { record_type: 4, position: 0, .. })
    ));
}

#[test]
fn multiple_finger_positions_round_trip() {
    let record = RecordBuilder::new(4)
        .text(1, "20")
        .and_then(|b| b.text(2, "1"))
        .and_then(|b| b.groups(4, &[vec!["2"], vec!["3"], vec!["7"]]))
        .and_then(|b| b.binary(999, vec![0xAB, 0xCD]))
        .expect("builder")
        .build();

    let bytes = codec::encode_record(&record, Charset::Ascii).expect("encode");
    assert_eq!(bytes.len(), 20);
    assert_eq!(&bytes[6..12], &[2, 3, 7, 255, 255, 255]);

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let decoded = codec::decode_record(&mut cursor, 4).expect("decode");
    assert_eq!(decoded.text(4), Some(format!("2{RS}3{RS}7").as_str()));
    assert_eq!(decoded.binary(999), Some(&[0xAB, 0xCD][..]));
}

#[test]
fn missing_fields_keep_offsets() {
    let record = RecordBuilder::new(4)
        .text(1, "21")
        .and_then(|b| b.text(2, "9"))
        .and_then(|b| b.text(7, "300"))
        .and_then(|b| b.binary(999, vec![1, 2, 3]))
        .expect("builder")
        .build();

    let bytes = codec::encode_record(&record, Charset::Ascii).expect("encode");
    let mut expected = vec![0, 0, 0, 21, 9, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0];
    expected.extend_from_slice(&300u16.to_be_bytes());
    expected.push(0);
    expected.extend_from_slice(&[1, 2, 3]);
    assert_eq!(bytes, expected);
}

#[test]
fn signature_layout_round_trips() {
    let mut bytes = vec![0, 0, 0, 16, 2, 0, 1, 0];
    bytes.extend_from_slice(&400u16.to_be_bytes());
    bytes.extend_from_slice(&150u16.to_be_bytes());
    bytes.extend_from_slice(&[9, 8, 7, 6]);

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let record = codec::decode_record(&mut cursor, 8).expect("decode type-8");
    assert_eq!(record.idc(), Some("2"));
    assert_eq!(record.text(3), Some("0"));
    assert_eq!(record.text(4), Some("1"));
    assert_eq!(record.text(6), Some("400"));
    assert_eq!(record.text(7), Some("150"));
    assert_eq!(record.binary(8), Some(&[9, 8, 7, 6][..]));
    assert_eq!(codec::encode_record(&record, Charset::Ascii).expect("encode"), bytes);
}

#[test]
fn extended_layout_round_trips() {
    let mut bytes = vec![0, 0, 0, 36, 1, 2, 11, 12, 255, 255, 255, 255, 4];
    bytes.extend_from_slice(&513u16.to_be_bytes()); // IMD
    bytes.extend_from_slice(&7u16.to_be_bytes()); // PCN
    bytes.extend_from_slice(&[19, 0, 19, 0, 0, 0, 0, 0, 0, 0, 1]); // RES
    bytes.extend_from_slice(&640u16.to_be_bytes());
    bytes.extend_from_slice(&480u16.to_be_bytes());
    bytes.push(1);
    bytes.extend_from_slice(&[0x55, 0x66, 0x77]);
    assert_eq!(bytes.len(), 36);

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let record = codec::decode_record(&mut cursor, 7).expect("decode type-7");
    assert_eq!(record.text(4), Some(format!("11{RS}12").as_str()));
    assert_eq!(record.text(5), Some("4"));
    assert_eq!(record.text(6), Some("513"));
    assert_eq!(record.text(8).map(|s| s.split(RS).count()), Some(11));
    assert_eq!(record.text(9), Some("640"));
    assert_eq!(record.text(10), Some("480"));
    assert_eq!(record.binary(999), Some(&[0x55, 0x66, 0x77][..]));
    assert_eq!(codec::encode_record(&record, Charset::Ascii).expect("encode"), bytes);
}

#[test]
fn out_of_range_values_fail_to_encode() {
    let too_wide = RecordBuilder::new(4)
        .text(1, "18")
        .and_then(|b| b.text(2, "300"))
        .expect("builder")
        .build();
    assert!(matches!(
        codec::encode_record(&too_wide, Charset::Ascii),
        Err(NistError::Encode { record_type: 4, .. })
    ));

    let not_a_number = RecordBuilder::new(4)
        .text(1, "18")
        .and_then(|b| b.text(6, "wide"))
        .expect("builder")
        .build();
    assert!(codec::encode_record(&not_a_number, Charset::Ascii).is_err());

    let no_length = RecordBuilder::new(4).text(2, "1").expect("builder").build();
    assert!(codec::encode_record(&no_length, Charset::Ascii).is_err());
}

#[test]
fn consecutive_image_records_share_one_cursor() {
    let mut bytes = generic_image(1, &[1, 1]);
    bytes.extend(generic_image(2, &[2, 2, 2]));

    let mut cursor = Cursor::new(&bytes, Charset::Ascii);
    let first = codec::decode_record(&mut cursor, 4).expect("first");
    let second = codec::decode_record(&mut cursor, 4).expect("second");
    assert_eq!(first.binary(999), Some(&[1, 1][..]));
    assert_eq!(second.idc(), Some("2"));
    assert_eq!(second.binary(999), Some(&[2, 2, 2][..]));
    assert!(cursor.is_at_end());
}

#[test]
fn declared_image_data_must_be_present() {
    let missing = RecordBuilder::new(4)
        .text(1, "22")
        .and_then(|b| b.text(2, "1"))
        .expect("builder")
        .build();
    assert!(matches!(
        codec::encode_record(&missing, Charset::Ascii),
        Err(NistError::Encode { record_type: 4, .. })
    ));

    let header_only = RecordBuilder::new(4)
        .text(1, "18")
        .and_then(|b| b.text(2, "1"))
        .expect("builder")
        .build();
    let bytes = codec::encode_record(&header_only, Charset::Ascii).expect("encode");
    assert_eq!(bytes.len(), 18);
}

#[test]
fn registry_follows_layout_table() {
    for record_type in 0..20 {
        let name = codec::codec_for(record_type).name();
        match layout::for_record_type(record_type) {
            Some(layout) => assert_eq!(name, layout.name, "type-{}", record_type),
            None if record_type == 1 => assert_eq!(name, "header"),
            None => assert_eq!(name, "text", "type-{}", record_type),
        }
    }
    assert_eq!(codec::codec_for(5).name(), "generic");
    assert_eq!(codec::codec_for(7).name(), "extended");
    assert_eq!(codec::codec_for(8).name(), "signature");
}
