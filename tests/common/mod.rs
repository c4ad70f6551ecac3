#![allow(dead_code)]

pub const FS: u8 = 0x1C;
pub const GS: u8 = 0x1D;
pub const RS: char = '\u{1E}';
pub const US: char = '\u{1F}';

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serializes a tagged record, filling in field 1 so it counts the whole record.
pub fn tagged(record_type: u32, fields: &[(u32, &[u8])]) -> Vec<u8> {
    let render = |len: usize| -> Vec<u8> {
        let mut out = format!("{}.001:{}", record_type, len).into_bytes();
        for (field, value) in fields {
            out.push(GS);
            out.extend(format!("{}.{:03}:", record_type, field).bytes());
            out.extend_from_slice(value);
        }
        out.push(FS);
        out
    };
    let mut len = render(0).len();
    while render(len).len() != len {
        len = render(len).len();
    }
    render(len)
}

/// A generic-layout image record (types 3-6) with an 18-byte header.
pub fn generic_image(idc: u8, payload: &[u8]) -> Vec<u8> {
    let len = (18 + payload.len()) as u32;
    let mut out = len.to_be_bytes().to_vec();
    out.push(idc); // IDC
    out.push(0); // IMP
    out.extend_from_slice(&[1, 255, 255, 255, 255, 255]); // FGP
    out.push(0); // ISR
    out.extend_from_slice(&10u16.to_be_bytes()); // HLL
    out.extend_from_slice(&10u16.to_be_bytes()); // VLL
    out.push(0); // GCA
    out.extend_from_slice(payload);
    out
}

/// Builds a CNT value from `(type, idc)` pairs, header pair first.
pub fn directory(pairs: &[(u32, &str)]) -> String {
    let mut groups = vec![format!("1{}{}", US, pairs.len())];
    groups.extend(pairs.iter().map(|(t, idc)| format!("{}{}{}", t, US, idc)));
    groups.join(&RS.to_string())
}

pub fn header(cnt: &str) -> Vec<u8> {
    tagged(1, &[(2, b"0502"), (3, cnt.as_bytes()), (4, b"CAR")])
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
