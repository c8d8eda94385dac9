use crate::header::{Header, flags};

#[test]
fn header_size() {
    assert_eq!(std::mem::size_of::<Header>(), 64);
}

#[test]
fn header_default() {
    let h = Header::default();
    assert!(h.validate_magic());
    assert!(h.validate_version());
    assert_eq!(h.total_size, 0);
    assert!(!h.is_framework());
}

#[test]
fn header_roundtrip() {
    let h = Header {
        checksum: 0xDEAD_BEEF,
        total_size: 512,
        str_blob_offset: 64,
        str_table_offset: 128,
        type_defs_offset: 192,
        members_offset: 256,
        module_version: 7,
        str_table_count: 9,
        type_defs_count: 2,
        members_count: 5,
        name: 1,
        ..Default::default()
    };

    let bytes = h.to_bytes();
    assert_eq!(&bytes[0..4], b"TSMD");
    assert_eq!(Header::from_bytes(&bytes), h);
}

#[test]
fn header_framework_flag() {
    let mut h = Header::default();
    h.set_framework(true);
    assert!(h.is_framework());
    assert_eq!(h.flags, flags::FRAMEWORK);

    let decoded = Header::from_bytes(&h.to_bytes());
    assert!(decoded.is_framework());

    h.set_framework(false);
    assert_eq!(h.flags, 0);
}

#[test]
fn header_rejects_foreign_magic() {
    let mut bytes = Header::default().to_bytes();
    bytes[0..4].copy_from_slice(b"\x7fELF");
    assert!(!Header::from_bytes(&bytes).validate_magic());
}
