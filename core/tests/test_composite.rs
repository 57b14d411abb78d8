// Composite codecs:
//
// * varint-prefixed UTF-8 strings and byte arrays, u32-LE-prefixed ASCII
// * 2D/3D vectors as f32 BE, f32 LE, and rounded zigzag varints
// * UUID wire ordering
// * atomic reads on truncated input

#[cfg(test)]
mod tests {
    use bincursor_core::{
        prelude::{Uuid, Vec2, Vec3},
        stream::{uuid_from_wire, uuid_to_wire},
        ErrorKind, Stream, StreamConfig, StreamError,
    };
    use proptest::prelude::*;

    const SAMPLE_UUID: &str = "123e4567-e89b-12d3-a456-426614174000";
    const SAMPLE_WIRE: [u8; 16] = [
        0xd3, 0x12, 0x9b, 0xe8, 0x67, 0x45, 0x3e, 0x12, 0x00, 0x40, 0x17, 0x14, 0x66, 0x42, 0x56,
        0xa4,
    ];

// # ✅ 1. UTF-8 strings

    #[test]
    fn string_layout() {
        let mut s = Stream::new();
        s.write_string("hi").unwrap();
        s.write_string("").unwrap();
        assert_eq!(s.as_slice(), &[0x02, 0x68, 0x69, 0x00]);

        assert_eq!(s.read_string().unwrap(), "hi");
        assert_eq!(s.read_string().unwrap(), "");
        assert!(s.at_end());
    }

    #[test]
    fn string_length_counts_bytes_not_chars() {
        let mut s = Stream::new();
        s.write_string("é").unwrap();
        assert_eq!(s.as_slice(), &[0x02, 0xC3, 0xA9]);
        assert_eq!(s.read_string().unwrap(), "é");
    }

    #[test]
    fn long_string_uses_multi_byte_prefix() {
        let text = "x".repeat(300);
        let mut s = Stream::new();
        s.write_string(&text).unwrap();
        assert_eq!(&s.as_slice()[..2], &[0xAC, 0x02]);
        assert_eq!(s.len(), 302);
        assert_eq!(s.read_string().unwrap(), text);
    }

// # ❌ 2. String failures

    #[test]
    fn invalid_utf8_is_reported_after_consuming_payload() {
        let mut s = Stream::from_bytes([0x02, 0xC3, 0x28]);
        let err = s.read_string().unwrap_err();
        assert!(matches!(err, StreamError::InvalidEncoding { kind: "utf-8", .. }));
        assert_eq!(s.read_offset(), 3);
    }

    #[test]
    fn truncated_string_rewinds_to_prefix() {
        let mut s = Stream::from_bytes([0x05, b'a']);
        assert_eq!(
            s.read_string(),
            Err(StreamError::BufferUnderrun { offset: 1, needed: 5, available: 1 })
        );
        assert_eq!(s.read_offset(), 0);
    }

    #[test]
    fn prefix_limit_applies_to_writes_and_reads() {
        let cfg = StreamConfig::new(None, Some(4), None);

        let mut w = Stream::with_config(cfg.clone());
        let err = w.write_string("hello").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);
        assert!(w.is_empty());
        w.write_string("hey").unwrap();

        let mut r = Stream::from_bytes_with_config(b"\x05hello", 0, cfg).unwrap();
        assert_eq!(r.read_string().unwrap_err().kind(), ErrorKind::ValueOutOfRange);
        assert_eq!(r.read_offset(), 0);
    }

// # ✅ 3. ASCII strings

    #[test]
    fn ascii_layout() {
        let mut s = Stream::new();
        s.write_ascii("abc").unwrap();
        assert_eq!(s.as_slice(), &[0x03, 0x00, 0x00, 0x00, 0x61, 0x62, 0x63]);
        assert_eq!(s.read_ascii().unwrap(), "abc");
        assert!(s.at_end());
    }

    #[test]
    fn non_ascii_write_writes_nothing() {
        let mut s = Stream::new();
        let err = s.write_ascii("naïve").unwrap_err();
        assert!(matches!(err, StreamError::InvalidEncoding { kind: "ascii", .. }));
        assert!(s.is_empty());
    }

    #[test]
    fn non_ascii_read_is_rejected() {
        let mut s = Stream::from_bytes([0x02, 0x00, 0x00, 0x00, b'o', 0xE9]);
        let err = s.read_ascii().unwrap_err();
        assert!(matches!(err, StreamError::InvalidEncoding { kind: "ascii", .. }));
        assert_eq!(s.read_offset(), 6);
    }

    #[test]
    fn truncated_ascii_rewinds() {
        let mut s = Stream::from_bytes([0x09, 0x00, 0x00, 0x00, b'a']);
        assert_eq!(s.read_ascii().unwrap_err().kind(), ErrorKind::BufferUnderrun);
        assert_eq!(s.read_offset(), 0);
    }

// # ✅ 4. Byte arrays

    #[test]
    fn byte_array_round_trip() {
        let payload = [0x00, 0xFF, 0x10, 0x80];
        let mut s = Stream::new();
        s.write_byte_array(&payload).unwrap();
        s.write_byte_array(&[]).unwrap();
        assert_eq!(s.as_slice(), &[0x04, 0x00, 0xFF, 0x10, 0x80, 0x00]);

        assert_eq!(&s.read_byte_array().unwrap()[..], &payload);
        assert!(s.read_byte_array().unwrap().is_empty());
        assert!(s.at_end());
    }

// # ✅ 5. Vectors

    #[test]
    fn vec3_float_layouts() {
        let v = Vec3::new(1.0, -2.5, 0.0);

        let mut be = Stream::new();
        be.write_vec3(v).unwrap();
        assert_eq!(
            be.as_slice(),
            &[0x3F, 0x80, 0x00, 0x00, 0xC0, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(be.read_vec3().unwrap(), v);

        let mut le = Stream::new();
        le.write_vec3_le(v).unwrap();
        assert_eq!(
            le.as_slice(),
            &[0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x20, 0xC0, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(le.read_vec3_le().unwrap(), v);
    }

    #[test]
    fn vec2_float_round_trip() {
        let v = Vec2::new(-0.5, 1024.25);
        let mut s = Stream::new();
        s.write_vec2(v).unwrap();
        s.write_vec2_le(v).unwrap();
        assert_eq!(s.len(), 16);
        assert_eq!(s.read_vec2().unwrap(), v);
        assert_eq!(s.read_vec2_le().unwrap(), v);
    }

    #[test]
    fn vec3_var_rounds_components() {
        let mut s = Stream::new();
        s.write_vec3_var(Vec3::new(1.4, -1.6, 300.0)).unwrap();
        assert_eq!(s.as_slice(), &[0x02, 0x03, 0xD8, 0x04]);
        assert_eq!(s.read_vec3_var().unwrap(), Vec3::new(1.0, -2.0, 300.0));
    }

    #[test]
    fn vec2_var_round_trip() {
        let mut s = Stream::new();
        s.write_vec2_var(Vec2::new(-7.0, 2.5)).unwrap();
        // 2.5 rounds away from zero.
        assert_eq!(s.read_vec2_var().unwrap(), Vec2::new(-7.0, 3.0));
    }

// # ❌ 6. Vector failures

    #[test]
    fn non_finite_components_write_nothing() {
        let mut s = Stream::new();
        let err = s.write_vec3(Vec3::new(0.0, f32::NAN, 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);
        assert!(s.write_vec2_le(Vec2::new(f32::INFINITY, 0.0)).is_err());
        assert!(s.write_vec3_var(Vec3::new(1.0, 2.0, f32::NAN)).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn var_components_must_fit_i32() {
        let mut s = Stream::new();
        let err = s.write_vec3_var(Vec3::new(1.0, 3.0e9, 0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);
        assert!(s.is_empty());
    }

    #[test]
    fn truncated_vectors_rewind() {
        let mut s = Stream::from_bytes([0u8; 8]);
        assert_eq!(s.read_vec3().unwrap_err().kind(), ErrorKind::BufferUnderrun);
        assert_eq!(s.read_offset(), 0);

        let mut v = Stream::from_bytes([0x02, 0x04]);
        assert_eq!(v.read_vec3_var().unwrap_err().kind(), ErrorKind::BufferUnderrun);
        assert_eq!(v.read_offset(), 0);

        // The buffer is intact: a vec2 still fits.
        assert_eq!(s.read_vec2().unwrap(), Vec2::ZERO);
    }

// # ✅ 7. UUID

    #[test]
    fn uuid_wire_order() {
        let mut s = Stream::new();
        s.write_uuid_str(SAMPLE_UUID).unwrap();
        assert_eq!(s.as_slice(), &SAMPLE_WIRE);

        let id = s.read_uuid().unwrap();
        assert_eq!(id, Uuid::parse_str(SAMPLE_UUID).unwrap());

        s.reset();
        assert_eq!(s.read_uuid_string().unwrap(), SAMPLE_UUID);
    }

    #[test]
    fn uuid_value_and_string_forms_agree() {
        let id = Uuid::parse_str(SAMPLE_UUID).unwrap();
        let mut a = Stream::new();
        a.write_uuid(&id).unwrap();

        let mut b = Stream::new();
        b.write_uuid_str("123E4567E89B12D3A456426614174000").unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn invalid_uuid_string_writes_nothing() {
        let mut s = Stream::new();
        let err = s.write_uuid_str("not-a-uuid").unwrap_err();
        assert!(matches!(err, StreamError::InvalidEncoding { kind: "uuid", .. }));
        assert!(s.is_empty());
    }

    #[test]
    fn short_uuid_underruns() {
        let mut s = Stream::from_bytes(&SAMPLE_WIRE[..15]);
        assert_eq!(s.read_uuid().unwrap_err().kind(), ErrorKind::BufferUnderrun);
        assert_eq!(s.read_offset(), 0);
    }

// # ✅ 8. Properties

    proptest! {
        #[test]
        fn prop_uuid_wire_transform_inverts(bytes in any::<[u8; 16]>()) {
            prop_assert_eq!(uuid_from_wire(&uuid_to_wire(&bytes)), bytes);
            prop_assert_eq!(uuid_to_wire(&uuid_from_wire(&bytes)), bytes);
        }

        #[test]
        fn prop_string_round_trip(text in ".{0,64}") {
            let mut s = Stream::new();
            s.write_string(&text).unwrap();
            prop_assert_eq!(s.read_string().unwrap(), text);
            prop_assert!(s.at_end());
        }

        #[test]
        fn prop_byte_array_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut s = Stream::new();
            s.write_byte_array(&payload).unwrap();
            prop_assert_eq!(&s.read_byte_array().unwrap()[..], &payload[..]);
        }
    }
}
