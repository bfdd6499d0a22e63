use triplereplay::codec::{RECORD_SIZE, NONE};
use triplereplay::{
    decode_turns_from_hex, encode_turns_to_hex, DecodeError, Edge, EncodeOptions, Move, Transcript,
};

fn nine_turns() -> Vec<Move> {
    (0u8..9).map(|i| Move::place(i, (i + 1) / 2)).collect()
}

#[test]
fn nine_turns_round_trip_with_one_mark() {
    let mut turns = nine_turns();
    turns[3].warning_mark_cell = Some(2);

    let hex = encode_turns_to_hex(&turns, EncodeOptions::BARE);
    assert_eq!(hex.len(), 9 * RECORD_SIZE * 2);
    let decoded = decode_turns_from_hex(&hex).expect("decode");
    assert_eq!(decoded, turns);

    assert_eq!(decoded[3].warning_mark_cell, Some(2));
    for (i, mv) in decoded.iter().enumerate() {
        if i != 3 {
            assert_eq!(mv.warning_mark_cell, None);
        }
        assert_eq!(mv.earth_boost_edge, None);
    }
}

#[test]
fn wire_layout_is_positional() {
    let turns = vec![
        Move::place(0, 0),
        Move::place(4, 2).with_warning_mark(8).with_earth_boost(Edge::West),
    ];
    let hex = encode_turns_to_hex(&turns, EncodeOptions::PREFIXED);
    assert_eq!(hex, format!("0x0000{NONE:02x}{NONE:02x}04020803"));
    assert_eq!(decode_turns_from_hex(&hex).expect("decode"), turns);
}

#[test]
fn every_prefix_length_round_trips() {
    let mut turns = nine_turns();
    turns[1].earth_boost_edge = Some(Edge::North);
    turns[6] = turns[6].with_earth_boost(Edge::South).with_warning_mark(7);
    for n in 0..=9 {
        for options in [EncodeOptions::BARE, EncodeOptions::PREFIXED] {
            let hex = encode_turns_to_hex(&turns[..n], options);
            assert_eq!(decode_turns_from_hex(&hex).expect("decode"), turns[..n].to_vec());
        }
    }
}

#[test]
fn empty_input_is_an_empty_transcript() {
    assert_eq!(encode_turns_to_hex(&[], EncodeOptions::BARE), "");
    assert_eq!(encode_turns_to_hex(&[], EncodeOptions::PREFIXED), "0x");
    assert!(decode_turns_from_hex("").expect("decode").is_empty());
    assert!(decode_turns_from_hex("0x").expect("decode").is_empty());
}

#[test]
fn malformed_hex_is_rejected() {
    assert_eq!(decode_turns_from_hex("000"), Err(DecodeError::MalformedHex));
    assert_eq!(decode_turns_from_hex("0000ffzz"), Err(DecodeError::MalformedHex));
    assert_eq!(decode_turns_from_hex(" 0000ffff"), Err(DecodeError::MalformedHex));
}

#[test]
fn partial_record_is_rejected() {
    assert_eq!(
        decode_turns_from_hex("0000ffff0102"),
        Err(DecodeError::TruncatedRecord { len: 6 })
    );
}

#[test]
fn out_of_range_fields_fail_the_whole_decode() {
    let cases = [
        ("0000ffff0900ffff", "cell", 9),
        ("0000ffff0005ffff", "card_index", 5),
        ("0000ffff000009ff", "warning_mark_cell", 9),
        ("0000ffff0000ff04", "earth_boost_edge", 4),
        ("0000ffff0000fffe", "earth_boost_edge", 254),
    ];
    for (hex, field, value) in cases {
        assert_eq!(
            decode_turns_from_hex(hex),
            Err(DecodeError::FieldOutOfRange { record: 1, field, value }),
            "input {hex}"
        );
    }
}

#[test]
fn more_than_nine_records_is_rejected() {
    let ten = "0000ffff".repeat(10);
    assert_eq!(decode_turns_from_hex(&ten), Err(DecodeError::TooManyRecords { count: 10 }));
}

#[test]
fn transcript_wrapper_round_trips_and_caps_length() {
    let t = Transcript::from_moves(nine_turns()).expect("nine moves");
    assert!(t.is_complete());
    let back = Transcript::from_hex(&t.to_hex(EncodeOptions::PREFIXED)).expect("decode");
    assert_eq!(back, t);

    let mut full = t.clone();
    assert!(full.push(Move::place(0, 0)).is_err());
    assert!(Transcript::from_moves(vec![Move::place(0, 0); 10]).is_err());
}
