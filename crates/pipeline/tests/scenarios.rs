use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pipeline::error::{ELLIPSIS, SNIPPET_LIMIT};
use pipeline::{
    BoundTransformer, ConvertError, Entry, FieldValue, Format, LineFormatter, LineParser, ParseError,
    Part, PartSet, PartType, Pipeline, TransformError,
};

fn text_parts(names: &[&str]) -> PartSet {
    names
        .iter()
        .fold(PartSet::builder(), |b, n| b.part(*n, Part::text()))
        .build()
        .unwrap()
}

fn hash_of(format: &Format) -> u64 {
    let mut hasher = DefaultHasher::new();
    format.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_dotted_line_end_to_end() {
    let pipeline = Pipeline::standard().unwrap();
    assert_eq!(
        pipeline
            .transform_line("10.03.2025 15:14:49.523 INFORMATION Program version: '3.4.0.48729'")
            .unwrap(),
        "10-03-2025\t15:14:49.523\tINFO\tDEFAULT\tProgram version: '3.4.0.48729'"
    );
}

#[test]
fn test_piped_line_end_to_end() {
    let pipeline = Pipeline::standard().unwrap();
    assert_eq!(
        pipeline
            .transform_line(
                "2025-03-10 15:14:51.5882| INFO|11|MobileComputer.GetDeviceId| Device id: '@MINDEO-M40-D-410244015546'"
            )
            .unwrap(),
        "10-03-2025\t15:14:51.5882\tINFO\tMobileComputer.GetDeviceId\tDevice id: '@MINDEO-M40-D-410244015546'"
    );
}

#[test]
fn test_format_mismatch_has_no_side_effect() {
    let a = Format::delimited(',', text_parts(&["msg"]));
    let b = Format::delimited('|', text_parts(&["msg"]));
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let bound = BoundTransformer::new(b, move |e| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(e.clone())
    });

    let entry = Entry::from_pairs(a, [("msg", FieldValue::text("hi"))]).unwrap();
    let err = bound.transform(&entry).unwrap_err();

    assert!(matches!(err, TransformError::FormatMismatch { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(entry.get_string("msg").unwrap(), "hi");
}

#[test]
fn test_formatter_fault_yields_no_partial_line() {
    let parts = PartSet::builder()
        .part("first", Part::text())
        .part(
            "broken",
            Part::new(
                PartType::Text,
                |raw| raw.map(FieldValue::text).ok_or(ConvertError::Missing),
                |_| Err(ConvertError::Other("always".into())),
            ),
        )
        .part("last", Part::text())
        .build()
        .unwrap();
    let entry = Entry::from_pairs(
        Format::delimited(' ', parts),
        [
            ("first", FieldValue::text("a")),
            ("broken", FieldValue::text("b")),
            ("last", FieldValue::text("c")),
        ],
    )
    .unwrap();

    assert!(LineFormatter.try_format(&entry).is_none());
    assert!(LineFormatter.format(&entry).is_err());
}

#[test]
fn test_identity_round_trip() {
    let formats = [
        Format::delimited(',', text_parts(&["a", "b", "c"])),
        Format::regex(' ', r"(?P<a>\S+) (?P<b>\S+) (?P<c>.*)", text_parts(&["a", "b", "c"])).unwrap(),
    ];
    let lines = [
        ["1,2,3", "x,,z", "a,b,c,d"],
        ["1 2 3", "x y z z", "a b "],
    ];

    for (format, lines) in formats.into_iter().zip(lines) {
        let parser = LineParser::new(vec![format]).unwrap();
        for line in lines {
            let entry = parser.parse(line).unwrap();
            assert_eq!(LineFormatter.format(&entry).unwrap(), line);
        }
    }
}

#[test]
fn test_first_registered_format_wins() {
    let first = Format::delimited(' ', text_parts(&["head", "tail"]));
    let second = Format::delimited(' ', text_parts(&["left", "right"]));
    let parser = LineParser::new(vec![first.clone(), second.clone()]).unwrap();

    for _ in 0..10 {
        let entry = parser.parse("one two three").unwrap();
        assert_eq!(entry.format(), &first);
        assert_eq!(entry.get_string("tail").unwrap(), "two three");
    }

    let reversed = LineParser::new(vec![second.clone(), first]).unwrap();
    assert_eq!(reversed.parse("one two").unwrap().format(), &second);
}

#[test]
fn test_structural_equality_and_hash() {
    let a = Format::delimited(',', text_parts(&["msg", "user"]));
    let b = Format::delimited(',', text_parts(&["msg", "user"]));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let variants = [
        Format::delimited(';', text_parts(&["msg", "user"])),
        Format::delimited(',', text_parts(&["user", "msg"])),
        Format::delimited(',', text_parts(&["msg", "name"])),
        Format::quoted(',', text_parts(&["msg", "user"])),
        Format::delimited(
            ',',
            PartSet::builder()
                .part("msg", Part::text())
                .part("user", Part::integer())
                .build()
                .unwrap(),
        ),
    ];
    for other in &variants {
        assert_ne!(&a, other);
        assert_ne!(hash_of(&a), hash_of(other));
    }
}

#[test]
fn test_quoted_tokenizer() {
    let parser = LineParser::new(vec![Format::quoted(',', text_parts(&["msg", "user", "note"]))]).unwrap();
    let entry = parser.parse(r#""Hello, world!",john,"A, B, C""#).unwrap();

    assert_eq!(entry.get_string("msg").unwrap(), "Hello, world!");
    assert_eq!(entry.get_string("user").unwrap(), "john");
    assert_eq!(entry.get_string("note").unwrap(), "A, B, C");
}

#[test]
fn test_unmatched_line_is_truncated() {
    let parser = LineParser::new(vec![Format::delimited('|', text_parts(&["a", "b"]))]).unwrap();
    let line: String = "abcdefghij".repeat(15);
    assert_eq!(line.chars().count(), 150);

    let err = parser.parse(&line).unwrap_err();
    let ParseError::NoFormatMatched(shown) = &err else {
        panic!("expected NoFormatMatched, got {:?}", err);
    };
    assert!(shown.ends_with(ELLIPSIS));
    assert!(shown.chars().count() <= SNIPPET_LIMIT + ELLIPSIS.len());
    assert!(!err.to_string().contains(&line));
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = Pipeline::standard().unwrap();
    let lines = [
        (
            "10.03.2025 15:14:49.523 INFORMATION Program version: '3.4.0.48729'",
            "10-03-2025\t15:14:49.523\tINFO\tDEFAULT\tProgram version: '3.4.0.48729'",
        ),
        (
            "2025-03-10 15:14:51.5882|ERROR|7|Scanner.Open|port busy",
            "10-03-2025\t15:14:51.5882\tERROR\tScanner.Open\tport busy",
        ),
    ];

    std::thread::scope(|s| {
        for t in 0..4 {
            let pipeline = &pipeline;
            let lines = &lines;
            s.spawn(move || {
                for i in 0..200 {
                    let (input, expected) = lines[(i + t) % lines.len()];
                    assert_eq!(pipeline.transform_line(input).unwrap(), expected);
                    assert!(pipeline.try_transform_line("not a log line").is_none());
                }
            });
        }
    });
}
