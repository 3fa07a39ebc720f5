use std::collections::{BTreeMap, HashMap};

use pretty_assertions::assert_eq;
use serde::Serialize;
use url_query_encoder::{EncodeOptions, QueryEncoder, QueryItem};

#[derive(Clone, Debug, Serialize)]
struct User {
    role: String,
    name: String,
}

fn user(role: &str, name: &str) -> User {
    User {
        role: role.to_owned(),
        name: name.to_owned(),
    }
}

#[test]
fn scalar_conversions() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("flag", true)]));
    encoder.encode(&HashMap::from([("neg", -12i64)]));
    encoder.encode(&HashMap::from([("big", u64::MAX)]));
    encoder.encode(&HashMap::from([("ratio", 1.5f64)]));
    encoder.encode(&HashMap::from([("whole", 3.0f32)]));
    encoder.encode(&HashMap::from([("letter", 'q')]));

    assert_eq!(
        encoder.query(),
        "flag=true&neg=-12&big=18446744073709551615&ratio=1.5&whole=3.0&letter=q"
    );
}

#[test]
fn string_values_are_not_escaped_in_raw_query() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("q", "hello world")]));

    assert_eq!(encoder.query(), "q=hello world");
    assert_eq!(encoder.percent_encoded_query(), "q=hello%20world");
}

#[test]
fn url_values_use_absolute_string() {
    let site = url::Url::parse("https://example.com/home").unwrap();

    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("site", site)]));

    assert_eq!(encoder.query(), "site=https://example.com/home");
    // `:`, `/` are query-legal and survive percent encoding
    assert_eq!(encoder.percent_encoded_query(), "site=https://example.com/home");
}

#[test]
fn optional_some_encodes_as_plain_value() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("id", Some(5))]));

    assert_eq!(encoder.query(), "id=5");
}

#[test]
fn none_fields_of_a_struct_are_skipped() {
    #[derive(Serialize)]
    struct Query {
        a: Option<u8>,
        b: Option<u8>,
    }

    let mut encoder = QueryEncoder::new();
    encoder.encode(&Query { a: None, b: Some(2) });

    assert_eq!(encoder.query(), "b=2");
}

#[test]
fn empty_sequence_contributes_nothing() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("ids", Vec::<i32>::new())]));

    assert!(encoder.items().is_empty());
}

#[test]
fn root_scalar_contributes_nothing() {
    // A bare scalar has no top-level key to attach to.
    let mut encoder = QueryEncoder::new();
    encoder.encode(&5);

    assert!(encoder.items().is_empty());
}

#[test]
fn array_of_objects_exploded() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([(
        "id",
        vec![user("admin", "kean"), user("ops", "bob")],
    )]));

    assert_eq!(encoder.query(), "role=admin&name=kean&role=ops&name=bob");
}

// Scalars more than two segments deep collapse onto the top-level key.

#[derive(Serialize)]
struct Outer {
    user: User,
}

#[test]
fn depth_three_collapses_to_top_key_exploded() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("filter", Outer {
        user: user("admin", "kean"),
    })]));

    assert_eq!(encoder.query(), "filter=admin&filter=kean");
}

#[test]
fn depth_three_collapses_to_top_key_unexploded() {
    let mut encoder = QueryEncoder::new();
    encoder.encode_with(
        &HashMap::from([("filter", Outer {
            user: user("admin", "kean"),
        })]),
        EncodeOptions::new().explode(false),
    );

    assert_eq!(encoder.query(), "filter=admin,kean");
}

#[test]
fn nested_maps_behave_like_nested_structs() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&BTreeMap::from([(
        "id",
        BTreeMap::from([("name", "kean"), ("role", "admin")]),
    )]));

    assert_eq!(encoder.query(), "name=kean&role=admin");
}

#[test]
fn unexploded_merge_is_adjacent_only() {
    // Interleaving another key breaks the run; a later `id` starts a
    // fresh item instead of merging into the first.
    let mut encoder = QueryEncoder::new();
    encoder.encode_with(
        &HashMap::from([("id", vec![1, 2])]),
        EncodeOptions::new().explode(false),
    );
    encoder.encode(&HashMap::from([("x", 9)]));
    encoder.encode_with(
        &HashMap::from([("id", vec![3])]),
        EncodeOptions::new().explode(false),
    );

    assert_eq!(encoder.query(), "id=1,2&x=9&id=3");
}

#[test]
fn unexploded_struct_fields_keep_their_own_keys() {
    #[derive(Serialize)]
    struct Query {
        a: Vec<u8>,
        b: Vec<u8>,
    }

    let mut encoder = QueryEncoder::new();
    encoder.encode_with(
        &Query {
            a: vec![1, 2],
            b: vec![3, 4],
        },
        EncodeOptions::new().explode(false),
    );

    assert_eq!(encoder.query(), "a=1,2&b=3,4");
}

#[test]
fn enum_values() {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Sort {
        Asc,
    }

    #[derive(Serialize)]
    struct Query {
        sort: Sort,
    }

    let mut encoder = QueryEncoder::new();
    encoder.encode(&Query { sort: Sort::Asc });

    assert_eq!(encoder.query(), "sort=asc");
}

#[test]
fn accessors_are_idempotent() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("id", vec![3, 4, 5])]));

    let first = encoder.query();
    assert_eq!(encoder.query(), first);

    let encoded = encoder.percent_encoded_query();
    assert_eq!(encoder.percent_encoded_query(), encoded);
}

#[test]
fn items_exposes_accumulated_entries() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("id", vec![3, 4])]));

    assert_eq!(
        encoder.items(),
        &[QueryItem::new("id", "3"), QueryItem::new("id", "4")]
    );
}

#[test]
fn percent_encoded_data_from_items() {
    let mut encoder = QueryEncoder::new().explode(false).delimiter(" ");
    encoder.encode(&HashMap::from([("id", vec![3, 4, 5])]));

    let data = QueryEncoder::percent_encoded_data(encoder.items());
    assert_eq!(data, b"id=3%204%205");
}

#[test]
fn percent_encoded_data_renders_bare_names() {
    let items = vec![
        QueryItem {
            name: "flag".to_owned(),
            value: None,
        },
        QueryItem::new("id", "5"),
    ];

    let data = QueryEncoder::percent_encoded_data(&items);
    assert_eq!(data, b"flag&id=5");
}

#[test]
fn failing_serialize_leaves_partial_output_in_place() {
    // Emits one field, then fails. The items appended before the
    // failure must survive, and the infallible entry point must not
    // report anything.
    struct Flaky;

    impl Serialize for Flaky {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::{Error, SerializeStruct};

            let mut s = serializer.serialize_struct("Flaky", 2)?;
            s.serialize_field("ok", &1)?;
            Err(S::Error::custom("boom"))
        }
    }

    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("id", 5)]));
    encoder.encode(&Flaky);

    assert_eq!(encoder.query(), "id=5&ok=1");

    let err = encoder.try_encode(&Flaky).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(encoder.query(), "id=5&ok=1&ok=1");
}

#[test]
fn to_string_one_shot() {
    #[derive(Serialize)]
    struct Query {
        name: String,
        age: u8,
    }

    let query = Query {
        name: "Alice".to_owned(),
        age: 24,
    };

    assert_eq!(url_query_encoder::to_string(&query).unwrap(), "name=Alice&age=24");
}
