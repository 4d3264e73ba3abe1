use tomlet::{
    parse, parse_with_options, to_string, Datetime, Document, Error, ParseOptions, StringKind,
    Table, TableStyle, Value,
};

const EXAMPLE: &str = r#"
# This is a TOML document

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
data = [ ["delta", "phi"], [3.14] ]
temp_targets = { cpu = 79.5, case = 72.0 }

[servers]

[servers.alpha]
ip = "10.0.0.1"
role = "frontend"

[servers.beta]
ip = "10.0.0.2"
role = "backend"
"#;

fn root(input: &str) -> Table {
    parse(input).unwrap().into_root()
}

fn reparse(doc: &Document) -> Document {
    let text = doc.to_string();
    parse(&text).unwrap_or_else(|e| panic!("written text did not parse: {}\n{}", e, text))
}

#[test]
fn test_example_document() {
    let doc = parse(EXAMPLE).unwrap();
    let root = doc.root();

    assert_eq!(root.get("title").and_then(Value::as_str), Some("TOML Example"));

    let dob = root.get("owner").and_then(|o| o.get("dob")).and_then(Value::as_datetime);
    assert!(dob.map_or(false, Datetime::is_offset));

    let database = root.get("database").unwrap();
    assert_eq!(database.get("enabled"), Some(&Value::Boolean(true)));
    assert_eq!(database.get("ports").and_then(Value::as_array).map(Vec::len), Some(3));
    assert_eq!(
        database
            .get("temp_targets")
            .and_then(|t| t.get("case"))
            .and_then(Value::as_float),
        Some(72.0)
    );

    let servers = root.get("servers").and_then(Value::as_table).unwrap();
    let names: Vec<_> = servers.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(
        servers.get("beta").and_then(|b| b.get("role")).and_then(Value::as_str),
        Some("backend")
    );
}

#[test]
fn test_example_round_trip() {
    let doc = parse(EXAMPLE).unwrap();
    let again = reparse(&doc);
    assert_eq!(doc, again);
    // Writing is stable once the layout is normalized.
    assert_eq!(again.to_string(), reparse(&again).to_string());
}

#[test]
fn test_string_forms_have_equal_text() {
    let root = root(concat!(
        "basic = \"hello\"\n",
        "literal = 'hello'\n",
        "multi_basic = \"\"\"hello\"\"\"\n",
        "multi_literal = '''hello'''\n",
    ));
    let expected = [
        ("basic", StringKind::Basic),
        ("literal", StringKind::Literal),
        ("multi_basic", StringKind::MultilineBasic),
        ("multi_literal", StringKind::MultilineLiteral),
    ];
    for (key, kind) in expected {
        let value = root.get(key).unwrap();
        assert_eq!(value.as_str(), Some("hello"));
        assert_eq!(value.string_kind(), Some(kind));
        assert_eq!(value, &Value::from("hello"));
    }
}

#[test]
fn test_string_forms_are_written_back() {
    let text = "a = \"x\\ty\"\nb = 'C:\\path'\nc = \"\"\"\nline one\nline two\"\"\"\nd = '''raw \\n'''\n";
    let doc = parse(text).unwrap();
    assert_eq!(doc.to_string(), text);
}

#[test]
fn test_escapes() {
    let root = root(r#"s = "tab\there \"quoted\" \\ \u00E9 \U0001F600""#);
    assert_eq!(
        root.get("s").and_then(Value::as_str),
        Some("tab\there \"quoted\" \\ é 😀")
    );
}

#[test]
fn test_dotted_keys_and_inline_tables() {
    let doc = parse("name.first = 'Tom'\nname.last = 'Preston'\npoint = { x = 1, y = 2 }").unwrap();
    let name = doc.root().get("name").and_then(Value::as_table).unwrap();
    assert_eq!(name.style(), TableStyle::Dotted);
    assert_eq!(name.len(), 2);

    let point = doc.root().get("point").and_then(Value::as_table).unwrap();
    assert_eq!(point.style(), TableStyle::Inline);

    assert_eq!(
        doc.to_string(),
        "name.first = 'Tom'\nname.last = 'Preston'\npoint = { x = 1, y = 2 }\n"
    );
}

#[test]
fn test_arrays_of_tables() {
    let doc = parse(
        "[[products]]\nname = 'Hammer'\nsku = 738594937\n\n[[products]]\n\n[[products]]\nname = 'Nail'\ncolor = 'gray'",
    )
    .unwrap();
    let products = doc.root().get("products").and_then(Value::as_array).unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[1].as_table().map(Table::len), Some(0));
    assert_eq!(products[2].get("color").and_then(Value::as_str), Some("gray"));
    assert_eq!(doc, reparse(&doc));
}

#[test]
fn test_nested_arrays_of_tables() {
    let doc = parse(concat!(
        "[[fruits]]\nname = 'apple'\n",
        "[fruits.physical]\ncolor = 'red'\n",
        "[[fruits.varieties]]\nname = 'red delicious'\n",
        "[[fruits.varieties]]\nname = 'granny smith'\n",
        "[[fruits]]\nname = 'banana'\n",
        "[[fruits.varieties]]\nname = 'plantain'\n",
    ))
    .unwrap();
    let fruits = doc.root().get("fruits").and_then(Value::as_array).unwrap();
    assert_eq!(fruits.len(), 2);
    assert_eq!(
        fruits[0].get("varieties").and_then(Value::as_array).map(Vec::len),
        Some(2)
    );
    assert_eq!(
        fruits[1]
            .get("varieties")
            .and_then(|v| v.get_index(0))
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str),
        Some("plantain")
    );
    assert_eq!(doc, reparse(&doc));
}

#[test]
fn test_nan_round_trip() {
    let doc = parse("a = nan\nb = [-nan, inf]").unwrap();
    assert_eq!(doc.to_string(), "a = nan\nb = [nan, inf]\n");
    assert_eq!(doc, reparse(&doc));
}

#[test]
fn test_signed_bare_keys() {
    let root = root("-a.b = 1\na.-b.c = 2");
    assert_eq!(root.get("-a").and_then(|t| t.get("b")), Some(&Value::Integer(1)));
    assert_eq!(
        root.get("a")
            .and_then(|t| t.get("-b"))
            .and_then(|t| t.get("c")),
        Some(&Value::Integer(2))
    );
}

#[test]
fn test_multiline_arrays_with_comments() {
    let root = root("a = [\n  1, # one\n  2,\n\n  3,\n]\n");
    assert_eq!(
        root.get("a"),
        Some(&Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)]))
    );
}

#[test]
fn test_line_endings() {
    let unix = root("a = 1\nb = 'x'\n");
    let windows = root("a = 1\r\nb = 'x'\r\n");
    let classic = root("a = 1\rb = 'x'\r");
    assert_eq!(unix, windows);
    assert_eq!(unix, classic);
}

#[test]
fn test_datetime_forms() {
    let root = root(concat!(
        "odt = 1979-05-27T00:32:00.999999-07:00\n",
        "space = 1979-05-27 07:32:00Z\n",
        "ldt = 1979-05-27T07:32:00\n",
        "ld = 1979-05-27\n",
        "lt = 00:32:00.999999\n",
    ));
    assert!(matches!(root.get("odt"), Some(Value::Datetime(Datetime::Offset(_)))));
    assert!(matches!(root.get("space"), Some(Value::Datetime(Datetime::Offset(_)))));
    assert!(matches!(root.get("ldt"), Some(Value::Datetime(Datetime::Local(_)))));
    assert!(matches!(root.get("ld"), Some(Value::Datetime(Datetime::Date(_)))));
    assert!(matches!(root.get("lt"), Some(Value::Datetime(Datetime::Time(_)))));
    assert_eq!(
        root.get("space").map(ToString::to_string).as_deref(),
        Some("1979-05-27T07:32:00Z")
    );
}

#[test]
fn test_node_traversal() {
    let doc = parse(EXAMPLE).unwrap();
    let alpha = doc.node().get("servers").unwrap().get("alpha").unwrap();
    assert_eq!(alpha.path(), "servers.alpha");
    assert_eq!(alpha.get("ip").unwrap().get_as::<String>().unwrap(), "10.0.0.1");

    let err = alpha.get("port").unwrap_err();
    assert_eq!(err, Error::KeyNotFound("servers.alpha.port".into()));

    let ports = doc.node().get("database").unwrap().get("ports").unwrap();
    let last: i64 = ports.at(2).unwrap().get_as().unwrap();
    assert_eq!(last, 8002);
    assert!(matches!(ports.at(3), Err(Error::IndexOutOfBounds { len: 3, .. })));

    let err = ports.at(0).unwrap().get_as::<bool>().unwrap_err();
    assert_eq!(err, Error::type_mismatch("database.ports[0]", "bool", "int"));
}

#[test]
fn test_value_accessors() {
    let root = root("i = 7\nf = 2.5\nb = false\ns = 'x'");
    assert_eq!(root.get("i").unwrap().get_as::<i64>().unwrap(), 7);
    assert_eq!(
        root.get("i").unwrap().get_as::<f64>().unwrap_err(),
        Error::type_mismatch("", "float", "int")
    );
    assert_eq!(root.get("f").unwrap().get_as::<f64>().unwrap(), 2.5);
    assert!(!root.get("b").unwrap().get_as::<bool>().unwrap());
    assert_eq!(root.get("s").unwrap().get_as::<&str>().unwrap(), "x");
    assert!(matches!(
        root.get("s").unwrap().get_as::<i64>(),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_relaxed_options() {
    let text = "mixed = [1, 'a', 2.5, { x = 1 }]";
    assert!(parse(text).is_err());
    let doc = parse_with_options(text, ParseOptions::relaxed()).unwrap();
    assert_eq!(doc.options(), ParseOptions::relaxed());
    let again = parse_with_options(&doc.to_string(), ParseOptions::relaxed()).unwrap();
    assert_eq!(doc, again);
}

#[test]
fn test_serde_json_export() {
    let doc = parse("name = 'tomlet'\n[deps]\nserde = '1.0'\nversions = [1, 2]").unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "tomlet",
            "deps": { "serde": "1.0", "versions": [1, 2] }
        })
    );

    let value: Value = serde_json::from_value(json).unwrap();
    assert_eq!(value.as_table(), Some(doc.root()));
}

#[test]
fn test_to_string_of_built_table() {
    let mut server = Table::new();
    server.insert("host", Value::string_with_kind("localhost", StringKind::Literal));
    server.insert("port", Value::from(8080));
    let mut root = Table::new();
    root.insert("server", Value::Table(server));

    let text = to_string(&root);
    assert_eq!(text, "[server]\nhost = 'localhost'\nport = 8080\n");
    assert_eq!(parse(&text).unwrap().into_root(), root);
}

#[test]
fn test_repeated_parses_are_identical() {
    let first = parse(EXAMPLE).unwrap();
    for _ in 0..10 {
        let doc = parse(EXAMPLE).unwrap();
        assert_eq!(doc, first);
        assert_eq!(doc.to_string(), first.to_string());
    }
    let err = parse("X = [1, 'X']").unwrap_err();
    for _ in 0..10 {
        assert_eq!(parse("X = [1, 'X']").unwrap_err(), err);
    }
}

#[test]
fn test_concurrent_parses() {
    let expected = parse(EXAMPLE).unwrap();
    let results: Vec<Document> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| parse(EXAMPLE).unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for doc in results {
        assert_eq!(doc, expected);
    }
}
