use mdtransform::core::payload::{Options, Parameters, Payload, SOURCE_OPTION, VERBOSE_OPTION};
use mdtransform::core::transform_graph::{async_edge_fn, edge_fn};
use mdtransform::core::{TransformEngine, TransformError};
use mdtransform::FileFormat;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn number(payload: &Payload) -> i64 {
    payload.as_json().and_then(Value::as_i64).expect("numeric payload")
}

fn numeric_engine() -> TransformEngine {
    let mut engine = TransformEngine::default();
    for name in ["A", "B", "C"] {
        engine.register_format(name, "", FileFormat::Json).unwrap();
    }
    engine
        .register_transformation(
            "A",
            "B",
            edge_fn(|input, _p, _o| Ok(Payload::from(json!(number(&input) + 1)))),
        )
        .unwrap();
    engine
        .register_transformation(
            "B",
            "C",
            edge_fn(|input, _p, _o| Ok(Payload::from(json!(number(&input) * 2)))),
        )
        .unwrap();
    engine
}

#[tokio::test]
async fn test_hops_apply_in_path_order() {
    let engine = numeric_engine();
    let result = engine
        .transform_to_destination(
            Payload::from(json!(3)),
            "A",
            "C",
            Some(Parameters::new()),
            Some(Options::new()),
        )
        .await
        .unwrap();
    assert_eq!(number(&result), 8);
}

#[tokio::test]
async fn test_transform_chains_stages() {
    let engine = numeric_engine();
    let chained = engine
        .transform(Payload::from(json!(5)), "A", &["B", "C"], None, None)
        .await
        .unwrap();

    let first = engine
        .transform_to_destination(Payload::from(json!(5)), "A", "B", None, None)
        .await
        .unwrap();
    let nested = engine
        .transform_to_destination(first, "B", "C", None, None)
        .await
        .unwrap();
    assert_eq!(chained, nested);
    assert_eq!(number(&chained), 12);
}

#[tokio::test]
async fn test_forced_stages_can_take_a_longer_route() {
    let mut engine = numeric_engine();
    engine
        .register_transformation(
            "A",
            "C",
            edge_fn(|input, _p, _o| Ok(Payload::from(json!(number(&input) * 100)))),
        )
        .unwrap();

    let direct = engine
        .transform(Payload::from(json!(1)), "A", &["C"], None, None)
        .await
        .unwrap();
    assert_eq!(number(&direct), 100);

    let staged = engine
        .transform(Payload::from(json!(1)), "A", &["B", "C"], None, None)
        .await
        .unwrap();
    assert_eq!(number(&staged), 4);
}

#[tokio::test]
async fn test_empty_destination_list_returns_input() {
    let engine = numeric_engine();
    let destinations: [&str; 0] = [];
    let result = engine
        .transform(Payload::from(json!(7)), "A", &destinations, None, None)
        .await
        .unwrap();
    assert_eq!(number(&result), 7);
}

#[tokio::test]
async fn test_parameters_and_options_reach_every_hop() {
    let seen: Arc<Mutex<Vec<(Value, Value)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut engine = TransformEngine::default();
    for name in ["x", "y", "z"] {
        engine.register_format(name, "", FileFormat::Utf8).unwrap();
    }
    for (from, to) in [("x", "y"), ("y", "z")] {
        let seen = seen.clone();
        engine
            .register_transformation(
                from,
                to,
                edge_fn(move |input, params, opts| {
                    seen.lock().unwrap().push((
                        params.get("model").cloned().unwrap_or(Value::Null),
                        opts.get("flag").cloned().unwrap_or(Value::Null),
                    ));
                    Ok(input)
                }),
            )
            .unwrap();
    }

    let mut parameters = Parameters::new();
    parameters.insert("model".to_string(), json!("contract.cto"));
    let mut options = Options::new();
    options.insert("flag".to_string(), json!(true));

    engine
        .transform(
            Payload::from("doc"),
            "x",
            &["z"],
            Some(parameters),
            Some(options),
        )
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for (model, flag) in seen.iter() {
        assert_eq!(model, &json!("contract.cto"));
        assert_eq!(flag, &json!(true));
    }
}

#[tokio::test]
async fn test_markdown_source_is_copied_into_options() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let mut engine = TransformEngine::default();
    engine.register_format("markdown", "", FileFormat::Utf8).unwrap();
    engine.register_format("tree", "", FileFormat::Json).unwrap();
    engine.register_format("text", "", FileFormat::Utf8).unwrap();
    engine
        .register_transformation(
            "markdown",
            "tree",
            edge_fn(|input, _p, _o| Ok(Payload::from(json!({ "text": input.as_text() })))),
        )
        .unwrap();
    let sink = captured.clone();
    engine
        .register_transformation(
            "tree",
            "text",
            edge_fn(move |_input, _p, opts| {
                *sink.lock().unwrap() = opts.get(SOURCE_OPTION).cloned();
                Ok(Payload::from("done"))
            }),
        )
        .unwrap();

    engine
        .transform(Payload::from("# Hello"), "markdown", &["text"], None, None)
        .await
        .unwrap();
    assert_eq!(*captured.lock().unwrap(), Some(json!("# Hello")));

    *captured.lock().unwrap() = None;
    engine
        .transform_to_destination(Payload::from("# Hello"), "markdown", "text", None, None)
        .await
        .unwrap();
    assert_eq!(*captured.lock().unwrap(), None);
}

#[tokio::test]
async fn test_edge_failures_propagate_verbatim() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut engine = TransformEngine::default();
    for name in ["a", "b", "c"] {
        engine.register_format(name, "", FileFormat::Utf8).unwrap();
    }
    let counter = calls.clone();
    engine
        .register_transformation(
            "a",
            "b",
            edge_fn(move |input, _p, _o| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(input)
            }),
        )
        .unwrap();
    engine
        .register_transformation(
            "b",
            "c",
            async_edge_fn(|_input, _p, _o| async {
                Err::<Payload, _>(anyhow::anyhow!("template merge failed"))
            }),
        )
        .unwrap();

    let err = engine
        .transform(Payload::from("x"), "a", &["c"], None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Edge(_)));
    assert_eq!(err.to_string(), "template merge failed");
    assert_eq!(err.code(), "TRF-EDGE-001");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_routing_errors_happen_before_any_edge_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut engine = TransformEngine::default();
    for name in ["a", "b", "island"] {
        engine.register_format(name, "", FileFormat::Utf8).unwrap();
    }
    let counter = calls.clone();
    engine
        .register_transformation(
            "a",
            "b",
            edge_fn(move |input, _p, _o| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(input)
            }),
        )
        .unwrap();

    let err = engine
        .transform_to_destination(Payload::from("x"), "a", "island", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::NoPath { .. }));

    let err = engine
        .transform_to_destination(Payload::from("x"), "a", "nowhere", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::UnknownFormat { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_verbose_does_not_change_results() {
    let engine = TransformEngine::with_builtins();
    let markdown = "# Title\n\nSome *emphasis* here.\n\nSecond paragraph.";

    let quiet = engine
        .transform(Payload::from(markdown), "markdown", &["paragraphs", "bytes"], None, None)
        .await
        .unwrap();

    let mut options = Options::new();
    options.insert(VERBOSE_OPTION.to_string(), json!(true));
    let loud = engine
        .transform(
            Payload::from(markdown),
            "markdown",
            &["paragraphs", "bytes"],
            None,
            Some(options),
        )
        .await
        .unwrap();

    assert_eq!(quiet, loud);
    assert_eq!(
        loud.as_bytes(),
        Some("Title\n\nSome emphasis here.\n\nSecond paragraph.".as_bytes())
    );
}
