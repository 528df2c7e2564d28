use insta::assert_snapshot;
use mdtransform::core::transform_graph::{edge_fn, DiagramStyle, Extension};
use mdtransform::core::TransformEngine;
use mdtransform::FileFormat;

#[test]
fn test_mermaid_lists_nodes_then_edges() {
    let engine = TransformEngine::with_builtins();
    let output = engine.generate_diagram(DiagramStyle::Mermaid);
    assert_snapshot!(output.trim_end(), @r###"
    graph LR
        markdown["markdown (utf8): Markdown text"]
        plaintext["plaintext (utf8): Plain text without markup"]
        paragraphs["paragraphs (json): JSON array of paragraph strings"]
        bytes["bytes (binary): UTF-8 encoded text"]
        markdown --> plaintext
        plaintext --> paragraphs
        plaintext --> bytes
        paragraphs --> plaintext
        paragraphs --> markdown
        bytes --> plaintext
    "###);
}

#[test]
fn test_dot_output_contains_every_format() {
    let engine = TransformEngine::with_builtins();
    let dot = engine.generate_transformation_diagram();
    assert!(dot.starts_with("digraph {"));
    for name in engine.all_formats() {
        assert!(dot.contains(&name), "missing {} in {}", name, dot);
    }
    assert!(dot.contains("(binary)"));
    for descriptor in engine.graph().descriptors() {
        assert!(dot.contains(&descriptor.docs), "missing docs {}", descriptor.docs);
    }
    assert_eq!(dot.matches("->").count(), 6);
    assert_eq!(dot, engine.generate_diagram(DiagramStyle::Dot));
}

#[test]
fn test_diagram_tracks_extensions_without_side_effects() {
    let mut engine = TransformEngine::with_builtins();
    let before = engine.all_formats();
    let _ = engine.generate_transformation_diagram();
    assert_eq!(engine.all_formats(), before);

    engine
        .register_extension(
            Extension::new()
                .with_format("pdf-doc", "PDF document", FileFormat::Binary)
                .with_transform("bytes", "pdf-doc", edge_fn(|input, _p, _o| Ok(input))),
        )
        .unwrap();
    let mermaid = engine.generate_diagram(DiagramStyle::Mermaid);
    assert!(mermaid.contains("    pdf_doc[\"pdf-doc (binary): PDF document\"]\n"));
    assert!(mermaid.contains("    bytes --> pdf_doc\n"));
}
