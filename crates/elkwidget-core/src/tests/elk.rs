use crate::*;
use serde_json::json;

fn edge(value: serde_json::Value) -> ElkEdge {
    serde_json::from_value(value).unwrap()
}

#[test]
fn css_classes_trim_and_split_on_spaces() {
    let props: ElkProperties = serde_json::from_value(json!({ "cssClasses": "  a  b " })).unwrap();
    assert_eq!(props.css_classes(), vec!["a", "b"]);
}

#[test]
fn css_classes_absent_or_blank_is_empty() {
    assert!(ElkProperties::default().css_classes().is_empty());

    let blank: ElkProperties = serde_json::from_value(json!({ "cssClasses": "   " })).unwrap();
    assert!(blank.css_classes().is_empty());

    let empty: ElkProperties = serde_json::from_value(json!({ "cssClasses": "" })).unwrap();
    assert!(empty.css_classes().is_empty());
}

#[test]
fn properties_ignore_layout_options() {
    let props: ElkProperties = serde_json::from_value(json!({
        "org.eclipse.elk.direction": "DOWN",
        "org.eclipse.elk.spacing.nodeNode": 20,
        "use": "arrow1",
        "start": "dot",
    }))
    .unwrap();
    assert_eq!(props.use_ref(), Some("arrow1"));
    assert_eq!(props.start(), Some("dot"));
    assert_eq!(props.end(), None);
}

#[test]
fn shape_geometry_defaults_to_zero() {
    let node: ElkNode = serde_json::from_value(json!({ "id": "n1", "x": 4, "width": 10.5 })).unwrap();
    assert_eq!(node.shape.position(), Point::new(4.0, 0.0));
    assert_eq!(node.shape.size(), Dimension::new(10.5, 0.0));
}

#[test]
fn null_collections_are_treated_as_absent() {
    let node: ElkNode = serde_json::from_value(json!({
        "id": "n1",
        "children": null,
        "ports": null,
        "properties": null,
    }))
    .unwrap();
    assert!(node.children.is_empty());
    assert!(node.ports.is_empty());
    assert_eq!(node.properties, ElkProperties::default());
}

#[test]
fn edge_with_source_and_target_is_primitive() {
    let e = edge(json!({
        "id": "e1",
        "source": "a",
        "target": "b",
        "bendPoints": [{ "x": 1, "y": 1 }],
    }));
    let EdgeRouting::Primitive(route) = e.routing else {
        panic!("expected primitive edge, got {:?}", e.routing);
    };
    assert_eq!(route.source, "a");
    assert_eq!(route.target, "b");
    assert_eq!(route.bend_points, vec![Point::new(1.0, 1.0)]);
}

#[test]
fn edge_with_sources_and_targets_is_extended() {
    let e = edge(json!({
        "id": "e1",
        "sources": ["a", "c"],
        "targets": ["b"],
        "sections": [{ "id": "s1", "startPoint": { "x": 0, "y": 0 }, "endPoint": { "x": 3, "y": 0 } }],
    }));
    let EdgeRouting::Extended(route) = e.routing else {
        panic!("expected extended edge, got {:?}", e.routing);
    };
    assert_eq!(route.sources, vec!["a", "c"]);
    assert_eq!(route.sections.len(), 1);
}

#[test]
fn primitive_fields_take_precedence_over_extended_fields() {
    let e = edge(json!({
        "id": "e1",
        "source": "a",
        "target": "b",
        "sources": ["x"],
        "targets": ["y"],
    }));
    assert!(matches!(e.routing, EdgeRouting::Primitive(_)));
}

#[test]
fn edge_with_partial_endpoints_is_unrouted() {
    assert_eq!(edge(json!({ "id": "e1", "source": "a" })).routing, EdgeRouting::Unrouted);
    assert_eq!(edge(json!({ "id": "e2", "sources": ["a"] })).routing, EdgeRouting::Unrouted);
    assert_eq!(edge(json!({ "id": "e3" })).routing, EdgeRouting::Unrouted);
}

#[test]
fn section_routing_points_skip_missing_endpoints() {
    let section: ElkEdgeSection = serde_json::from_value(json!({
        "id": "s1",
        "bendPoints": [{ "x": 1, "y": 2 }],
        "endPoint": { "x": 3, "y": 4 },
    }))
    .unwrap();
    let points: Vec<Point> = section.routing_points().collect();
    assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
}
