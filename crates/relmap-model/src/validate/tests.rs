use crate::{
    node::{NavigationDirection, SkipNavigationDef, SkipNavigationId},
    test_support::order_graph,
    types::ConfigurationSource::{Convention, Explicit},
    validate::validate_model,
};

fn order_products_def(
    graph: &crate::test_support::OrderGraph,
) -> SkipNavigationDef {
    SkipNavigationDef {
        name: "products".to_string(),
        target: graph.product,
        foreign_key: graph.fk_to_order,
        is_collection: true,
        is_on_principal: true,
        field_info: None,
        source: Convention,
    }
}

#[test]
fn a_fully_wired_graph_validates() {
    let mut graph = order_graph();

    let products = graph
        .model
        .add_skip_navigation(graph.order, order_products_def(&graph))
        .expect("Order.products");
    let orders = graph
        .model
        .add_skip_navigation(
            graph.product,
            SkipNavigationDef {
                name: "orders".to_string(),
                target: graph.order,
                foreign_key: graph.fk_to_product,
                is_collection: true,
                is_on_principal: true,
                field_info: None,
                source: Convention,
            },
        )
        .expect("Product.orders");
    graph
        .model
        .set_inverse(products, Some(orders), Explicit)
        .expect("products -> orders");
    graph
        .model
        .set_inverse(orders, Some(products), Explicit)
        .expect("orders -> products");
    graph
        .model
        .add_navigation(
            graph.fk_to_order,
            NavigationDirection::ToPrincipal,
            "order",
            false,
            None,
            Convention,
        )
        .expect("OrderProduct.order");

    validate_model(&graph.model).expect("wired fixture graph must validate");
}

#[test]
fn renaming_into_a_collision_is_reported() {
    let mut graph = order_graph();

    graph
        .model
        .entity_type_mut(graph.product)
        .expect("resolve")
        .set_name("Order");

    let errs = validate_model(&graph.model).expect_err("two entity types named 'Order'");
    assert!(
        errs.errors()
            .iter()
            .any(|e| e.contains("duplicate entity type name 'Order'")),
        "unexpected findings: {errs}"
    );
}

#[test]
fn renaming_to_an_empty_name_is_reported() {
    let mut graph = order_graph();

    graph
        .model
        .entity_type_mut(graph.order)
        .expect("resolve")
        .set_name("");

    let errs = validate_model(&graph.model).expect_err("empty entity type name");
    assert!(
        errs.errors().iter().any(|e| e.contains("empty name")),
        "unexpected findings: {errs}"
    );
}

#[test]
fn an_inverse_wired_behind_the_engines_back_is_reported() {
    let mut graph = order_graph();

    let products = graph
        .model
        .add_skip_navigation(graph.order, order_products_def(&graph))
        .expect("Order.products");
    let op_product = graph
        .model
        .add_skip_navigation(
            graph.order_product,
            SkipNavigationDef {
                name: "product".to_string(),
                target: graph.product,
                foreign_key: graph.fk_to_product,
                is_collection: false,
                is_on_principal: false,
                field_info: None,
                source: Convention,
            },
        )
        .expect("OrderProduct.product");

    // bypass set_inverse and wire an asymmetric pair directly
    graph
        .model
        .entity_type_mut(graph.order)
        .expect("resolve")
        .skip_navigation_mut(products)
        .expect("resolve")
        .set_inverse_link(op_product, Explicit);

    let errs = validate_model(&graph.model).expect_err("asymmetric inverse must be reported");
    assert!(
        errs.errors()
            .iter()
            .any(|e| e.contains("cannot be the inverse of")),
        "unexpected findings: {errs}"
    );
}

#[test]
fn a_stale_inverse_id_is_reported() {
    let mut graph = order_graph();

    let products = graph
        .model
        .add_skip_navigation(graph.order, order_products_def(&graph))
        .expect("Order.products");

    // an index that was never issued on Product
    let stale = SkipNavigationId::new(graph.product, 7);
    graph
        .model
        .entity_type_mut(graph.order)
        .expect("resolve")
        .skip_navigation_mut(products)
        .expect("resolve")
        .set_inverse_link(stale, Explicit);

    let errs = validate_model(&graph.model).expect_err("stale inverse must be reported");
    assert!(
        errs.errors().iter().any(|e| e.contains("stale inverse")),
        "unexpected findings: {errs}"
    );
}
