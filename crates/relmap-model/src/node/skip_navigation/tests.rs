use crate::{
    node::{NodeError, SkipNavigationDef, SkipNavigationId},
    test_support::{OrderGraph, order_graph},
    types::{
        ConfigurationSource::{Convention, DataAnnotation, Explicit},
        Primitive,
    },
};

// ---- helpers -----------------------------------------------------------

fn def(graph: &OrderGraph, name: &str) -> SkipNavigationDef {
    SkipNavigationDef {
        name: name.to_string(),
        target: graph.product,
        foreign_key: graph.fk_to_order,
        is_collection: true,
        is_on_principal: true,
        field_info: None,
        source: Convention,
    }
}

// Order.products -> Product, traversing OrderProduct via its FK to Order.
fn add_order_products(graph: &mut OrderGraph) -> SkipNavigationId {
    let def = def(graph, "products");

    graph
        .model
        .add_skip_navigation(graph.order, def)
        .expect("Order.products")
}

// Product.orders -> Order, traversing OrderProduct via its FK to Product.
fn add_product_orders(graph: &mut OrderGraph) -> SkipNavigationId {
    let def = SkipNavigationDef {
        name: "orders".to_string(),
        target: graph.order,
        foreign_key: graph.fk_to_product,
        is_collection: true,
        is_on_principal: true,
        field_info: None,
        source: Convention,
    };

    graph
        .model
        .add_skip_navigation(graph.product, def)
        .expect("Product.orders")
}

// ---- declaration -------------------------------------------------------

#[test]
fn add_returns_declared_shape_with_unset_inverse() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);

    let nav = graph
        .model
        .skip_navigation(products)
        .expect("navigation must resolve");
    assert_eq!(nav.name(), "products");
    assert_eq!(nav.declaring_entity(), graph.order);
    assert_eq!(nav.target_entity(), graph.product);
    assert!(nav.is_collection());
    assert!(nav.is_on_principal());
    assert!(!nav.is_eager_loaded());
    assert_eq!(nav.inverse(), None);
    assert_eq!(nav.configuration_source(), Convention);
    assert_eq!(nav.inverse_configuration_source(), None);
}

#[test]
fn navigation_names_are_unique_across_both_kinds() {
    let mut graph = order_graph();
    add_order_products(&mut graph);

    let err = graph
        .model
        .add_skip_navigation(graph.order, def(&graph, "products"))
        .expect_err("second 'products' must be refused");
    assert_eq!(
        err,
        NodeError::DuplicateNavigation {
            entity: "Order".to_string(),
            name: "products".to_string(),
        }
    );
}

#[test]
fn declared_side_must_match_the_foreign_key() {
    let mut graph = order_graph();

    // Order is the principal of fk_to_order, not its dependent
    let mut wrong = def(&graph, "products");
    wrong.is_on_principal = false;

    let err = graph
        .model
        .add_skip_navigation(graph.order, wrong)
        .expect_err("dependent side of fk_to_order is OrderProduct");
    assert!(
        matches!(err, NodeError::SkipNavigationWrongSide { ref actual, .. } if actual == "OrderProduct"),
        "unexpected error: {err:?}"
    );
}

// ---- inverse resolution ------------------------------------------------

#[test]
fn inverse_is_one_sided_until_set_on_both() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);
    let orders = add_product_orders(&mut graph);

    graph
        .model
        .set_inverse(products, Some(orders), Explicit)
        .expect("valid inverse");

    let products_nav = graph.model.skip_navigation(products).expect("resolve");
    assert_eq!(products_nav.inverse(), Some(orders));
    assert_eq!(products_nav.configuration_source(), Explicit);
    assert_eq!(products_nav.inverse_configuration_source(), Some(Explicit));

    // the other side stays untouched until its own call
    let orders_nav = graph.model.skip_navigation(orders).expect("resolve");
    assert_eq!(orders_nav.inverse(), None);
    assert_eq!(orders_nav.inverse_configuration_source(), None);
}

#[test]
fn mutual_inverse_links_and_clears() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);
    let orders = add_product_orders(&mut graph);

    graph
        .model
        .set_inverse(products, Some(orders), Explicit)
        .expect("products -> orders");
    graph
        .model
        .set_inverse(orders, Some(products), Explicit)
        .expect("orders -> products");

    for (nav, other) in [(products, orders), (orders, products)] {
        let nav = graph.model.skip_navigation(nav).expect("resolve");
        assert_eq!(nav.inverse(), Some(other));
        assert_eq!(nav.configuration_source(), Explicit);
        assert_eq!(nav.inverse_configuration_source(), Some(Explicit));
    }

    graph
        .model
        .set_inverse(products, None, Convention)
        .expect("clearing never fails");
    graph
        .model
        .set_inverse(orders, None, Convention)
        .expect("clearing never fails");

    for nav in [products, orders] {
        let nav = graph.model.skip_navigation(nav).expect("resolve");
        assert_eq!(nav.inverse(), None);
        assert_eq!(nav.inverse_configuration_source(), None);
    }
}

#[test]
fn clearing_an_unset_inverse_succeeds() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);

    graph
        .model
        .set_inverse(products, None, Convention)
        .expect("clearing an unset inverse is a no-op");
    assert_eq!(
        graph
            .model
            .skip_navigation(products)
            .expect("resolve")
            .inverse(),
        None
    );
}

#[test]
fn endpoint_mismatch_is_rejected_and_mutates_nothing() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);

    // OrderProduct.product: declared on the association entity itself
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

    let err = graph
        .model
        .set_inverse(op_product, Some(products), Explicit)
        .expect_err("Order.products does not target OrderProduct");
    assert_eq!(
        err,
        NodeError::InverseEndpointMismatch {
            navigation: "product".to_string(),
            entity: "OrderProduct".to_string(),
            inverse: "products".to_string(),
            inverse_entity: "Order".to_string(),
        }
    );

    for nav in [op_product, products] {
        let nav = graph.model.skip_navigation(nav).expect("resolve");
        assert_eq!(nav.inverse(), None, "failed set must leave both sides unset");
        assert_eq!(nav.inverse_configuration_source(), None);
    }
}

#[test]
fn association_mismatch_is_rejected_despite_symmetric_endpoints() {
    let mut graph = order_graph();

    // synthetic self-referencing association on Product
    let parent_id = graph
        .model
        .entity_type_mut(graph.product)
        .expect("Product exists")
        .add_property("parent_id", Primitive::Int64, true, None, Convention)
        .expect("Product.parent_id");
    let product_key = graph
        .model
        .entity_type(graph.product)
        .expect("Product exists")
        .primary_key()
        .expect("Product primary key");
    let parent_fk = graph
        .model
        .add_foreign_key(
            graph.product,
            &[parent_id],
            graph.product,
            product_key,
            Convention,
        )
        .expect("self-referencing foreign key");

    // both navigations run Product -> Product, so endpoints are symmetric
    let related = graph
        .model
        .add_skip_navigation(
            graph.product,
            SkipNavigationDef {
                name: "related".to_string(),
                target: graph.product,
                foreign_key: parent_fk,
                is_collection: true,
                is_on_principal: false,
                field_info: None,
                source: Convention,
            },
        )
        .expect("Product.related via the self association");
    let bundled = graph
        .model
        .add_skip_navigation(
            graph.product,
            SkipNavigationDef {
                name: "bundled".to_string(),
                target: graph.product,
                foreign_key: graph.fk_to_product,
                is_collection: true,
                is_on_principal: true,
                field_info: None,
                source: Convention,
            },
        )
        .expect("Product.bundled via OrderProduct");

    let err = graph
        .model
        .set_inverse(bundled, Some(related), Explicit)
        .expect_err("different association entity types");
    assert_eq!(
        err,
        NodeError::InverseAssociationMismatch {
            navigation: "bundled".to_string(),
            association: "OrderProduct".to_string(),
            inverse: "related".to_string(),
            inverse_association: "Product".to_string(),
        }
    );
}

#[test]
fn self_inverse_is_rejected() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);

    let err = graph
        .model
        .set_inverse(products, Some(products), Explicit)
        .expect_err("a navigation cannot invert onto itself");
    assert_eq!(
        err,
        NodeError::SelfInverse {
            name: "products".to_string(),
        }
    );
}

#[test]
fn can_set_inverse_respects_the_recorded_source() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);
    let orders = add_product_orders(&mut graph);

    assert!(graph.model.can_set_inverse(products, orders, Convention));

    graph
        .model
        .set_inverse(products, Some(orders), Explicit)
        .expect("valid inverse");

    assert!(!graph.model.can_set_inverse(products, orders, Convention));
    assert!(graph.model.can_set_inverse(products, orders, Explicit));
    assert!(!graph.model.can_set_inverse(products, products, Explicit));
}

#[test]
fn inverse_source_upgrades_but_never_downgrades() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);
    let orders = add_product_orders(&mut graph);

    graph
        .model
        .set_inverse(products, Some(orders), DataAnnotation)
        .expect("first set");
    graph
        .model
        .set_inverse(products, Some(orders), Convention)
        .expect("re-set at a weaker source");

    let nav = graph.model.skip_navigation(products).expect("resolve");
    assert_eq!(
        nav.inverse_configuration_source(),
        Some(DataAnnotation),
        "weaker re-set must not erase the recorded strength"
    );
}

// ---- eager loading -----------------------------------------------------

#[test]
fn eager_loading_tracks_its_own_source() {
    let mut graph = order_graph();
    let products = add_order_products(&mut graph);

    assert_eq!(
        graph
            .model
            .skip_navigation(products)
            .expect("resolve")
            .eager_load_configuration_source(),
        None
    );

    graph
        .model
        .set_eager_loaded(products, true, DataAnnotation)
        .expect("mark eager");

    let nav = graph.model.skip_navigation(products).expect("resolve");
    assert!(nav.is_eager_loaded());
    assert_eq!(nav.eager_load_configuration_source(), Some(DataAnnotation));
    // the navigation's own declaration source is unaffected
    assert_eq!(nav.configuration_source(), Convention);
}
