//! Shared fixtures for graph tests.

use crate::{
    node::{EntityTypeId, ForeignKeyId, Model},
    types::{ConfigurationSource, Primitive},
};

///
/// OrderGraph
///
/// Order/Product plus the OrderProduct association entity, wired with the
/// two association foreign keys a many-to-many mapping needs.
///

pub(crate) struct OrderGraph {
    pub model: Model,
    pub order: EntityTypeId,
    pub product: EntityTypeId,
    pub order_product: EntityTypeId,
    /// OrderProduct(order_id) -> Order(id)
    pub fk_to_order: ForeignKeyId,
    /// OrderProduct(product_id) -> Product(id)
    pub fk_to_product: ForeignKeyId,
}

pub(crate) fn order_graph() -> OrderGraph {
    let source = ConfigurationSource::Convention;
    let mut model = Model::new();

    let order = model.add_entity_type("Order", source).expect("add Order");
    let product = model.add_entity_type("Product", source).expect("add Product");
    let order_product = model
        .add_entity_type("OrderProduct", source)
        .expect("add OrderProduct");

    let order_key = {
        let entity = model.entity_type_mut(order).expect("Order exists");
        let id = entity
            .add_property("id", Primitive::Int64, false, None, source)
            .expect("Order.id");
        let key = entity.add_key(&[id], source).expect("Order key");
        entity.set_primary_key(key).expect("Order primary key");

        key
    };

    let product_key = {
        let entity = model.entity_type_mut(product).expect("Product exists");
        let id = entity
            .add_property("id", Primitive::Int64, false, None, source)
            .expect("Product.id");
        let key = entity.add_key(&[id], source).expect("Product key");
        entity.set_primary_key(key).expect("Product primary key");

        key
    };

    let (op_order_id, op_product_id) = {
        let entity = model
            .entity_type_mut(order_product)
            .expect("OrderProduct exists");
        let order_ref = entity
            .add_property("order_id", Primitive::Int64, false, None, source)
            .expect("OrderProduct.order_id");
        let product_ref = entity
            .add_property("product_id", Primitive::Int64, false, None, source)
            .expect("OrderProduct.product_id");
        let key = entity
            .add_key(&[order_ref, product_ref], source)
            .expect("OrderProduct key");
        entity.set_primary_key(key).expect("OrderProduct primary key");

        (order_ref, product_ref)
    };

    let fk_to_order = model
        .add_foreign_key(order_product, &[op_order_id], order, order_key, source)
        .expect("foreign key to Order");
    let fk_to_product = model
        .add_foreign_key(order_product, &[op_product_id], product, product_key, source)
        .expect("foreign key to Product");

    OrderGraph {
        model,
        order,
        product,
        order_product,
        fk_to_order,
        fk_to_product,
    }
}
