use affordance_core::{
	ActionDescriptor, AffordanceError, Link, Method, Parameter, ResourceEnvelope, ValueType,
};
use affordance_encoders::{EncodeError, RepresentationEncoder, SirenEncoder, SirenEntity};
use rstest::{fixture, rstest};
use serde_json::json;

fn add_order_items() -> ActionDescriptor {
	ActionDescriptor::builder("addOrderItems", Method::Post, "/orders/{orderNumber}/items")
		.media_type("application/json")
		.bind("orderNumber", 42)
		.parameter(
			Parameter::builder("orderNumber", ValueType::Number)
				.identifier()
				.build(),
		)
		.parameter(
			Parameter::builder("productCode", ValueType::Text)
				.required(true)
				.build(),
		)
		.parameter(
			Parameter::builder("quantity", ValueType::Number)
				.default_value(1)
				.min(1.0)
				.build(),
		)
		.build()
		.unwrap()
}

#[fixture]
fn order() -> ResourceEnvelope {
	let customer = ResourceEnvelope::builder()
		.self_link(Link::self_link("/customers/pj123").unwrap())
		.semantic_type("customer")
		.property("customerId", "pj123")
		.property("name", "Peter Joseph")
		.build();

	ResourceEnvelope::builder()
		.self_link(Link::self_link("/orders/42").unwrap())
		.semantic_type("order")
		.property("orderNumber", 42)
		.property("itemCount", 3)
		.property("status", "pending")
		.link(Link::actionable("order-items", add_order_items()))
		.link(Link::new("next", "/orders/43").unwrap())
		.link(Link::new("previous", "/orders/41").unwrap())
		.embed("customer", customer)
		.build()
}

#[rstest]
fn test_order_entity(order: ResourceEnvelope) {
	let entity = SirenEncoder::new()
		.base_url("http://localhost")
		.to_entity(&order)
		.unwrap();

	assert_eq!(entity.class, vec!["order"]);
	assert_eq!(
		serde_json::Value::Object(entity.properties.clone()),
		json!({"orderNumber": 42, "itemCount": 3, "status": "pending"})
	);

	let rels: Vec<_> = entity.links.iter().map(|l| l.rel[0].as_str()).collect();
	assert_eq!(rels, vec!["self", "next", "previous"]);
	assert_eq!(entity.link("next").unwrap().href, "http://localhost/orders/43");

	let action = entity.action("addOrderItems").unwrap();
	assert_eq!(action.method, "POST");
	assert_eq!(action.href, "http://localhost/orders/42/items");
	assert_eq!(action.media_type.as_deref(), Some("application/json"));
	let types: Vec<_> = action
		.fields
		.iter()
		.map(|f| (f.name.as_str(), f.field_type.as_str()))
		.collect();
	assert_eq!(
		types,
		vec![
			("orderNumber", "hidden"),
			("productCode", "text"),
			("quantity", "number")
		]
	);
	assert_eq!(action.field("orderNumber").unwrap().value, Some(json!(42)));
	assert_eq!(action.field("productCode").unwrap().value, None);

	assert_eq!(entity.entities.len(), 1);
	let customer = &entity.entities[0];
	assert_eq!(customer.rel, vec!["customer"]);
	assert_eq!(customer.properties["name"], json!("Peter Joseph"));
	assert_eq!(
		customer.link("self").unwrap().href,
		"http://localhost/customers/pj123"
	);
}

#[rstest]
fn test_fields_round_trip(order: ResourceEnvelope) {
	let bytes = SirenEncoder::new().encode(&order).unwrap();
	let parsed: SirenEntity = serde_json::from_slice(&bytes).unwrap();

	let action = add_order_items();
	let fields = &parsed.action("addOrderItems").unwrap().fields;
	assert_eq!(fields.len(), action.parameters().len());
	for (field, param) in fields.iter().zip(action.parameters()) {
		assert_eq!(field.name, param.name);
		assert_eq!(field.field_type, affordance_encoders::siren_field_type(param));
		assert_eq!(field.value.as_ref(), param.effective_value());
	}
	assert_eq!(parsed, SirenEncoder::new().to_entity(&order).unwrap());
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_encoding_is_idempotent(order: ResourceEnvelope, #[case] pretty: bool) {
	let encoder = SirenEncoder::new().pretty(pretty);
	assert_eq!(encoder.encode(&order).unwrap(), encoder.encode(&order).unwrap());
}

#[test]
fn test_default_outside_allowed_values_fails() {
	let action = ActionDescriptor::builder("setStatus", Method::Patch, "/orders/42")
		.parameter(
			Parameter::builder("status", ValueType::Text)
				.allowed_values(vec![json!("pending"), json!("shipped")])
				.default_value("lost")
				.build(),
		)
		.build()
		.unwrap();
	let envelope = ResourceEnvelope::builder()
		.link(Link::actionable("setStatus", action))
		.build();

	let err = SirenEncoder::new().encode(&envelope).unwrap_err();
	assert!(matches!(
		err,
		EncodeError::Affordance(AffordanceError::InvalidDefault { ref parameter, .. })
			if parameter == "status"
	));
}
