//! End-to-end run through the create-order workflow using only the public API.

use std::collections::HashSet;

use orderdesk_core::distribution::distribute_across;
use orderdesk_core::sample::available_actions;
use orderdesk_core::variants::{combination_keys, generate_combinations};
use orderdesk_core::{
    Client, CoreError, EmptyDimensionPolicy, Manufacturer, NotificationKind, OrderDraft,
    OrderStatus, Product, ReferenceMedia, Role, SampleAction, SampleRequest, SampleStatus,
    VariantDimension, DEFAULT_DRAFT_PREFIX, DEFAULT_ORDER_PREFIX,
};

fn hoodie() -> Product {
    Product {
        id: "b7c1d2e3-0000-4000-8000-000000000001".to_string(),
        sku: "HOOD-350".to_string(),
        name: "Heavyweight Hoodie".to_string(),
        description: Some("350gsm brushed fleece".to_string()),
        dimensions: vec![
            VariantDimension::new("Color", ["Black", "Oat", "Forest"]),
            VariantDimension::new("Size", ["S", "M", "L", "XL"]),
        ],
        is_active: true,
    }
}

fn cap() -> Product {
    Product {
        id: "b7c1d2e3-0000-4000-8000-000000000002".to_string(),
        sku: "CAP-5P".to_string(),
        name: "Five Panel Cap".to_string(),
        description: None,
        dimensions: vec![
            VariantDimension::new("Color", ["Navy"]),
            VariantDimension::new("Closure", Vec::<String>::new()),
        ],
        is_active: true,
    }
}

#[test]
fn color_size_example_set() {
    let dims = vec![
        VariantDimension::new("Color", ["Red", "Blue"]),
        VariantDimension::new("Size", ["S", "M", "L"]),
    ];

    let keys: HashSet<String> = combination_keys(&dims, EmptyDimensionPolicy::Skip)
        .into_iter()
        .collect();
    let expected: HashSet<String> = ["Red/S", "Red/M", "Red/L", "Blue/S", "Blue/M", "Blue/L"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(keys, expected);
}

#[test]
fn quick_fill_preview_matches_applied_split() {
    let product = hoodie();
    let combos = generate_combinations(&product.dimensions, EmptyDimensionPolicy::Skip);
    let preview = distribute_across(250, &combos).unwrap();

    let mut draft = OrderDraft::new("admin-7");
    draft.add_product(&product, EmptyDimensionPolicy::Skip).unwrap();
    draft.quick_fill(&product.id, 250).unwrap();

    let applied = draft.product(&product.id).unwrap();
    for allocation in &preview {
        assert_eq!(
            applied.line_item(&allocation.key).unwrap().quantity,
            allocation.quantity
        );
    }
    assert_eq!(draft.total_units(), 250);
}

#[test]
fn full_order_with_sample_round_trip() {
    let client = Client {
        id: "client-42".to_string(),
        company_name: "Harbor Goods Co".to_string(),
        contact_name: None,
        email: "ops@harbor.test".to_string(),
    };
    let maker = Manufacturer {
        id: "maker-9".to_string(),
        name: "Porto Textiles".to_string(),
        country: Some("PT".to_string()),
        contact_email: "sales@porto.test".to_string(),
    };

    let mut draft = OrderDraft::new("admin-7");
    draft.select_client(&client).unwrap();
    draft.select_manufacturer(&maker).unwrap();

    let hoodie = hoodie();
    draft.add_product(&hoodie, EmptyDimensionPolicy::Skip).unwrap();
    draft.quick_fill(&hoodie.id, 120).unwrap();
    draft.set_quantity(&hoodie.id, "Forest/XL", 0).unwrap();

    // empty Closure dimension is skipped, leaving one Navy line
    let cap = cap();
    let cap_lines = draft
        .add_product(&cap, EmptyDimensionPolicy::Skip)
        .unwrap()
        .keys();
    assert_eq!(cap_lines, vec!["Navy"]);
    draft.set_quantity(&cap.id, "Navy", 60).unwrap();

    draft
        .attach_media(ReferenceMedia::new(
            "hoodie-techpack.pdf",
            "order-media/hoodie-techpack.pdf",
            Some(hoodie.id.clone()),
        ))
        .unwrap();

    draft
        .attach_sample_request(
            SampleRequest::new(2, Some("Check the rib cuff weight".into()))
                .unwrap()
                .with_combinations(["Black/M", "Oat/L"]),
        )
        .unwrap();

    let draft_record = draft.save_as_draft(DEFAULT_DRAFT_PREFIX).unwrap();
    assert_eq!(draft_record.status, OrderStatus::Draft);

    let submission = draft.submit(DEFAULT_ORDER_PREFIX).unwrap();
    assert_eq!(submission.record.total_units, 120 - 10 + 60);
    assert_eq!(submission.record.media.len(), 1);
    assert!(submission
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::OrderPlaced && n.recipient_role == Role::Client));

    // route the sample through a revision and on to approval
    let steps = [
        (Role::Admin, SampleAction::ForwardToManufacturer),
        (Role::Manufacturer, SampleAction::StartProduction),
        (Role::Manufacturer, SampleAction::ShipToAdmin),
        (Role::Admin, SampleAction::ReceiveAtAdmin),
        (Role::Admin, SampleAction::ForwardToClient),
        (Role::Client, SampleAction::RequestRevision),
        (Role::Admin, SampleAction::ForwardToManufacturer),
        (Role::Manufacturer, SampleAction::StartProduction),
        (Role::Manufacturer, SampleAction::ShipToAdmin),
        (Role::Admin, SampleAction::ReceiveAtAdmin),
        (Role::Admin, SampleAction::ForwardToClient),
        (Role::Client, SampleAction::Approve),
    ];
    for (actor, action) in steps {
        draft.advance_sample(actor, action, None).unwrap();
    }

    let sample = draft.sample_request().unwrap();
    assert_eq!(sample.status(), SampleStatus::Approved);
    assert_eq!(sample.revision(), 1);
    assert_eq!(sample.history().len(), steps.len());
    assert!(available_actions(sample.status(), Role::Admin).is_empty());

    // the order itself stays frozen
    assert!(matches!(
        draft.remove_product(&cap.id),
        Err(CoreError::OrderNotEditable { .. })
    ));
}
