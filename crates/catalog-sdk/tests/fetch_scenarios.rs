//! Fetch outcomes against an in-memory catalog

use catalog_sdk::{
    attr, AssetClient, AssetType, AttributeProjection, Column, EntityBuilder, Identifier,
    InMemoryStore, Readme, SdkError, Table,
};

const TABLE_GUID: &str = "5d9a1b0e-6b7d-4a8e-9a1f-1d2e3f4a5b6c";

fn catalog() -> AssetClient<InMemoryStore> {
    let column = EntityBuilder::new("Column")
        .qualified_name("default/db/orders/id")
        .name("id")
        .build();
    let table = EntityBuilder::new("Table")
        .guid(TABLE_GUID)
        .qualified_name("default/db/orders")
        .name("orders")
        .description("All orders")
        .relationship("columns", [Column::ref_by_qualified_name("default/db/orders/id")])
        .build();
    AssetClient::new(InMemoryStore::with_entities([table, column]))
}

#[tokio::test]
async fn test_missing_guid_is_not_found_by_guid() {
    let client = catalog();
    let err = client
        .get::<Table>("11111111-1111-1111-1111-111111111111")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(
        matches!(err, SdkError::NotFoundByGuid(ref guid) if guid == "11111111-1111-1111-1111-111111111111")
    );
}

#[tokio::test]
async fn test_missing_qualified_name_is_not_found_by_qualified_name() {
    let err = catalog().get::<Table>("default/db/nothing").await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::NotFoundByQualifiedName { ref type_name, ref qualified_name }
            if type_name == "Table" && qualified_name == "default/db/nothing"
    ));
}

#[tokio::test]
async fn test_other_type_at_qualified_name_is_wrong_type() {
    let err = catalog().get::<Readme>("default/db/orders").await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::WrongTypeRequested { ref identifier, ref expected_type }
            if identifier == "default/db/orders" && expected_type == "Readme"
    ));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_found_asset_has_requested_type() {
    let client = catalog();
    let table: Table = client.get(TABLE_GUID).await.unwrap();
    assert_eq!(table.type_name, Table::TYPE_NAME);
    assert_eq!(table.name(), Some("orders"));
    // Relationships are left out unless asked for.
    assert!(table.relationship("columns").is_none());

    let table: Table = client.get_with_relationships(TABLE_GUID).await.unwrap();
    assert!(table.relationship("columns").is_some());
}

#[tokio::test]
async fn test_every_fetch_is_one_round_trip() {
    let client = catalog();
    let projection = AttributeProjection::new().attribute(attr::DESCRIPTION);
    let identifiers = [
        TABLE_GUID,
        "11111111-1111-1111-1111-111111111111",
        "default/db/orders",
        "default/db/orders/id",
    ];

    for identifier in identifiers {
        for projection in [None, Some(&projection)] {
            client.store().reset_round_trips();
            let outcome = match projection {
                Some(p) => client.get_with_projection::<Table>(identifier, p).await,
                None => client.get::<Table>(identifier).await,
            };
            // Exactly one of: the asset, not found, wrong type.
            match outcome {
                Ok(table) => assert_eq!(table.type_name, "Table"),
                Err(e) => assert!(
                    e.is_not_found() || matches!(e, SdkError::WrongTypeRequested { .. }),
                    "unexpected error: {e}"
                ),
            }
            assert_eq!(client.store().round_trips(), 1, "{identifier}");
        }
    }
}

#[tokio::test]
async fn test_projection_limits_materialized_attributes() {
    let projection = AttributeProjection::new().attribute(attr::USER_DESCRIPTION);
    let table: Table = catalog()
        .get_with_projection("default/db/orders", &projection)
        .await
        .unwrap();

    assert_eq!(table.qualified_name(), Some("default/db/orders"));
    assert!(table.description().is_none());
}

#[tokio::test]
async fn test_explicit_qualified_name_skips_guid_sniffing() {
    let guid_shaped = "22222222-2222-2222-2222-222222222222";
    let column = EntityBuilder::new("Column")
        .qualified_name(guid_shaped)
        .name("odd")
        .build();
    let client = AssetClient::new(InMemoryStore::with_entities([column]));

    assert!(client.get::<Column>(guid_shaped).await.is_err());
    let column: Column = client
        .fetch(&Identifier::QualifiedName(guid_shaped.into()), None, false)
        .await
        .unwrap();
    assert_eq!(column.name(), Some("odd"));
}

#[tokio::test]
async fn test_blank_identifier_is_rejected_before_dispatch() {
    let client = catalog();
    let err = client.get::<Table>("  ").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidRequest(_)));
    assert_eq!(client.store().round_trips(), 0);
}
