//! Partial-update passthroughs against an in-memory catalog

use catalog_sdk::{
    AnnouncementType, AssetClient, AssetType, CertificateStatus, EntityBuilder, EntityStatus,
    GlossaryTerm, InMemoryStore, Link, Readme, SaveSemantic, Table, TagOptions,
};

const QN: &str = "default/snowflake/1700000000/db/schema/orders";

async fn catalog() -> (AssetClient<InMemoryStore>, String) {
    let store = InMemoryStore::new();
    let guid = store
        .insert(
            EntityBuilder::new("Table")
                .qualified_name(QN)
                .name("orders")
                .description("All orders")
                .user_description("Orders, one row each")
                .owner_users(["jane"])
                .owner_groups(["data-eng"])
                .certificate(CertificateStatus::Draft, Some("WIP"))
                .announcement(AnnouncementType::Warning, "Migrating", Some("Next week"))
                .build(),
        )
        .await;
    (AssetClient::new(store), guid)
}

async fn stored(client: &AssetClient<InMemoryStore>, guid: &str) -> Table {
    client.get_with_relationships(guid).await.unwrap()
}

#[tokio::test]
async fn test_remove_description_clears_only_that_attribute() {
    let (client, guid) = catalog().await;
    let updated = client
        .remove_description::<Table>(QN, "orders")
        .await
        .unwrap()
        .expect("table updated");

    assert!(updated.description().is_none());
    let table = stored(&client, &guid).await;
    assert!(table.description().is_none());
    assert_eq!(table.user_description(), Some("Orders, one row each"));
    assert_eq!(table.owner_users().to_vec(), vec!["jane".to_string()]);
}

#[tokio::test]
async fn test_remove_user_description_and_owners() {
    let (client, guid) = catalog().await;
    client.remove_user_description::<Table>(QN, "orders").await.unwrap();
    client.remove_owners::<Table>(QN, "orders").await.unwrap();

    let table = stored(&client, &guid).await;
    assert!(table.user_description().is_none());
    assert!(table.owner_users().is_empty());
    assert!(table.owner_groups().is_empty());
    assert_eq!(table.description(), Some("All orders"));
}

#[tokio::test]
async fn test_certificate_round_trip() {
    let (client, guid) = catalog().await;
    client
        .update_certificate::<Table>(QN, CertificateStatus::Verified, Some("Reviewed"))
        .await
        .unwrap();
    let table = stored(&client, &guid).await;
    assert_eq!(table.certificate_status(), Some(CertificateStatus::Verified));
    assert_eq!(table.certificate_status_message(), Some("Reviewed"));

    client.remove_certificate::<Table>(QN, "orders").await.unwrap();
    let table = stored(&client, &guid).await;
    assert!(table.certificate_status().is_none());
    assert!(table.certificate_status_message().is_none());
}

#[tokio::test]
async fn test_announcement_round_trip() {
    let (client, guid) = catalog().await;
    client
        .update_announcement::<Table>(QN, AnnouncementType::Issue, "Broken", None)
        .await
        .unwrap();
    let table = stored(&client, &guid).await;
    assert_eq!(table.announcement_type(), Some(AnnouncementType::Issue));
    assert_eq!(table.announcement_title(), Some("Broken"));
    // Message from the earlier announcement survives a partial update.
    assert_eq!(table.announcement_message(), Some("Next week"));

    client.remove_announcement::<Table>(QN, "orders").await.unwrap();
    let table = stored(&client, &guid).await;
    assert!(table.announcement_type().is_none());
    assert!(table.announcement_title().is_none());
    assert!(table.announcement_message().is_none());
}

#[tokio::test]
async fn test_term_semantics() {
    let (client, guid) = catalog().await;
    let term = |qn: &str| GlossaryTerm::ref_by_qualified_name(qn);

    client
        .replace_terms::<Table>(QN, "orders", vec![term("revenue@glossary")])
        .await
        .unwrap();
    client
        .append_terms::<Table>(QN, vec![term("orders@glossary"), term("revenue@glossary")])
        .await
        .unwrap();

    let names = |table: &Table| -> Vec<String> {
        table
            .assigned_terms()
            .iter()
            .filter_map(|r| r.qualified_name().map(str::to_string))
            .collect()
    };
    assert_eq!(
        names(&stored(&client, &guid).await),
        vec!["revenue@glossary", "orders@glossary"]
    );

    client
        .remove_terms::<Table>(QN, vec![term("revenue@glossary")])
        .await
        .unwrap();
    assert_eq!(names(&stored(&client, &guid).await), vec!["orders@glossary"]);

    client.replace_terms::<Table>(QN, "orders", vec![]).await.unwrap();
    assert!(stored(&client, &guid).await.assigned_terms().is_empty());
}

#[tokio::test]
async fn test_term_refs_take_requested_semantic() {
    let reference = GlossaryTerm::term_ref("t@g", SaveSemantic::Append);
    assert_eq!(reference.semantic, SaveSemantic::Append);
    assert_eq!(reference.type_name, "AtlasGlossaryTerm");
}

#[tokio::test]
async fn test_update_of_unknown_asset_returns_none() {
    let (client, _) = catalog().await;
    let updated = client
        .update_certificate::<Table>("default/db/absent", CertificateStatus::Verified, None)
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_atlan_tags() {
    let (client, _) = catalog().await;
    let updated = client
        .append_atlan_tags::<Table, _, _>(QN, ["PII", "Finance"], TagOptions::no_propagation())
        .await
        .unwrap()
        .expect("table tagged");

    let tags = updated.atlan_tags();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|t| !t.propagate));

    assert!(client.remove_atlan_tag::<Table>(QN, "PII").await.unwrap());
    assert!(!client.remove_atlan_tag::<Table>(QN, "PII").await.unwrap());
    assert!(client
        .append_atlan_tags::<Table, _, _>("default/db/absent", ["PII"], TagOptions::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_restore() {
    let store = InMemoryStore::with_entities([EntityBuilder::new("Table")
        .qualified_name(QN)
        .name("orders")
        .status(EntityStatus::Deleted)
        .build()]);
    let client = AssetClient::new(store);

    assert!(client.select::<Table>(false).execute().await.unwrap().is_empty());
    assert!(client.restore::<Table>(QN).await.unwrap());
    assert!(!client.restore::<Table>("default/db/absent").await.unwrap());
    assert_eq!(client.select::<Table>(false).execute().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_select_filters_by_type_and_term() {
    let (client, guid) = catalog().await;
    let table: Table = client.get(&guid).await.unwrap();
    let readme = Readme::creator(&table, "orders", "<h1>Orders</h1>").unwrap();
    let link = Link::creator(&table, "Runbook", "https://wiki.example.com/orders").unwrap();
    let saved = client.save([readme.into_entity(), link.into_entity()]).await.unwrap();
    assert_eq!(saved.created.len(), 2);

    let readmes = client
        .select::<Readme>(false)
        .where_term("qualifiedName", format!("{guid}/readme"))
        .include_on_results("description")
        .execute()
        .await
        .unwrap();
    assert_eq!(readmes.len(), 1);
    assert_eq!(readmes[0].content(), Some("<h1>Orders</h1>"));

    let tables = client.select::<Table>(true).execute().await.unwrap();
    assert_eq!(tables.len(), 1);
}

#[tokio::test]
async fn test_created_placeholder_gets_real_guid() {
    let (client, guid) = catalog().await;
    let table: Table = client.get(&guid).await.unwrap();
    let link = Link::creator(&table, "Runbook", "https://wiki.example.com/orders").unwrap();
    let placeholder = link.guid.clone().expect("placeholder");

    let saved = client.save([link]).await.unwrap();
    let assigned = saved.assigned_guid(&placeholder).expect("assignment").to_string();

    let fetched: Link = client.get(&assigned).await.unwrap();
    assert_eq!(fetched.url(), Some("https://wiki.example.com/orders"));
}
