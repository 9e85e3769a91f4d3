//! Attribute projection fetcher
//!
//! Resolves one identifier to exactly one typed asset. Without a projection
//! the store is asked directly; with one, a single-result search applies the
//! projection server-side. Either way the outcome is the asset,
//! `NotFound*`, or `WrongTypeRequested`.

use crate::assets::AssetType;
use crate::error::{Result, SdkError};
use crate::model::{AttributeProjection, Entity, Identifier};
use crate::search::{field, Condition, SearchRequest};
use crate::store::Store;

/// Fetch the asset of type `A` at `identifier`.
///
/// An empty projection counts as none. `include_relationships` only applies
/// to the direct path; a projection lists the relationships it wants.
pub async fn fetch<A, S>(
    store: &S,
    identifier: &Identifier,
    projection: Option<&AttributeProjection>,
    include_relationships: bool,
) -> Result<A>
where
    A: AssetType,
    S: Store + ?Sized,
{
    let found = match projection.filter(|p| !p.is_empty()) {
        None => fetch_direct(store, A::TYPE_NAME, identifier, include_relationships).await?,
        Some(projection) => {
            fetch_projected(store, A::TYPE_NAME, identifier, projection).await?
        }
    };

    let entity = found.ok_or_else(|| not_found(A::TYPE_NAME, identifier))?;
    if entity.type_name != A::TYPE_NAME {
        tracing::warn!(
            "{} resolved to a {}, not the requested {}",
            identifier,
            entity.type_name,
            A::TYPE_NAME
        );
        return Err(SdkError::wrong_type(identifier.as_str(), A::TYPE_NAME));
    }
    Ok(A::from_entity_unchecked(entity))
}

async fn fetch_direct<S: Store + ?Sized>(
    store: &S,
    type_name: &str,
    identifier: &Identifier,
    include_relationships: bool,
) -> Result<Option<Entity>> {
    tracing::debug!(
        "Fetching {} {} directly (relationships: {})",
        type_name,
        identifier,
        include_relationships
    );
    match identifier {
        Identifier::Guid(guid) => store.get_by_guid(guid, include_relationships).await,
        Identifier::QualifiedName(qualified_name) => {
            store
                .get_by_type_and_identifier(type_name, qualified_name, include_relationships)
                .await
        }
    }
}

async fn fetch_projected<S: Store + ?Sized>(
    store: &S,
    type_name: &str,
    identifier: &Identifier,
    projection: &AttributeProjection,
) -> Result<Option<Entity>> {
    tracing::debug!(
        "Fetching {} {} by search ({} attributes, {} related)",
        type_name,
        identifier,
        projection.attributes.len(),
        projection.related_attributes.len()
    );
    let page = store
        .search(&projected_request(type_name, identifier, projection))
        .await?;
    Ok(page.first())
}

/// Single-result search for `identifier`, restricted to `type_name`
pub(crate) fn projected_request(
    type_name: &str,
    identifier: &Identifier,
    projection: &AttributeProjection,
) -> SearchRequest {
    let key = match identifier {
        Identifier::Guid(_) => field::GUID,
        Identifier::QualifiedName(_) => field::QUALIFIED_NAME,
    };
    SearchRequest::new()
        .with_condition(Condition::term(key, identifier.as_str()))
        .with_condition(Condition::type_name(type_name))
        .with_projection(projection.clone())
        .with_page_size(1)
}

fn not_found(type_name: &str, identifier: &Identifier) -> SdkError {
    match identifier {
        Identifier::Guid(guid) => SdkError::NotFoundByGuid(guid.clone()),
        Identifier::QualifiedName(qualified_name) => SdkError::NotFoundByQualifiedName {
            type_name: type_name.to_string(),
            qualified_name: qualified_name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Column, Readme, Table};
    use crate::model::{attr, EntityBuilder};
    use crate::store::InMemoryStore;

    const GUID: &str = "11111111-1111-1111-1111-111111111111";

    fn store() -> InMemoryStore {
        InMemoryStore::with_entities([EntityBuilder::new("Table")
            .guid(GUID)
            .qualified_name("default/db/orders")
            .name("orders")
            .description("All orders")
            .build()])
    }

    #[test]
    fn test_projected_request_shape() {
        let projection = AttributeProjection::new().attribute(attr::DESCRIPTION);
        let request = projected_request(
            "Table",
            &Identifier::QualifiedName("default/db/orders".into()),
            &projection,
        );

        assert_eq!(
            request.conditions,
            vec![
                Condition::term(field::QUALIFIED_NAME, "default/db/orders"),
                Condition::term(field::TYPE_NAME, "Table"),
            ]
        );
        assert_eq!(request.page_size, 1);
        assert_eq!(request.projection, projection);
    }

    #[tokio::test]
    async fn test_direct_guid_fetch() {
        let store = store();
        let table: Table = fetch(&store, &Identifier::Guid(GUID.into()), None, false)
            .await
            .unwrap();
        assert_eq!(table.name(), Some("orders"));
        assert_eq!(store.round_trips(), 1);
    }

    #[tokio::test]
    async fn test_empty_projection_takes_direct_path() {
        let store = store();
        let empty = AttributeProjection::new();
        let table: Table = fetch(
            &store,
            &Identifier::QualifiedName("default/db/orders".into()),
            Some(&empty),
            false,
        )
        .await
        .unwrap();
        // The direct path keeps unrequested attributes.
        assert_eq!(table.description(), Some("All orders"));
    }

    #[tokio::test]
    async fn test_projected_fetch_narrows_attributes() {
        let store = store();
        let projection = AttributeProjection::new().attribute(attr::USER_DESCRIPTION);
        let table: Table = fetch(&store, &Identifier::Guid(GUID.into()), Some(&projection), false)
            .await
            .unwrap();
        assert!(table.description().is_none());
        assert_eq!(table.qualified_name(), Some("default/db/orders"));
    }

    #[tokio::test]
    async fn test_projected_fetch_of_wrong_type_is_not_found() {
        // The type filter is part of the search, so a mismatch never matches.
        let store = store();
        let projection = AttributeProjection::new().attribute(attr::DESCRIPTION);
        let err = fetch::<Readme, _>(&store, &Identifier::Guid(GUID.into()), Some(&projection), false)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::NotFoundByGuid(ref g) if g == GUID));
    }

    #[tokio::test]
    async fn test_direct_fetch_of_wrong_type() {
        let store = store();
        let err = fetch::<Column, _>(&store, &Identifier::Guid(GUID.into()), None, false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::WrongTypeRequested { ref identifier, ref expected_type }
                if identifier == GUID && expected_type == "Column"
        ));
    }
}
