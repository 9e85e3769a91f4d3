//! Store-agnostic asset client

use crate::assets::AssetType;
use crate::error::Result;
use crate::fetch;
use crate::model::{
    attr, AnnouncementType, AttributeProjection, CertificateStatus, Entity, EntityBuilder,
    EntityReference, Identifier, SaveSemantic, TagOptions,
};
use crate::resolve;
use crate::search::Select;
use crate::store::{MutationResult, Store};

/// Typed access to catalog assets
///
/// Every operation is generic over the asset type, so one client serves all
/// of them. Partial updates submit only identity plus the touched attributes;
/// removals submit an explicit null.
///
/// # Example
///
/// ```rust,no_run
/// use catalog_sdk::{AssetClient, CertificateStatus, HttpStore, Table};
///
/// # async fn example() -> catalog_sdk::Result<()> {
/// let client = AssetClient::new(HttpStore::from_env()?);
///
/// let table: Table = client.get("default/snowflake/1700000000/db/schema/orders").await?;
/// client
///     .update_certificate::<Table>(
///         "default/snowflake/1700000000/db/schema/orders",
///         CertificateStatus::Verified,
///         Some("Reviewed by data eng"),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AssetClient<S: Store> {
    store: S,
}

impl<S: Store> AssetClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Retrieval ====================

    /// Asset by GUID or qualifiedName, without relationships
    pub async fn get<A: AssetType>(&self, identifier: &str) -> Result<A> {
        self.fetch(&Identifier::classify(identifier)?, None, false)
            .await
    }

    /// Asset by GUID or qualifiedName, relationships included
    pub async fn get_with_relationships<A: AssetType>(&self, identifier: &str) -> Result<A> {
        self.fetch(&Identifier::classify(identifier)?, None, true)
            .await
    }

    /// Asset by GUID or qualifiedName with only the projected attributes
    pub async fn get_with_projection<A: AssetType>(
        &self,
        identifier: &str,
        projection: &AttributeProjection,
    ) -> Result<A> {
        self.fetch(&Identifier::classify(identifier)?, Some(projection), false)
            .await
    }

    /// Asset at an already-classified identifier
    pub async fn fetch<A: AssetType>(
        &self,
        identifier: &Identifier,
        projection: Option<&AttributeProjection>,
        include_relationships: bool,
    ) -> Result<A> {
        fetch::fetch(&self.store, identifier, projection, include_relationships).await
    }

    /// Search for assets of type `A`, active only unless `include_archived`
    pub fn select<A: AssetType>(&self, include_archived: bool) -> Select<'_, A, S> {
        Select::new(&self.store, include_archived)
    }

    // ==================== Mutation ====================

    /// Create or partially update entities
    pub async fn save<I, E>(&self, entities: I) -> Result<MutationResult>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        self.store
            .save(entities.into_iter().map(Into::into).collect())
            .await
    }

    /// Reactivate a soft-deleted asset
    pub async fn restore<A: AssetType>(&self, qualified_name: &str) -> Result<bool> {
        self.store.restore(A::TYPE_NAME, qualified_name).await
    }

    pub async fn remove_description<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<A>> {
        let updater = A::updater(qualified_name, name).null_attribute(attr::DESCRIPTION);
        self.submit(updater).await
    }

    pub async fn remove_user_description<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<A>> {
        let updater = A::updater(qualified_name, name).null_attribute(attr::USER_DESCRIPTION);
        self.submit(updater).await
    }

    /// Clear both owner users and owner groups
    pub async fn remove_owners<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<A>> {
        let updater = A::updater(qualified_name, name)
            .null_attribute(attr::OWNER_USERS)
            .null_attribute(attr::OWNER_GROUPS);
        self.submit(updater).await
    }

    pub async fn update_certificate<A: AssetType>(
        &self,
        qualified_name: &str,
        status: CertificateStatus,
        message: Option<&str>,
    ) -> Result<Option<A>> {
        let updater = resolve::partial(A::TYPE_NAME, qualified_name).certificate(status, message);
        self.submit(updater).await
    }

    pub async fn remove_certificate<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<A>> {
        let updater = A::updater(qualified_name, name)
            .null_attribute(attr::CERTIFICATE_STATUS)
            .null_attribute(attr::CERTIFICATE_STATUS_MESSAGE);
        self.submit(updater).await
    }

    pub async fn update_announcement<A: AssetType>(
        &self,
        qualified_name: &str,
        kind: AnnouncementType,
        title: &str,
        message: Option<&str>,
    ) -> Result<Option<A>> {
        let updater =
            resolve::partial(A::TYPE_NAME, qualified_name).announcement(kind, title, message);
        self.submit(updater).await
    }

    pub async fn remove_announcement<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<A>> {
        let updater = A::updater(qualified_name, name)
            .null_attribute(attr::ANNOUNCEMENT_TYPE)
            .null_attribute(attr::ANNOUNCEMENT_TITLE)
            .null_attribute(attr::ANNOUNCEMENT_MESSAGE);
        self.submit(updater).await
    }

    /// Replace all assigned terms; an empty list removes them all
    pub async fn replace_terms<A: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
        terms: Vec<EntityReference>,
    ) -> Result<Option<A>> {
        let terms = with_semantic(terms, SaveSemantic::Replace);
        let updater = A::updater(qualified_name, name).assigned_terms(terms);
        self.submit(updater).await
    }

    /// Add terms, keeping those already assigned
    pub async fn append_terms<A: AssetType>(
        &self,
        qualified_name: &str,
        terms: Vec<EntityReference>,
    ) -> Result<Option<A>> {
        let terms = with_semantic(terms, SaveSemantic::Append);
        let updater = resolve::partial(A::TYPE_NAME, qualified_name).assigned_terms(terms);
        self.submit(updater).await
    }

    /// Remove specific terms, keeping the rest
    pub async fn remove_terms<A: AssetType>(
        &self,
        qualified_name: &str,
        terms: Vec<EntityReference>,
    ) -> Result<Option<A>> {
        let terms = with_semantic(terms, SaveSemantic::Remove);
        let updater = resolve::partial(A::TYPE_NAME, qualified_name).assigned_terms(terms);
        self.submit(updater).await
    }

    /// Attach tags by name, returning the updated asset
    pub async fn append_atlan_tags<A, I, T>(
        &self,
        qualified_name: &str,
        tag_names: I,
        options: TagOptions,
    ) -> Result<Option<A>>
    where
        A: AssetType,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags = tag_names.into_iter().map(|name| options.tag(name)).collect();
        self.store
            .append_atlan_tags(A::TYPE_NAME, qualified_name, tags)
            .await?
            .map(A::from_entity)
            .transpose()
    }

    /// Detach one tag, `false` if it was not attached
    pub async fn remove_atlan_tag<A: AssetType>(
        &self,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<bool> {
        self.store
            .remove_atlan_tag(A::TYPE_NAME, qualified_name, tag_name)
            .await
    }

    /// Save one updater and return what the store reports as changed
    async fn submit<A: AssetType>(&self, updater: EntityBuilder) -> Result<Option<A>> {
        let type_name = updater.type_name().to_string();
        let result = self.store.save(vec![updater.build()]).await?;
        match result.into_first_mutated() {
            Some(entity) => A::from_entity(entity).map(Some),
            None => {
                tracing::debug!("Save of {} changed nothing", type_name);
                Ok(None)
            }
        }
    }
}

fn with_semantic(terms: Vec<EntityReference>, semantic: SaveSemantic) -> Vec<EntityReference> {
    terms
        .into_iter()
        .map(|term| term.with_semantic(semantic))
        .collect()
}
