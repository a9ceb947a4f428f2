use sqlx::FromRow;
use time::OffsetDateTime;

use common::prelude::{Capability, EntityId, Secret, SecretKind};

use crate::database::types::DSecret;
use crate::database::Database;

/// Content type given to entities that never set one
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";
/// Longest content type the store accepts
pub const MAX_CONTENT_TYPE_LEN: usize = 255;
/// Fresh secret pairs drawn before giving up on creating an entity
pub const MAX_CREATE_ATTEMPTS: usize = 5;

const SELECT_ENTITY: &str = r#"
    SELECT
        id, public_secret, private_secret, text,
        content_type, created_at, updated_at
    FROM entities
    WHERE id = ?1
"#;

/// A paste, as stored
///
/// The two secrets are immutable; `text` and `content_type` change only
/// through the write operations, each of which must present the private secret.
#[derive(Debug, Clone, FromRow)]
pub struct Entity {
    pub id: EntityId,
    pub public_secret: DSecret,
    pub private_secret: DSecret,
    pub text: Option<String>,
    pub content_type: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// What a holder of the public secret gets back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityContent {
    pub text: String,
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Unknown id, wrong secret, or a secret of the wrong kind.
    /// These are deliberately indistinguishable.
    #[error("entity not found")]
    NotFound,
    #[error("invalid content type: {0}")]
    InvalidContentType(&'static str),
    #[error("secret collision persisted after {0} attempts")]
    SecretCollision(usize),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Entity {
    /// The stored secret that grants `capability` on this entity
    pub fn secret_for(&self, capability: Capability) -> &Secret {
        match capability.granted_by() {
            SecretKind::Public => &self.public_secret,
            SecretKind::Private => &self.private_secret,
        }
    }

    /// Create a new entity with a fresh public/private secret pair
    ///
    /// The returned record carries both secrets; this is the only time
    /// the store hands out the private one.
    pub async fn create(text: Option<&str>, db: &Database) -> Result<Entity, EntityError> {
        Self::create_with(text, db, || {
            (
                Secret::generate(SecretKind::Public),
                Secret::generate(SecretKind::Private),
            )
        })
        .await
    }

    /// Create an entity, drawing secret pairs from `draw` until one is not already taken
    pub(crate) async fn create_with<F>(
        text: Option<&str>,
        db: &Database,
        mut draw: F,
    ) -> Result<Entity, EntityError>
    where
        F: FnMut() -> (Secret, Secret) + Send,
    {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let (public, private) = draw();

            let result = sqlx::query_as::<_, Entity>(
                r#"
                INSERT INTO entities (public_secret, private_secret, text)
                VALUES (?1, ?2, ?3)
                RETURNING
                    id, public_secret, private_secret, text,
                    content_type, created_at, updated_at
                "#,
            )
            .bind(DSecret::from(public))
            .bind(DSecret::from(private))
            .bind(text)
            .fetch_one(&**db)
            .await;

            match result {
                Ok(entity) => {
                    tracing::info!(entity_id = entity.id, "entity created");
                    return Ok(entity);
                }
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    tracing::warn!(attempt, "secret collision on create, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(
            attempts = MAX_CREATE_ATTEMPTS,
            "giving up on entity creation after repeated secret collisions"
        );
        Err(EntityError::SecretCollision(MAX_CREATE_ATTEMPTS))
    }

    /// Load entity `id` if `claimed` is its secret for `capability`
    ///
    /// This is the single access check behind every read and write. An id
    /// alone never resolves; the claimed secret is compared in constant time
    /// against the stored secret for the requested capability only.
    pub async fn resolve(
        id: EntityId,
        claimed: &Secret,
        capability: Capability,
        db: &Database,
    ) -> Result<Entity, EntityError> {
        let entity = sqlx::query_as::<_, Entity>(SELECT_ENTITY)
            .bind(id)
            .fetch_optional(&**db)
            .await?
            .ok_or_else(|| {
                tracing::debug!(entity_id = id, %capability, "no such entity");
                EntityError::NotFound
            })?;

        if !entity.secret_for(capability).ct_eq(claimed) {
            tracing::debug!(entity_id = id, %capability, "secret rejected");
            return Err(EntityError::NotFound);
        }

        Ok(entity)
    }

    /// Current text (empty if never set) and content type
    pub async fn get_for_read(
        id: EntityId,
        claimed_public: &Secret,
        db: &Database,
    ) -> Result<EntityContent, EntityError> {
        let entity = Self::resolve(id, claimed_public, Capability::Read, db).await?;

        Ok(EntityContent {
            text: entity.text.unwrap_or_default(),
            content_type: entity.content_type,
        })
    }

    /// Overwrite the text
    pub async fn replace_text(
        id: EntityId,
        claimed_private: &Secret,
        text: &str,
        db: &Database,
    ) -> Result<(), EntityError> {
        Self::resolve(id, claimed_private, Capability::Write, db).await?;
        Self::write_field(
            id,
            r#"
            UPDATE entities
            SET text = ?1, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?2
            "#,
            text,
            db,
        )
        .await?;

        tracing::info!(entity_id = id, len = text.len(), "text replaced");
        Ok(())
    }

    /// Append `suffix` to the text
    ///
    /// The concatenation happens inside the UPDATE statement, so concurrent
    /// appends are serialized by the store and none is lost. Not idempotent:
    /// repeating a call appends the suffix again.
    pub async fn append_text(
        id: EntityId,
        claimed_private: &Secret,
        suffix: &str,
        db: &Database,
    ) -> Result<(), EntityError> {
        Self::resolve(id, claimed_private, Capability::Write, db).await?;
        Self::write_field(
            id,
            r#"
            UPDATE entities
            SET text = COALESCE(text, '') || ?1, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?2
            "#,
            suffix,
            db,
        )
        .await?;

        tracing::info!(entity_id = id, len = suffix.len(), "text appended");
        Ok(())
    }

    /// Change the content type served with the text
    ///
    /// Surrounding whitespace is trimmed. The value must be non-empty,
    /// at most [`MAX_CONTENT_TYPE_LEN`] characters, and printable ASCII so
    /// it can be sent back as a `Content-Type` header.
    pub async fn set_content_type(
        id: EntityId,
        claimed_private: &Secret,
        content_type: &str,
        db: &Database,
    ) -> Result<(), EntityError> {
        // authorize first so a bad value never tells an outsider the link is real
        Self::resolve(id, claimed_private, Capability::Write, db).await?;

        let content_type = validate_content_type(content_type)?;

        Self::write_field(
            id,
            r#"
            UPDATE entities
            SET content_type = ?1, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?2
            "#,
            content_type,
            db,
        )
        .await?;

        tracing::info!(entity_id = id, content_type, "content type changed");
        Ok(())
    }

    /// Run `statement` (binding `value`, then `id`) in its own transaction.
    ///
    /// Callers authorize with [`Entity::resolve`] first. The statement is the
    /// whole read-modify-write, so there is no window for another request to
    /// interleave, and the secrets checked beforehand never change.
    async fn write_field(
        id: EntityId,
        statement: &'static str,
        value: &str,
        db: &Database,
    ) -> Result<(), EntityError> {
        let mut tx = db.begin().await?;

        let updated = sqlx::query(statement)
            .bind(value)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // dropping the transaction rolls it back
        if updated != 1 {
            return Err(EntityError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}

fn validate_content_type(content_type: &str) -> Result<&str, EntityError> {
    let content_type = content_type.trim();

    if content_type.is_empty() {
        return Err(EntityError::InvalidContentType("empty"));
    }
    if content_type.len() > MAX_CONTENT_TYPE_LEN {
        return Err(EntityError::InvalidContentType("too long"));
    }
    if !content_type.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) {
        return Err(EntityError::InvalidContentType(
            "must be printable ASCII",
        ));
    }

    Ok(content_type)
}
