//! PostgreSQL-backed store.

use diesel::{OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use uuid::Uuid;

use crate::db::connection::DbPool;
use crate::db::params::{ClientListParams, ClientPage, ClientSearchParams};
use crate::db::query::client as client_query;
use crate::db::schema::{client, client_status, language, pronoun, sex_value};
use crate::db::{ClientStore, ReferenceStore};
use crate::error::{DbError, DbResult};
use crate::model::client::{Client, ClientChanges};
use crate::model::reference::{Catalogs, ClientStatus, Language, Pronoun, SexValue};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Store backed by a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// The partial unique index on `lower(email)` is the authoritative
/// duplicate-email guard; map its violation to a dedicated error so the
/// service can surface a clean conflict even when the pre-write check races.
fn map_write_error(err: diesel::result::Error) -> DbError {
    match err {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => DbError::UniqueViolation("client email"),
        other => DbError::DatabaseError(other),
    }
}

#[async_trait::async_trait]
impl ClientStore for PgStore {
    #[tracing::instrument(skip(self, record), fields(client_id = %record.id))]
    async fn insert(&self, record: Client) -> DbResult<Client> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(client::table)
            .values(&record)
            .returning(Client::as_select())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: Uuid, include_deleted: bool) -> DbResult<Option<Client>> {
        let mut conn = self.pool.get().await?;
        let row = client_query::by_id(id, include_deleted)
            .first::<Client>(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }

    #[tracing::instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: ClientChanges) -> DbResult<Option<Client>> {
        use diesel::ExpressionMethods;

        let mut conn = self.pool.get().await?;
        let result = diesel::update(
            client::table
                .filter(client::id.eq(id))
                .filter(client::deleted_at.is_null()),
        )
        .set(&changes)
        .returning(Client::as_select())
        .get_result::<Client>(&mut conn)
        .await;

        match result {
            Ok(row) => Ok(Some(row)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(err) => Err(map_write_error(err)),
        }
    }

    #[tracing::instrument(skip(self, email))]
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> DbResult<bool> {
        let mut conn = self.pool.get().await?;
        let matches: i64 = client_query::by_email(email, exclude)
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(matches > 0)
    }

    #[tracing::instrument(skip(self, params))]
    async fn list(&self, params: &ClientListParams) -> DbResult<ClientPage> {
        let mut conn = self.pool.get().await?;

        let total: i64 = client_query::filtered_list(params)
            .count()
            .get_result(&mut conn)
            .await?;

        let items = client_query::apply_order(client_query::filtered_list(params), params.order)
            .limit(params.limit)
            .offset(params.offset)
            .load::<Client>(&mut conn)
            .await?;

        Ok(ClientPage { total, items })
    }

    #[tracing::instrument(skip(self, params))]
    async fn search(&self, params: &ClientSearchParams) -> DbResult<Vec<Client>> {
        let mut conn = self.pool.get().await?;
        let items = client_query::apply_order(
            client_query::filtered_search(params),
            crate::db::params::ListOrder::default(),
        )
        .limit(params.limit)
        .load::<Client>(&mut conn)
        .await?;
        Ok(items)
    }
}

#[async_trait::async_trait]
impl ReferenceStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn catalogs(&self) -> DbResult<Catalogs> {
        let mut conn = self.pool.get().await?;

        let client_statuses = client_status::table
            .select(ClientStatus::as_select())
            .load(&mut conn)
            .await?;
        let languages = language::table
            .select(Language::as_select())
            .load(&mut conn)
            .await?;
        let pronouns = pronoun::table
            .select(Pronoun::as_select())
            .load(&mut conn)
            .await?;
        let sex_values = sex_value::table
            .select(SexValue::as_select())
            .load(&mut conn)
            .await?;

        Ok(Catalogs {
            client_statuses,
            languages,
            pronouns,
            sex_values,
        })
    }
}

/// ## Summary
/// Runs pending embedded migrations against the given database URL.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration
/// fails to apply.
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    use diesel::Connection;
    use diesel_async::AsyncPgConnection;
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;

    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
        Ok::<_, anyhow::Error>(())
    })
    .await??;

    Ok(())
}
