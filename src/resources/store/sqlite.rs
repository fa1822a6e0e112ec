//! SQLite implementation of [`ResourceStore`] on top of `sqlx`.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::{ResourceStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::resources::model::{Resource, ResourceStatus, ResourceType};
use crate::resources::page::{Page, PageRequest};

const COLUMNS: &str = "id, name, type, description, status, location, capacity, \
                       owner_id, responsible_person, created_at, updated_at";

const ORDER: &str = "ORDER BY created_at ASC, id ASC";

#[derive(Debug, sqlx::FromRow)]
struct ResourceRow {
    id: String,
    name: String,
    #[sqlx(rename = "type")]
    resource_type: String,
    description: Option<String>,
    status: String,
    location: Option<String>,
    capacity: Option<i32>,
    owner_id: String,
    responsible_person: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceRow {
    fn try_into_resource(self) -> StoreResult<Resource> {
        let resource_type = ResourceType::from_str(&self.resource_type).map_err(|source| {
            StoreError::Corrupt {
                id: self.id.clone(),
                source,
            }
        })?;
        let status = ResourceStatus::from_str(&self.status).map_err(|source| {
            StoreError::Corrupt {
                id: self.id.clone(),
                source,
            }
        })?;

        Ok(Resource {
            id: self.id,
            name: self.name,
            resource_type,
            description: self.description,
            status,
            location: self.location,
            capacity: self.capacity,
            owner_id: self.owner_id,
            responsible_person: self.responsible_person,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_resources(rows: Vec<ResourceRow>) -> StoreResult<Vec<Resource>> {
    rows.into_iter().map(ResourceRow::try_into_resource).collect()
}

/// Row filter for listing queries.
enum Filter<'a> {
    All,
    Type(ResourceType),
    Status(ResourceStatus),
    TypeAndStatus(ResourceType, ResourceStatus),
    Owner(&'a str),
}

impl<'a> Filter<'a> {
    fn where_clause(&self) -> &'static str {
        match self {
            Filter::All => "",
            Filter::Type(_) => "WHERE type = ?",
            Filter::Status(_) => "WHERE status = ?",
            Filter::TypeAndStatus(_, _) => "WHERE type = ? AND status = ?",
            Filter::Owner(_) => "WHERE owner_id = ?",
        }
    }

    fn params(&self) -> Vec<&'a str> {
        match self {
            Filter::All => Vec::new(),
            Filter::Type(t) => vec![t.as_str()],
            Filter::Status(s) => vec![s.as_str()],
            Filter::TypeAndStatus(t, s) => vec![t.as_str(), s.as_str()],
            Filter::Owner(owner) => vec![*owner],
        }
    }
}

/// Resource store backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteResourceStore {
    pool: SqlitePool,
}

impl SqliteResourceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the configured database. The schema is not applied;
    /// call [`super::run_migrations`] afterwards.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Connecting to resource database"
        );

        let wait = Duration::from_secs(config.acquire_timeout_secs);
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(wait);
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(wait);

        // An in-memory database lives exactly as long as its connection,
        // and every connection opens a separate one.
        if config.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_page(&self, filter: Filter<'_>, page: PageRequest) -> StoreResult<Page<Resource>> {
        let where_clause = filter.where_clause();
        let params = filter.params();

        let count_sql = format!("SELECT COUNT(*) FROM resources {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for p in &params {
            count_query = count_query.bind(*p);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let select_sql =
            format!("SELECT {COLUMNS} FROM resources {where_clause} {ORDER} LIMIT ? OFFSET ?");
        let mut select_query = sqlx::query_as::<_, ResourceRow>(&select_sql);
        for p in &params {
            select_query = select_query.bind(*p);
        }
        let rows = select_query
            .bind(i64::from(page.size()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let total = u64::try_from(total).unwrap_or(0);
        Ok(Page::new(into_resources(rows)?, page, total))
    }
}

impl ResourceStore for SqliteResourceStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Resource>> {
        let sql = format!("SELECT {COLUMNS} FROM resources WHERE id = ?");
        let row = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ResourceRow::try_into_resource).transpose()
    }

    async fn save(&self, resource: Resource) -> StoreResult<Resource> {
        let sql = format!(
            "INSERT INTO resources ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = excluded.name, \
                 type = excluded.type, \
                 description = excluded.description, \
                 status = excluded.status, \
                 location = excluded.location, \
                 capacity = excluded.capacity, \
                 owner_id = excluded.owner_id, \
                 responsible_person = excluded.responsible_person, \
                 updated_at = excluded.updated_at \
             RETURNING created_at"
        );

        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(&sql)
            .bind(&resource.id)
            .bind(&resource.name)
            .bind(resource.resource_type.as_str())
            .bind(&resource.description)
            .bind(resource.status.as_str())
            .bind(&resource.location)
            .bind(resource.capacity)
            .bind(&resource.owner_id)
            .bind(&resource.responsible_person)
            .bind(resource.created_at)
            .bind(resource.updated_at)
            .fetch_one(&self.pool)
            .await?;

        // An overwrite keeps the stored creation time.
        Ok(Resource {
            created_at,
            ..resource
        })
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT EXISTS (SELECT 1 FROM resources WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    async fn list(&self, page: PageRequest) -> StoreResult<Page<Resource>> {
        self.fetch_page(Filter::All, page).await
    }

    async fn list_by_type(
        &self,
        resource_type: ResourceType,
        page: PageRequest,
    ) -> StoreResult<Page<Resource>> {
        self.fetch_page(Filter::Type(resource_type), page).await
    }

    async fn list_by_status(
        &self,
        status: ResourceStatus,
        page: PageRequest,
    ) -> StoreResult<Page<Resource>> {
        self.fetch_page(Filter::Status(status), page).await
    }

    async fn list_by_type_and_status(
        &self,
        resource_type: ResourceType,
        status: ResourceStatus,
        page: PageRequest,
    ) -> StoreResult<Page<Resource>> {
        self.fetch_page(Filter::TypeAndStatus(resource_type, status), page)
            .await
    }

    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Resource>> {
        let filter = Filter::Owner(owner_id);
        let sql = format!("SELECT {COLUMNS} FROM resources {} {ORDER}", filter.where_clause());
        let rows = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        into_resources(rows)
    }

    async fn modify<F>(&self, id: &str, f: F) -> StoreResult<Option<Resource>>
    where
        F: FnOnce(&mut Resource) + Send,
    {
        // Write lock before the read, so concurrent writers queue on the
        // busy timeout instead of failing the lock upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let select_sql = format!("SELECT {COLUMNS} FROM resources WHERE id = ?");
        let row = sqlx::query_as::<_, ResourceRow>(&select_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut resource = row.try_into_resource()?;
        let created_at = resource.created_at;
        f(&mut resource);
        // id and created_at are immutable.
        resource.id = id.to_string();
        resource.created_at = created_at;

        sqlx::query(
            "UPDATE resources SET name = ?, type = ?, description = ?, status = ?, \
             location = ?, capacity = ?, owner_id = ?, responsible_person = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&resource.name)
        .bind(resource.resource_type.as_str())
        .bind(&resource.description)
        .bind(resource.status.as_str())
        .bind(&resource.location)
        .bind(resource.capacity)
        .bind(&resource.owner_id)
        .bind(&resource.responsible_person)
        .bind(resource.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(resource))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
