// file: src/client/couch.rs
// description: server level operations of a CouchDB compatible account
// reference: https://docs.couchdb.org/en/stable/api/server/common.html

use crate::client::database::Database;
use crate::client::http::HttpTransport;
use crate::error::{CouchError, Result};
use crate::uri::UriBuilder;
use crate::util::{Validator, get_as_string, json_to_object};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CouchClient {
    base_uri: String,
    http: HttpTransport,
}

impl CouchClient {
    pub(crate) fn new(base_uri: String, http: HttpTransport) -> Self {
        Self { base_uri, http }
    }

    /// The account URI, without a trailing `/`.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn uri(&self) -> UriBuilder {
        UriBuilder::new(&self.base_uri)
    }

    pub(crate) fn http(&self) -> &HttpTransport {
        &self.http
    }

    /// Returns a handle on `name`, creating the database first when `create`
    /// is set. Without `create` the database is not checked for existence.
    pub async fn database(&self, name: &str, create: bool) -> Result<Database> {
        Validator::assert_not_empty(name, "dbName")?;
        if create {
            self.create_db(name).await?;
        }
        Ok(Database::new(self.clone(), name))
    }

    pub async fn server_version(&self) -> Result<String> {
        let welcome: Value = self.http.get_json(&self.uri().build()).await?;
        get_as_string(&welcome, "version").ok_or_else(|| {
            CouchError::Validation("Server welcome message has no version".to_string())
        })
    }

    pub async fn all_dbs(&self) -> Result<Vec<String>> {
        self.http.get_json(&self.uri().path("_all_dbs").build()).await
    }

    /// Creates the database unless it already exists.
    pub async fn create_db(&self, name: &str) -> Result<()> {
        Validator::assert_not_empty(name, "dbName")?;
        let uri = self.uri().path(name).build();

        match self.http.execute(Method::GET, &uri, None).await {
            Ok(_) => {
                debug!("Database '{}' already exists", name);
                Ok(())
            }
            Err(e) if e.is_not_found() => match self.http.execute(Method::PUT, &uri, None).await {
                Ok(_) => {
                    info!("Created Database: '{}'", name);
                    Ok(())
                }
                // Created by someone else since the GET.
                Err(CouchError::PreconditionFailed(_)) => {
                    debug!("Database '{}' already exists", name);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    pub async fn create_partitioned_db(&self, name: &str) -> Result<()> {
        Validator::assert_not_empty(name, "dbName")?;
        let uri = self.uri().path(name).query("partitioned", true).build();
        self.http.execute(Method::PUT, &uri, None).await?;
        info!("Created partitioned database: '{}'", name);
        Ok(())
    }

    pub async fn delete_db(&self, name: &str) -> Result<()> {
        Validator::assert_not_empty(name, "dbName")?;
        let uri = self.uri().path(name).build();
        self.http.execute(Method::DELETE, &uri, None).await?;
        info!("Deleted database: '{}'", name);
        Ok(())
    }

    pub async fn uuids(&self, count: u64) -> Result<Vec<String>> {
        let uri = self.uri().path("_uuids").query("count", count).build();
        let body: Value = self.http.get_json(&uri).await?;
        Ok(json_to_object(&body, "uuids")?.unwrap_or_default())
    }
}
