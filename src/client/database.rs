// file: src/client/database.rs
// description: document, partition and update handler operations on one database
// reference: https://docs.couchdb.org/en/stable/api/database/index.html

use crate::client::couch::CouchClient;
use crate::error::{CouchError, Result};
use crate::models::{
    AllDocsResponse, DbInfo, DesignDocument, Params, PartitionInfo, Response, design_id,
};
use crate::uri::DatabaseUri;
use crate::util::validation::DESIGN_PREFIX;
use crate::util::{Validator, get_as_string};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

#[derive(Clone)]
pub struct Database {
    client: CouchClient,
    name: String,
    uri: DatabaseUri,
}

impl Database {
    pub(crate) fn new(client: CouchClient, name: &str) -> Self {
        Self {
            uri: DatabaseUri::new(client.base_uri(), name),
            name: name.to_string(),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        self.uri.database_uri()
    }

    pub async fn info(&self) -> Result<DbInfo> {
        self.client.http().get_json(self.uri.database_uri()).await
    }

    pub async fn partition_info(&self, partition_key: &str) -> Result<PartitionInfo> {
        Validator::assert_not_empty(partition_key, "partitionKey")?;
        self.client
            .http()
            .get_json(&self.uri.partition_uri(partition_key))
            .await
    }

    pub async fn find<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        Validator::assert_not_empty(id, "id")?;
        self.client.http().get_json(&self.uri.document_uri(id)).await
    }

    pub async fn find_with_params<T: DeserializeOwned>(&self, id: &str, params: &Params) -> Result<T> {
        Validator::assert_not_empty(id, "id")?;
        self.client
            .http()
            .get_json(&self.uri.document_uri_with_params(id, params))
            .await
    }

    pub async fn find_rev<T: DeserializeOwned>(&self, id: &str, rev: &str) -> Result<T> {
        Validator::assert_not_empty(id, "id")?;
        Validator::assert_not_empty(rev, "rev")?;
        self.client
            .http()
            .get_json(&self.uri.document_uri_with_rev(id, rev))
            .await
    }

    pub async fn find_json(&self, id: &str) -> Result<Value> {
        self.find(id).await
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Validator::assert_not_empty(id, "id")?;
        match self
            .client
            .http()
            .execute(Method::HEAD, &self.uri.document_uri(id), None)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Stores a new document. The id is generated when the document has none;
    /// a document that already carries `_rev` is rejected.
    pub async fn save<T: Serialize>(&self, document: &T) -> Result<Response> {
        self.save_with_params(document, &Params::new()).await
    }

    /// Like [`Database::save`], waiting for `quorum` replicas to acknowledge.
    pub async fn save_with_write_quorum<T: Serialize>(
        &self,
        document: &T,
        quorum: u32,
    ) -> Result<Response> {
        self.save_with_params(document, &Params::new().write_quorum(quorum))
            .await
    }

    async fn save_with_params<T: Serialize>(&self, document: &T, params: &Params) -> Result<Response> {
        let json = to_object(document)?;
        Validator::assert_absent(get_as_string(&json, "_rev").as_deref(), "rev")?;

        let id = get_as_string(&json, "_id").unwrap_or_else(Validator::generate_uuid);
        Validator::validate_document_id(&id)?;

        self.client
            .http()
            .send_for_response(
                Method::PUT,
                &self.uri.document_uri_with_params(&id, params),
                Some(&json),
            )
            .await
    }

    /// Stores a new document and lets the server pick the id.
    pub async fn post<T: Serialize>(&self, document: &T) -> Result<Response> {
        self.post_with_params(document, &Params::new()).await
    }

    pub async fn post_with_write_quorum<T: Serialize>(
        &self,
        document: &T,
        quorum: u32,
    ) -> Result<Response> {
        self.post_with_params(document, &Params::new().write_quorum(quorum))
            .await
    }

    async fn post_with_params<T: Serialize>(&self, document: &T, params: &Params) -> Result<Response> {
        let json = to_object(document)?;
        self.client
            .http()
            .send_for_response(
                Method::POST,
                &self.uri.database_uri_with_params(params),
                Some(&json),
            )
            .await
    }

    pub async fn update<T: Serialize>(&self, document: &T) -> Result<Response> {
        self.update_with_params(document, &Params::new()).await
    }

    pub async fn update_with_write_quorum<T: Serialize>(
        &self,
        document: &T,
        quorum: u32,
    ) -> Result<Response> {
        self.update_with_params(document, &Params::new().write_quorum(quorum))
            .await
    }

    async fn update_with_params<T: Serialize>(
        &self,
        document: &T,
        params: &Params,
    ) -> Result<Response> {
        let json = to_object(document)?;
        let id = get_as_string(&json, "_id");
        let id = Validator::assert_present(id.as_deref(), "id")?;
        Validator::assert_present(get_as_string(&json, "_rev").as_deref(), "rev")?;
        Validator::validate_document_id(id)?;

        self.client
            .http()
            .send_for_response(
                Method::PUT,
                &self.uri.document_uri_with_params(id, params),
                Some(&json),
            )
            .await
    }

    pub async fn remove(&self, id: &str, rev: &str) -> Result<Response> {
        Validator::assert_not_empty(id, "id")?;
        Validator::assert_not_empty(rev, "rev")?;
        self.client
            .http()
            .send_for_response(Method::DELETE, &self.uri.document_uri_with_rev(id, rev), None)
            .await
    }

    /// Reads the raw content of an attachment of the current revision.
    pub async fn find_attachment(&self, id: &str, name: &str) -> Result<Vec<u8>> {
        self.fetch_attachment(id, None, name).await
    }

    /// Reads the raw content of an attachment as it was at `rev`.
    pub async fn find_attachment_rev(&self, id: &str, name: &str, rev: &str) -> Result<Vec<u8>> {
        Validator::assert_not_empty(rev, "rev")?;
        self.fetch_attachment(id, Some(rev), name).await
    }

    async fn fetch_attachment(&self, id: &str, rev: Option<&str>, name: &str) -> Result<Vec<u8>> {
        Validator::assert_not_empty(id, "id")?;
        Validator::assert_not_empty(name, "attachmentName")?;
        Validator::validate_attachment_name(name)?;

        let uri = self.uri.attachment_uri(id, rev, name);
        let response = self.client.http().execute(Method::GET, &uri, None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Uploads `data` as a standalone attachment.
    ///
    /// Without `id` a new document with a generated id is created and `rev`
    /// must be `None`. With `id` and no `rev` the document must not exist yet.
    pub async fn save_attachment(
        &self,
        id: Option<&str>,
        rev: Option<&str>,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<Response> {
        Validator::assert_not_empty(name, "name")?;
        Validator::validate_attachment_name(name)?;
        Validator::assert_not_empty(content_type, "contentType")?;

        let id = match id {
            Some(id) => {
                Validator::assert_not_empty(id, "docId")?;
                if let Some(rev) = rev {
                    Validator::assert_not_empty(rev, "docRev")?;
                }
                id.to_string()
            }
            None => {
                Validator::assert_absent(rev, "docRev")?;
                Validator::generate_uuid()
            }
        };
        Validator::validate_document_id(&id)?;

        self.client
            .http()
            .send_raw_for_response(
                Method::PUT,
                &self.uri.attachment_uri(&id, rev, name),
                content_type,
                data,
            )
            .await
    }

    pub async fn remove_attachment(&self, id: &str, rev: &str, name: &str) -> Result<Response> {
        Validator::assert_not_empty(id, "id")?;
        Validator::assert_not_empty(rev, "rev")?;
        Validator::assert_not_empty(name, "attachmentName")?;
        Validator::validate_attachment_name(name)?;

        self.client
            .http()
            .send_for_response(
                Method::DELETE,
                &self.uri.attachment_uri(id, Some(rev), name),
                None,
            )
            .await
    }

    /// Lists documents through `_all_docs`. Pass [`Params::include_docs`] to
    /// get the document bodies in the rows.
    pub async fn all_docs(&self, params: &Params) -> Result<AllDocsResponse> {
        self.client
            .http()
            .get_json(&self.uri.all_docs_uri(params))
            .await
    }

    pub async fn design_document(&self, name: &str) -> Result<DesignDocument> {
        Validator::assert_not_empty(name, "designDocName")?;
        self.find(&design_id(name)).await
    }

    /// Creates or replaces a design document. Without a `_rev` the current
    /// revision on the server, if any, is looked up first.
    pub async fn save_design_document(&self, design: &DesignDocument) -> Result<Response> {
        let id = Validator::assert_present(design.document.id.as_deref(), "id")?;
        let id = design_id(id);

        let mut json = to_object(design)?;
        json["_id"] = Value::from(id.as_str());

        if design.document.rev.is_none() {
            match self.find_json(&id).await {
                Ok(current) => {
                    if let Some(rev) = get_as_string(&current, "_rev") {
                        json["_rev"] = Value::from(rev);
                    }
                }
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        let response = self
            .client
            .http()
            .send_for_response(Method::PUT, &self.uri.document_uri(&id), Some(&json))
            .await?;
        info!("Saved design document {} in {}", id, self.name);
        Ok(response)
    }

    /// Writes all documents in one `_bulk_docs` request. Failures of single
    /// documents come back as entries with `error` set.
    pub async fn bulk<T: Serialize>(&self, documents: &[T]) -> Result<Vec<Response>> {
        let body = json!({ "docs": serde_json::to_value(documents)? });
        let response = self
            .client
            .http()
            .execute(Method::POST, &self.uri.bulk_docs_uri(), Some(&body))
            .await?;

        let status = response.status().as_u16();
        let mut results: Vec<Response> = response.json().await?;
        for result in &mut results {
            result.status_code = status;
        }
        debug!("Bulk request wrote {} documents to {}", results.len(), self.name);
        Ok(results)
    }

    /// Calls `_design/<design>/_update/<handler>` where `handler_uri` is
    /// `design/handler`. With a document id the call is a `PUT` on that
    /// document, otherwise a `POST`. Returns the handler output verbatim.
    pub async fn invoke_update_handler(
        &self,
        handler_uri: &str,
        doc_id: Option<&str>,
        params: &Params,
    ) -> Result<String> {
        Validator::assert_not_empty(handler_uri, "uri")?;
        let trimmed = handler_uri.strip_prefix(DESIGN_PREFIX).unwrap_or(handler_uri);

        let (design, handler) = match trimmed.split_once('/') {
            Some((design, handler)) if !design.is_empty() && !handler.is_empty() => {
                (design, handler)
            }
            _ => {
                return Err(CouchError::Validation(format!(
                    "Update handler URI must look like designDoc/handler, got {}",
                    handler_uri
                )));
            }
        };

        let doc_id = doc_id.filter(|id| !id.is_empty());
        let uri = self.uri.update_handler_uri(design, handler, doc_id, params);
        let method = if doc_id.is_some() {
            Method::PUT
        } else {
            Method::POST
        };

        self.client.http().send_text(method, &uri, None).await
    }

    pub async fn ensure_full_commit(&self) -> Result<()> {
        self.client
            .http()
            .execute(Method::POST, &self.uri.ensure_full_commit_uri(), None)
            .await?;
        info!("Requested full commit of {}", self.name);
        Ok(())
    }
}

fn to_object<T: Serialize>(document: &T) -> Result<Value> {
    let json = serde_json::to_value(document)?;
    if !json.is_object() {
        return Err(CouchError::Validation(
            "A document must serialize to a JSON object.".to_string(),
        ));
    }
    Ok(json)
}
